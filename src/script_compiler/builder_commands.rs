// builder_commands.rs
// Command library for ScriptBuilder
//
// Each command is a fixed instruction template. Commands run through
// `run_command`, which writes the comment header and trailing blank line and
// checks the command left the stack where it found it.

use crate::script_compiler::builder::ScriptBuilder;
use crate::script_compiler::error::CompilerError;
use crate::script_compiler::events::EVENT_ACTOR_MOVE_TO;
use log::debug;

/// Sub-pixel units per tile: 8 pixels, 16 sub-pixels each
pub const TILE_SUBPIXELS: i32 = 128;

/// Local actor structure offsets
const ACTOR_FIELD_X: usize = 1;
const ACTOR_FIELD_Y: usize = 2;
const ACTOR_FIELD_FLAGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Horizontal,
    Vertical,
    Diagonal,
}

impl MoveType {
    pub fn parse(s: &str) -> Option<MoveType> {
        match s {
            "horizontal" => Some(MoveType::Horizontal),
            "vertical" => Some(MoveType::Vertical),
            "diagonal" => Some(MoveType::Diagonal),
            _ => None,
        }
    }
}

/// Convert a tile coordinate to sub-pixels.
fn tile_to_subpixels(axis: &str, tile: i32) -> Result<i32, CompilerError> {
    tile.checked_mul(TILE_SUBPIXELS).ok_or_else(|| {
        CompilerError::InvalidArgument(
            EVENT_ACTOR_MOVE_TO.to_string(),
            format!("'{}' out of range: {}", axis, tile),
        )
    })
}

/// Render a set of assembler flag constants as one operand.
pub fn flags_operand(flags: &[&str]) -> String {
    match flags {
        [] => "0".to_string(),
        [flag] => flag.to_string(),
        _ => format!("^/({})/", flags.join(" | ")),
    }
}

impl ScriptBuilder {
    /// Run a command body between its comment and a blank line, checking the
    /// body is stack neutral.
    pub(crate) fn run_command<F>(&mut self, name: &str, body: F) -> Result<(), CompilerError>
    where
        F: FnOnce(&mut ScriptBuilder) -> Result<(), CompilerError>,
    {
        let depth = self.stack.depth();
        self.comment(name);
        body(self)?;
        if self.stack.depth() != depth {
            return Err(CompilerError::StackImbalance(
                name.to_string(),
                depth,
                self.stack.depth(),
            ));
        }
        self.blank();
        Ok(())
    }

    pub fn actor_set_active(&mut self, actor: &str) -> Result<(), CompilerError> {
        self.run_command("Actor Set Active", |sb| {
            let index = sb.context.resolve_actor(actor)?;
            debug!("active actor '{}' -> slot {}", actor, index);
            let target = sb.actor_operand(0);
            let index = index.to_string();
            sb.emit("VM_SET_CONST", &[target.as_str(), index.as_str()]);
            Ok(())
        })
    }

    /// Move the active actor to tile coordinates.
    pub fn actor_move_to(
        &mut self,
        x: i32,
        y: i32,
        use_collisions: bool,
        move_type: MoveType,
    ) -> Result<(), CompilerError> {
        let x = tile_to_subpixels("x", x)?;
        let y = tile_to_subpixels("y", y)?;
        self.run_command("Actor Move To", |sb| {
            let mut flags = Vec::new();
            if use_collisions {
                flags.push(".ACTOR_ATTR_CHECK_COLL");
            }
            match move_type {
                MoveType::Horizontal => flags.push(".ACTOR_ATTR_H_FIRST"),
                MoveType::Diagonal => flags.push(".ACTOR_ATTR_DIAGONAL"),
                MoveType::Vertical => {}
            }

            let fields = [
                (ACTOR_FIELD_X, x.to_string()),
                (ACTOR_FIELD_Y, y.to_string()),
                (ACTOR_FIELD_FLAGS, flags_operand(&flags)),
            ];
            for (offset, value) in fields.iter() {
                let target = sb.actor_operand(*offset);
                sb.emit("VM_SET_CONST", &[target.as_str(), value.as_str()]);
            }

            let actor = sb.actor_operand(0);
            sb.emit("VM_ACTOR_MOVE_TO", &[actor.as_str()]);
            Ok(())
        })
    }

    /// Suspend the script for a number of frames.
    pub fn wait(&mut self, frames: u16) -> Result<(), CompilerError> {
        self.run_command("Wait N Frames", |sb| {
            let frames = frames.to_string();
            sb.emit("VM_PUSH_CONST", &[frames.as_str()]);
            sb.stack.push(1);
            // The callee removes its single argument on return
            sb.emit(
                "VM_INVOKE",
                &["b_wait_frames", "_wait_frames", "1", ".ARG0"],
            );
            sb.stack.pop(1)
        })
    }

    /// Show a line of dialogue and block until the player dismisses it.
    pub fn text_dialogue(&mut self, text: &str) -> Result<(), CompilerError> {
        self.run_command("Text Dialogue", |sb| {
            sb.emit("VM_LOAD_TEXT", &["0"]);
            sb.asciz(text);
            sb.emit(
                "VM_OVERLAY_CLEAR",
                &[
                    "0",
                    "0",
                    "20",
                    "4",
                    ".UI_COLOR_WHITE",
                    "^/(.UI_AUTO_SCROLL | .UI_DRAW_FRAME)/",
                ],
            );
            sb.emit("VM_OVERLAY_MOVE_TO", &["0", "14", ".OVERLAY_TEXT_IN_SPEED"]);
            sb.emit("VM_DISPLAY_TEXT", &[]);
            sb.emit(
                "VM_OVERLAY_WAIT",
                &[
                    ".UI_MODAL",
                    "^/(.UI_WAIT_WINDOW | .UI_WAIT_TEXT | .UI_WAIT_BTN_A)/",
                ],
            );
            sb.emit("VM_OVERLAY_MOVE_TO", &["0", "18", ".OVERLAY_TEXT_OUT_SPEED"]);
            sb.emit(
                "VM_OVERLAY_WAIT",
                &[".UI_MODAL", "^/(.UI_WAIT_WINDOW | .UI_WAIT_TEXT)/"],
            );
            Ok(())
        })
    }

    /// Write a message to the emulator debug log.
    pub fn debug_message(&mut self, text: &str) -> Result<(), CompilerError> {
        self.emit("VM_DEBUG", &["0"]);
        self.asciz(text);
        Ok(())
    }
}
