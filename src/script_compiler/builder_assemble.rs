// builder_assemble.rs
// Module preamble and final text for ScriptBuilder

use crate::script_compiler::builder::ScriptBuilder;
use crate::script_compiler::builder_emit::{format_instruction, label_symbol, INDENT};
use crate::script_compiler::config::LocalActorMode;
use crate::script_compiler::error::CompilerError;
use log::info;

/// Words reserved on the stack for the local actor structure
pub const LOCAL_ACTOR_SIZE: usize = 4;

impl ScriptBuilder {
    fn needs_local_actor(&self) -> bool {
        match self.options.local_actor {
            LocalActorMode::Auto => self.uses_local_actor,
            LocalActorMode::Always => true,
            LocalActorMode::Never => false,
        }
    }

    /// Wrap the output buffer in the module preamble for `name`.
    pub fn to_script_string(
        &self,
        name: &str,
        export_global: bool,
    ) -> Result<String, CompilerError> {
        if let Some(label) = self.stack.unresolved_labels().next() {
            return Err(CompilerError::UndefinedLabel(label_symbol(label)));
        }

        let local_actor = self.needs_local_actor();
        let bank = self.options.bank;
        let mut lines: Vec<String> = Vec::new();

        for include in &self.options.includes {
            lines.push(format!(".include \"{}\"", include));
        }
        lines.push(String::new());
        lines.push(format!(".area _CODE_{}", bank));
        lines.push(String::new());

        if local_actor {
            lines.push(format!("ACTOR = -{}", LOCAL_ACTOR_SIZE));
            lines.push(String::new());
        }

        lines.push(format!("___bank_{} = {}", name, bank));
        lines.push(format!(".globl ___bank_{}", name));
        if export_global {
            lines.push(format!(".globl _{}", name));
        }
        lines.push(String::new());
        lines.push(format!("_{}::", name));

        if local_actor {
            lines.push(format!("{}; Local Actor", INDENT));
            for _ in 0..LOCAL_ACTOR_SIZE {
                lines.push(format_instruction("VM_PUSH_CONST", &["0"]));
            }
            lines.push(String::new());
        }

        info!(
            "assembled script {} for scene '{}': {} body lines, bank {}, local actor {}",
            name,
            self.context.scene().id,
            self.output.len(),
            bank,
            local_actor
        );

        lines.extend(self.output.iter().cloned());
        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }
}
