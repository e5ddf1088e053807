// Event tree model and the default event compiler
//
// Events arrive from the editor as a tree: each event names a command, a
// map of arguments, and optionally named child lists ("true"/"false" for
// conditionals).

use crate::script_compiler::builder::{Branch, CompileEventsFn, ScriptBuilder};
use crate::script_compiler::builder_branch::Comparison;
use crate::script_compiler::builder_commands::MoveType;
use crate::script_compiler::error::CompilerError;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use std::rc::Rc;

pub const EVENT_ACTOR_SET_ACTIVE: &str = "EVENT_ACTOR_SET_ACTIVE";
pub const EVENT_ACTOR_MOVE_TO: &str = "EVENT_ACTOR_MOVE_TO";
pub const EVENT_WAIT: &str = "EVENT_WAIT";
pub const EVENT_TEXT: &str = "EVENT_TEXT";
pub const EVENT_IF_TRUE: &str = "EVENT_IF_TRUE";
pub const EVENT_IF_VALUE: &str = "EVENT_IF_VALUE";
pub const EVENT_LABEL_DEFINE: &str = "EVENT_LABEL_DEFINE";
pub const EVENT_LABEL_GOTO: &str = "EVENT_LABEL_GOTO";
pub const EVENT_DEBUG: &str = "EVENT_DEBUG";
pub const EVENT_END: &str = "EVENT_END";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EventArg {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for EventArg {
    fn from(value: bool) -> Self {
        EventArg::Bool(value)
    }
}

impl From<i32> for EventArg {
    fn from(value: i32) -> Self {
        EventArg::Int(value as i64)
    }
}

impl From<i64> for EventArg {
    fn from(value: i64) -> Self {
        EventArg::Int(value)
    }
}

impl From<&str> for EventArg {
    fn from(value: &str) -> Self {
        EventArg::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptEvent {
    #[serde(default)]
    pub id: String,
    pub command: String,
    #[serde(default)]
    pub args: IndexMap<String, EventArg>,
    #[serde(default)]
    pub children: IndexMap<String, Vec<ScriptEvent>>,
    #[serde(default)]
    pub disabled: bool,
}

impl ScriptEvent {
    pub fn new(id: &str, command: &str) -> Self {
        ScriptEvent {
            id: id.to_string(),
            command: command.to_string(),
            args: IndexMap::new(),
            children: IndexMap::new(),
            disabled: false,
        }
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<EventArg>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    pub fn with_children(mut self, key: &str, events: Vec<ScriptEvent>) -> Self {
        self.children.insert(key.to_string(), events);
        self
    }

    /// Child list by name; missing lists are empty.
    pub fn children(&self, key: &str) -> &[ScriptEvent] {
        self.children.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn invalid(&self, msg: String) -> CompilerError {
        CompilerError::InvalidArgument(self.command.clone(), msg)
    }

    pub fn arg_str(&self, key: &str) -> Result<&str, CompilerError> {
        match self.args.get(key) {
            Some(EventArg::Text(s)) => Ok(s.as_str()),
            Some(other) => {
                Err(self.invalid(format!("'{}' must be text, got {:?}", key, other)))
            }
            None => Err(self.invalid(format!("missing '{}'", key))),
        }
    }

    /// Numeric argument; variable ids are also accepted as text.
    pub fn arg_id(&self, key: &str) -> Result<String, CompilerError> {
        match self.args.get(key) {
            Some(EventArg::Text(s)) => Ok(s.clone()),
            Some(EventArg::Int(n)) => Ok(n.to_string()),
            Some(other) => {
                Err(self.invalid(format!("'{}' must be an id, got {:?}", key, other)))
            }
            None => Err(self.invalid(format!("missing '{}'", key))),
        }
    }

    pub fn arg_int<T: TryFrom<i64>>(&self, key: &str) -> Result<T, CompilerError> {
        match self.args.get(key) {
            Some(EventArg::Int(n)) => T::try_from(*n)
                .map_err(|_| self.invalid(format!("'{}' out of range: {}", key, n))),
            Some(other) => {
                Err(self.invalid(format!("'{}' must be a number, got {:?}", key, other)))
            }
            None => Err(self.invalid(format!("missing '{}'", key))),
        }
    }

    pub fn arg_bool_or(&self, key: &str, default: bool) -> Result<bool, CompilerError> {
        match self.args.get(key) {
            Some(EventArg::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(format!(
                "'{}' must be true or false, got {:?}",
                key, other
            ))),
            None => Ok(default),
        }
    }
}

/// Callback lowering the built-in event commands.
pub fn default_event_compiler() -> CompileEventsFn {
    Rc::new(compile_event_list)
}

pub fn compile_event_list(
    sb: &mut ScriptBuilder,
    events: &[ScriptEvent],
) -> Result<(), CompilerError> {
    for event in events {
        if event.disabled {
            debug!("skipping disabled event {} ({})", event.id, event.command);
            continue;
        }
        compile_event(sb, event)?;
    }
    Ok(())
}

fn compile_event(sb: &mut ScriptBuilder, event: &ScriptEvent) -> Result<(), CompilerError> {
    debug!("compiling event {} ({})", event.id, event.command);
    match event.command.as_str() {
        EVENT_ACTOR_SET_ACTIVE => sb.actor_set_active(event.arg_str("actorId")?),
        EVENT_ACTOR_MOVE_TO => {
            let move_type = match event.args.get("moveType") {
                None => MoveType::Horizontal,
                Some(_) => {
                    let name = event.arg_str("moveType")?;
                    MoveType::parse(name)
                        .ok_or_else(|| event.invalid(format!("unknown move type '{}'", name)))?
                }
            };
            sb.actor_move_to(
                event.arg_int("x")?,
                event.arg_int("y")?,
                event.arg_bool_or("useCollisions", true)?,
                move_type,
            )
        }
        EVENT_WAIT => sb.wait(event.arg_int("frames")?),
        EVENT_TEXT => sb.text_dialogue(event.arg_str("text")?),
        EVENT_IF_TRUE => sb.if_variable_true(
            &event.arg_id("variable")?,
            Branch::Events(event.children("true")),
            Branch::Events(event.children("false")),
        ),
        EVENT_IF_VALUE => {
            let operator = event.arg_str("operator")?;
            let comparison = Comparison::parse(operator)
                .ok_or_else(|| event.invalid(format!("unknown operator '{}'", operator)))?;
            sb.if_variable_compare(
                &event.arg_id("variable")?,
                comparison,
                event.arg_int("comparator")?,
                Branch::Events(event.children("true")),
                Branch::Events(event.children("false")),
            )
        }
        EVENT_LABEL_DEFINE => sb.label_define(event.arg_str("label")?),
        EVENT_LABEL_GOTO => sb.label_goto(event.arg_str("label")?),
        EVENT_DEBUG => sb.debug_message(event.arg_str("text")?),
        EVENT_END => sb.script_end(),
        other => {
            warn!("no lowering for command {} in event {}", other, event.id);
            Err(CompilerError::UnknownCommand(
                event.id.clone(),
                other.to_string(),
            ))
        }
    }
}
