// GBVM Script Builder
//
// Lowers one script into GBVM assembly text. A builder is created per
// script, driven through command and control-flow calls that append to its
// output buffer, then consumed by `to_script_string`.
//
// The builder is split across several files:
//   builder_emit.rs     - line formatting and the output buffer
//   builder_branch.rs   - conditionals, labels and jumps
//   builder_commands.rs - actor, wait and dialogue commands
//   builder_assemble.rs - module preamble and final text

use crate::script_compiler::config::ScriptOptions;
use crate::script_compiler::context::ScriptContext;
use crate::script_compiler::error::CompilerError;
use crate::script_compiler::events::ScriptEvent;
use crate::script_compiler::stack::StackTracker;
use std::fmt;
use std::rc::Rc;

/// Lowers a nested event list into the same builder. Supplied by whoever
/// knows the full catalogue of event commands.
pub type CompileEventsFn =
    Rc<dyn Fn(&mut ScriptBuilder, &[ScriptEvent]) -> Result<(), CompilerError>>;

/// One arm of a conditional.
pub enum Branch<'a> {
    /// Event sub-tree, lowered through the compile events callback
    Events(&'a [ScriptEvent]),
    /// Already-lowered code written directly against the builder
    Block(Box<dyn FnOnce(&mut ScriptBuilder) -> Result<(), CompilerError> + 'a>),
    Empty,
}

impl<'a> Branch<'a> {
    pub fn block<F>(f: F) -> Self
    where
        F: FnOnce(&mut ScriptBuilder) -> Result<(), CompilerError> + 'a,
    {
        Branch::Block(Box::new(f))
    }
}

impl<'a> From<&'a [ScriptEvent]> for Branch<'a> {
    fn from(events: &'a [ScriptEvent]) -> Self {
        Branch::Events(events)
    }
}

impl<'a> From<&'a Vec<ScriptEvent>> for Branch<'a> {
    fn from(events: &'a Vec<ScriptEvent>) -> Self {
        Branch::Events(events.as_slice())
    }
}

impl fmt::Debug for Branch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Branch::Events(events) => write!(f, "Events({})", events.len()),
            Branch::Block(_) => write!(f, "Block"),
            Branch::Empty => write!(f, "Empty"),
        }
    }
}

pub struct ScriptBuilder {
    pub(crate) context: ScriptContext,
    pub(crate) options: ScriptOptions,
    pub(crate) compile_events: Option<CompileEventsFn>,

    // Output buffer, append only
    pub(crate) output: Vec<String>,

    // Stack depth and labels
    pub(crate) stack: StackTracker,

    // Set once any actor-relative operand is emitted
    pub(crate) uses_local_actor: bool,
}

impl ScriptBuilder {
    pub fn new(context: ScriptContext) -> Self {
        Self::with_options(context, ScriptOptions::default())
    }

    pub fn with_options(context: ScriptContext, options: ScriptOptions) -> Self {
        ScriptBuilder {
            context,
            options,
            compile_events: None,
            output: Vec::new(),
            stack: StackTracker::new(),
            uses_local_actor: false,
        }
    }

    /// Install the callback used to lower `Branch::Events` arms.
    pub fn with_event_compiler(mut self, compile_events: CompileEventsFn) -> Self {
        self.compile_events = Some(compile_events);
        self
    }

    pub fn context(&self) -> &ScriptContext {
        &self.context
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn uses_local_actor(&self) -> bool {
        self.uses_local_actor
    }

    // Low level stack and label primitives. Callers pair these with the
    // instructions that actually move the VM stack.

    pub fn stack_push(&mut self, n: usize) {
        self.stack.push(n);
    }

    pub fn stack_pop(&mut self, n: usize) -> Result<(), CompilerError> {
        self.stack.pop(n)
    }

    pub fn new_label(&mut self) -> String {
        self.stack.new_label()
    }

    /// Lower a nested event list through the compile events callback.
    pub fn compile_events(&mut self, events: &[ScriptEvent]) -> Result<(), CompilerError> {
        if events.is_empty() {
            return Ok(());
        }
        let compile = self
            .compile_events
            .clone()
            .ok_or(CompilerError::NoEventCompiler)?;
        compile(self, events)
    }

    pub(crate) fn lower_branch(&mut self, branch: Branch<'_>) -> Result<(), CompilerError> {
        match branch {
            Branch::Events(events) => self.compile_events(events),
            Branch::Block(block) => block(self),
            Branch::Empty => Ok(()),
        }
    }
}
