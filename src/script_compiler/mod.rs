// Script Compiler Module
// Lowers visual event scripts into GBVM assembly text

pub mod builder;
pub mod builder_assemble;
pub mod builder_branch;
pub mod builder_commands;
pub mod builder_emit;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod input;
pub mod stack;

#[cfg(test)]
mod events_tests;

pub use builder::{Branch, CompileEventsFn, ScriptBuilder};
pub use builder_branch::Comparison;
pub use builder_commands::MoveType;
pub use config::{CompilerConfig, LocalActorMode, ScriptOptions};
pub use context::{EntityContext, SceneSnapshot, ScriptContext};
pub use error::CompilerError;
pub use events::ScriptEvent;
pub use input::{ScriptDocument, ScriptSource};

use log::info;

/// One assembled script
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScript {
    pub name: String,
    pub text: String,
}

/// Compiles whole event trees with the built-in event compiler.
pub struct ScriptCompiler {
    config: CompilerConfig,
}

impl Default for ScriptCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl ScriptCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        ScriptCompiler { config }
    }

    /// Compile one script. Each call gets its own builder, so labels and
    /// stack state never leak between scripts.
    pub fn compile_script(
        &self,
        context: ScriptContext,
        script: &ScriptSource,
    ) -> Result<CompiledScript, CompilerError> {
        info!(
            "compiling script {} ({} top-level events)",
            script.name,
            script.events.len()
        );
        let mut builder = ScriptBuilder::with_options(context, self.config.script_options())
            .with_event_compiler(events::default_event_compiler());
        builder.compile_events(&script.events)?;
        let text = builder.to_script_string(&script.name, script.export)?;
        Ok(CompiledScript {
            name: script.name.clone(),
            text,
        })
    }

    /// Compile every script of a document, stopping at the first error.
    pub fn compile_document(
        &self,
        document: &ScriptDocument,
    ) -> Result<Vec<CompiledScript>, CompilerError> {
        document.check_script_names()?;
        document
            .scripts
            .iter()
            .map(|script| self.compile_script(document.context(), script))
            .collect()
    }
}
