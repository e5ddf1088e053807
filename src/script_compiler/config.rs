// Compiler configuration
//
// Loaded from TOML; every field has a default so an empty file is valid:
//
//   [assembler]
//   includes = ["vm.i", "data/game_globals.i"]
//   bank = 255
//
//   [script]
//   local_actor = "auto"   # "auto" | "always" | "never"

use crate::script_compiler::error::CompilerError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Bank number the linker treats as "assign automatically"
pub const AUTO_BANK: u16 = 255;

/// When the module preamble reserves the local actor structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalActorMode {
    /// Only when an actor-relative operand was emitted
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    pub includes: Vec<String>,
    pub bank: u16,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        AssemblerConfig {
            includes: vec!["vm.i".to_string(), "data/game_globals.i".to_string()],
            bank: AUTO_BANK,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub local_actor: LocalActorMode,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub assembler: AssemblerConfig,
    pub script: ScriptConfig,
}

impl CompilerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, CompilerError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = fs::read_to_string(path)
            .map_err(|e| CompilerError::IOError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    pub fn script_options(&self) -> ScriptOptions {
        ScriptOptions {
            includes: self.assembler.includes.clone(),
            bank: self.assembler.bank,
            local_actor: self.script.local_actor,
        }
    }
}

/// Per-script assembly options handed to a ScriptBuilder.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptOptions {
    pub includes: Vec<String>,
    pub bank: u16,
    pub local_actor: LocalActorMode,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        CompilerConfig::default().script_options()
    }
}
