// Script documents
//
// A script document describes one scene snapshot, the actor owning the
// scripts (if any), and the event trees of one or more named scripts.

use crate::script_compiler::context::{EntityContext, SceneSnapshot, ScriptContext};
use crate::script_compiler::error::CompilerError;
use crate::script_compiler::events::ScriptEvent;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptSource {
    pub name: String,
    #[serde(default)]
    pub export: bool,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptDocument {
    pub scene: SceneSnapshot,
    #[serde(default)]
    pub entity: Option<EntityContext>,
    #[serde(default)]
    pub scripts: Vec<ScriptSource>,
}

impl ScriptDocument {
    pub fn from_toml_str(source: &str) -> Result<Self, CompilerError> {
        let document: ScriptDocument = toml::from_str(source).map_err(|e| {
            CompilerError::InvalidArgument("script document".to_string(), e.to_string())
        })?;
        document.check_script_names()?;
        Ok(document)
    }

    /// Each script becomes `<name>.s`, so names must be unique.
    pub fn check_script_names(&self) -> Result<(), CompilerError> {
        let mut seen = HashSet::new();
        for script in &self.scripts {
            if !seen.insert(script.name.as_str()) {
                return Err(CompilerError::InvalidArgument(
                    "script document".to_string(),
                    format!("duplicate script name '{}'", script.name),
                ));
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = fs::read_to_string(path)
            .map_err(|e| CompilerError::IOError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Fresh resolution context for one script of this document.
    pub fn context(&self) -> ScriptContext {
        ScriptContext::new(self.scene.clone(), self.entity.clone())
    }
}
