// Scene snapshot and symbol resolution
//
// Actor operands: slot 0 is always the player, scene actors follow starting
// at slot 1 in scene order.

use crate::script_compiler::error::CompilerError;
use indexmap::IndexMap;
use serde::Deserialize;

/// Actor reference that always resolves to the player slot.
pub const PLAYER: &str = "player";

/// Actor reference that resolves to the actor owning the script.
pub const SELF_REF: &str = "$self$";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActorDescriptor {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriggerDescriptor {
    pub id: String,
}

/// Read-only view of one scene, shared by every script compiled from it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SceneSnapshot {
    pub id: String,
    #[serde(default)]
    pub actors: Vec<ActorDescriptor>,
    #[serde(default)]
    pub triggers: Vec<TriggerDescriptor>,
    /// Declared variable ids; when absent any well-formed id is accepted.
    #[serde(default)]
    pub variables: Option<Vec<String>>,
}

impl SceneSnapshot {
    pub fn new(id: &str) -> Self {
        SceneSnapshot {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_actors(mut self, ids: &[&str]) -> Self {
        self.actors = ids
            .iter()
            .map(|id| ActorDescriptor { id: id.to_string() })
            .collect();
        self
    }

    pub fn with_triggers(mut self, ids: &[&str]) -> Self {
        self.triggers = ids
            .iter()
            .map(|id| TriggerDescriptor { id: id.to_string() })
            .collect();
        self
    }

    pub fn with_variables(mut self, ids: &[&str]) -> Self {
        self.variables = Some(ids.iter().map(|id| id.to_string()).collect());
        self
    }
}

/// The actor owning the script being compiled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityContext {
    pub id: String,
}

/// Resolves symbolic references for one script.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    scene: SceneSnapshot,
    entity: Option<EntityContext>,
    actor_slots: IndexMap<String, usize>,
}

impl ScriptContext {
    pub fn new(scene: SceneSnapshot, entity: Option<EntityContext>) -> Self {
        let actor_slots = scene
            .actors
            .iter()
            .enumerate()
            .map(|(i, actor)| (actor.id.clone(), i + 1))
            .collect();
        ScriptContext {
            scene,
            entity,
            actor_slots,
        }
    }

    pub fn scene(&self) -> &SceneSnapshot {
        &self.scene
    }

    pub fn resolve_actor(&self, actor: &str) -> Result<usize, CompilerError> {
        if actor == PLAYER {
            return Ok(0);
        }
        let id = if actor == SELF_REF {
            self.resolve_self()?
        } else {
            actor
        };
        if id == PLAYER {
            return Ok(0);
        }
        self.actor_slots
            .get(id)
            .copied()
            .ok_or_else(|| CompilerError::UnknownActor(id.to_string()))
    }

    pub fn resolve_variable(&self, variable: &str) -> Result<String, CompilerError> {
        let well_formed = !variable.is_empty()
            && variable
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        let declared = match &self.scene.variables {
            Some(declared) => declared.iter().any(|v| v == variable),
            None => true,
        };
        if !well_formed || !declared {
            return Err(CompilerError::UnknownVariable(variable.to_string()));
        }
        Ok(format!("VAR_VARIABLE_{}", variable))
    }

    pub fn resolve_self(&self) -> Result<&str, CompilerError> {
        self.entity
            .as_ref()
            .map(|entity| entity.id.as_str())
            .ok_or(CompilerError::NoActiveEntity)
    }
}
