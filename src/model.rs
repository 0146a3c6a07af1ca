use std::fmt;
use std::sync::Arc;
use anyhow::Result;
use serde::Deserialize;

pub const NAMESPACE: &str = "custom-commander";

pub const CREATE_COMMANDS_FILE: &str = "custom-commander.createCommandsFile";
pub const RELOAD_COMMANDS: &str = "custom-commander.reloadCommands";
pub const PICK_CUSTOM_COMMAND: &str = "custom-commander.pickCustomCommand";

/// Side effects requested by a user function. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub popup: Option<String>,
    #[serde(default)]
    pub replace: Option<String>,
    #[serde(default)]
    pub clipboard: Option<String>,
}

pub trait Callable {
    /// Literal source text of the function, comments included.
    fn source(&self) -> &str;

    fn call(&self, selection: Option<&str>) -> Result<Option<ActionResult>>;
}

#[allow(dead_code)]
#[derive(Clone)]
pub struct CommandEntry {
    pub id: String,            // e.g. "custom-commander.custom.getNowFromAPI"
    pub export: String,        // Exported name in the definitions file
    pub name: String,          // Display name
    pub description: String,
    pub callable: Arc<dyn Callable>,
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

pub fn custom_id(export: &str) -> String {
    format!("{}.custom.{}", NAMESPACE, export)
}

/// Accepts either a full command id or a bare export name.
pub fn resolve_id(input: &str) -> String {
    if input.starts_with(NAMESPACE) {
        input.to_string()
    } else {
        custom_id(input)
    }
}
