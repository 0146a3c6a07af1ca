use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommanderError {
    #[error("No workspace folder is open")]
    NoWorkspace,

    #[error("Failed to write {}: {message}", path.display())]
    FileWriteFailure { path: PathBuf, message: String },

    #[error("Failed to load custom commands: {0}")]
    ModuleLoadFailure(String),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command '{name}' failed: {message}")]
    CallableFailure { name: String, message: String },

    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),
}
