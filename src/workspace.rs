use crate::error::CommanderError;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFINITIONS_DIR: &str = ".vscode";
pub const DEFINITIONS_FILE: &str = "custom-commander.js";

pub const TEMPLATE: &str = include_str!("../assets/custom-commander.js");

pub fn definitions_path(workspace: &Path) -> PathBuf {
    workspace.join(DEFINITIONS_DIR).join(DEFINITIONS_FILE)
}

/// Copies the starter template to `path`, creating the parent directory.
pub fn write_template(path: &Path) -> Result<(), CommanderError> {
    let failure = |e: std::io::Error| CommanderError::FileWriteFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(failure)?;
    }
    fs::write(path, TEMPLATE).map_err(failure)
}
