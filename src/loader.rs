use crate::error::CommanderError;
use crate::metadata;
use crate::model::{self, CommandEntry};
use crate::modules::{ExportValue, ModuleLoader};
use log::{debug, info};
use std::path::Path;

pub struct CommandLoader {
    modules: Box<dyn ModuleLoader>,
}

impl CommandLoader {
    pub fn new(modules: Box<dyn ModuleLoader>) -> Self {
        Self { modules }
    }

    /// Rebuilds the whole command set from the definitions file.
    pub fn load(&mut self, path: &Path) -> Result<Vec<CommandEntry>, CommanderError> {
        if !path.is_file() {
            debug!("CommandLoader: {:?} does not exist, no commands", path);
            return Ok(Vec::new());
        }

        self.modules.invalidate(path);
        let exports = self
            .modules
            .load(path)
            .map_err(|e| CommanderError::ModuleLoadFailure(format!("{:#}", e)))?;

        let entries: Vec<CommandEntry> = exports
            .into_iter()
            .filter_map(|export| match export.value {
                ExportValue::Callable(callable) => {
                    let meta = metadata::extract(&export.name, callable.source());
                    Some(CommandEntry {
                        id: model::custom_id(&export.name),
                        export: export.name,
                        name: meta.name,
                        description: meta.description,
                        callable,
                    })
                }
                ExportValue::Value => None,
            })
            .collect();

        info!("CommandLoader: loaded {} command(s) from {:?}", entries.len(), path);
        Ok(entries)
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.modules.invalidate(path);
    }
}
