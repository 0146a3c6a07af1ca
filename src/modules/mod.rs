use crate::model::Callable;
use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub enum ExportValue {
    Callable(Arc<dyn Callable>),
    Value,
}

#[derive(Clone)]
pub struct Export {
    pub name: String,
    pub value: ExportValue,
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Export").field("name", &self.name).finish()
    }
}

/// Loads a module of named values from a path.
pub trait ModuleLoader {
    fn load(&mut self, path: &Path) -> Result<Vec<Export>>;
    fn invalidate(&mut self, path: &Path);
}

pub mod node;
