use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

impl PickItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            detail: None,
        }
    }
}

/// Notifications, prompts and the quick-pick list.
pub trait Ui {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);

    /// Transient message, e.g. a status bar entry.
    fn status(&mut self, message: &str);

    /// Message with choice buttons. `None` when dismissed.
    fn ask(&mut self, message: &str, choices: &[&str]) -> Option<String>;

    /// Index of the chosen item, `None` when dismissed.
    fn pick(&mut self, items: &[PickItem], placeholder: &str) -> Option<usize>;

    fn open_document(&mut self, path: &Path);
}

pub trait Editor {
    fn selection(&self) -> Option<String>;

    /// Returns false when there is no editable selection.
    fn replace_selection(&mut self, text: &str) -> bool;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub mod clipboard;
pub mod editor;
pub mod render;
pub mod terminal;
