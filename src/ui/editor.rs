use crate::ui::Editor;
use log::warn;
use std::fs;
use std::path::PathBuf;

/// Selection context for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEditor {
    /// No editable surface.
    None,
    /// Text given on the command line; replacements are printed to stdout.
    Text(String),
    /// A file standing in for the selection; replacements rewrite it.
    File(PathBuf),
}

impl Editor for SelectionEditor {
    fn selection(&self) -> Option<String> {
        match self {
            SelectionEditor::None => None,
            SelectionEditor::Text(text) => Some(text.clone()),
            SelectionEditor::File(path) => fs::read_to_string(path).ok(),
        }
    }

    fn replace_selection(&mut self, text: &str) -> bool {
        match self {
            SelectionEditor::None => false,
            SelectionEditor::Text(current) => {
                println!("{}", text);
                *current = text.to_string();
                true
            }
            SelectionEditor::File(path) => match fs::write(&*path, text) {
                Ok(()) => true,
                Err(e) => {
                    warn!("SelectionEditor: cannot write {:?}: {}", path, e);
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_surface_means_nothing_to_replace() {
        let mut editor = SelectionEditor::None;
        assert_eq!(editor.selection(), None);
        assert!(!editor.replace_selection("x"));
    }

    #[test]
    fn text_selection_is_updated_in_place() {
        let mut editor = SelectionEditor::Text("hello".to_string());
        assert_eq!(editor.selection().as_deref(), Some("hello"));
        assert!(editor.replace_selection("HELLO"));
        assert_eq!(editor.selection().as_deref(), Some("HELLO"));
    }

    #[test]
    fn file_selection_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.txt");
        fs::write(&path, "before").unwrap();

        let mut editor = SelectionEditor::File(path.clone());
        assert_eq!(editor.selection().as_deref(), Some("before"));
        assert!(editor.replace_selection("after"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "after");
    }
}
