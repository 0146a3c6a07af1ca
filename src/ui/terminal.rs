use crate::matcher::FuzzyMatcher;
use crate::session::Inbox;
use crate::ui::render::{render_choices, render_items};
use crate::ui::{PickItem, Ui};
use log::{debug, warn};
use std::cell::RefCell;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use std::rc::Rc;

/// Messages on stderr, prompts answered line by line from the inbox.
pub struct TerminalUi {
    input: Rc<RefCell<Inbox>>,
    matcher: FuzzyMatcher,
    editor: Option<String>,
}

impl TerminalUi {
    pub fn new(input: Rc<RefCell<Inbox>>, editor: Option<String>) -> Self {
        Self {
            input,
            matcher: FuzzyMatcher::new(),
            editor,
        }
    }

    fn prompt(&self, text: &str) -> Option<String> {
        eprint!("{}", text);
        let _ = io::stderr().flush();
        self.input.borrow_mut().next_line()
    }
}

impl Ui for TerminalUi {
    fn info(&mut self, message: &str) {
        eprintln!("info: {}", message);
    }

    fn warn(&mut self, message: &str) {
        eprintln!("warning: {}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn status(&mut self, message: &str) {
        eprintln!("[{}]", message);
    }

    fn ask(&mut self, message: &str, choices: &[&str]) -> Option<String> {
        eprint!("{}", render_choices(message, choices));
        let answer = self.prompt("> ")?;
        let answer = answer.trim();
        if let Ok(n) = answer.parse::<usize>() {
            return choices.get(n.checked_sub(1)?).map(|c| c.to_string());
        }
        choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(answer))
            .map(|c| c.to_string())
    }

    fn pick(&mut self, items: &[PickItem], placeholder: &str) -> Option<usize> {
        let all: Vec<usize> = (0..items.len()).collect();
        let mut visible = all.clone();

        loop {
            eprint!("{}", render_items(items, &visible));
            let line = self.prompt(&format!("{} > ", placeholder))?;
            let query = line.trim();

            if query.is_empty() {
                return None;
            }
            if let Ok(n) = query.parse::<usize>() {
                if (1..=visible.len()).contains(&n) {
                    return Some(visible[n - 1]);
                }
            }

            visible = self.matcher.filter(query, items);
            debug!("TerminalUi: query='{}', matches={}", query, visible.len());
            if visible.is_empty() {
                eprintln!("No matches for '{}'", query);
                visible = all.clone();
            }
        }
    }

    fn open_document(&mut self, path: &Path) {
        let editor = self.editor.clone().or_else(|| env::var("EDITOR").ok());
        let Some(editor) = editor.filter(|e| !e.trim().is_empty()) else {
            eprintln!("Open {} in your editor", path.display());
            return;
        };

        let mut parts = editor.split_whitespace();
        let Some(program) = parts.next() else { return };
        let status = Command::new(program).args(parts).arg(path).status();
        if let Err(e) = status {
            warn!("TerminalUi: cannot start editor '{}': {}", editor, e);
            eprintln!("Open {} in your editor", path.display());
        }
    }
}
