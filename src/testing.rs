//! In-memory stand-ins for the host surfaces and the module loader.

use crate::config::Config;
use crate::loader::CommandLoader;
use crate::model::{self, ActionResult, Callable, CommandEntry};
use crate::modules::{Export, ExportValue, ModuleLoader};
use crate::registry::CommandTable;
use crate::state::{AppState, Surfaces};
use crate::ui::{Clipboard, Editor, PickItem, Ui};
use anyhow::{anyhow, bail, Result};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

type CallFn = dyn Fn(Option<&str>) -> Result<Option<ActionResult>>;

pub struct FnCallable {
    source: String,
    f: Box<CallFn>,
}

impl Callable for FnCallable {
    fn source(&self) -> &str {
        &self.source
    }

    fn call(&self, selection: Option<&str>) -> Result<Option<ActionResult>> {
        (self.f)(selection)
    }
}

pub fn fn_export<F>(name: &str, source: &str, f: F) -> Export
where
    F: Fn(Option<&str>) -> Result<Option<ActionResult>> + 'static,
{
    Export {
        name: name.to_string(),
        value: ExportValue::Callable(Arc::new(FnCallable {
            source: source.to_string(),
            f: Box::new(f),
        })),
    }
}

pub fn value_export(name: &str) -> Export {
    Export {
        name: name.to_string(),
        value: ExportValue::Value,
    }
}

pub fn entry(export: &str) -> CommandEntry {
    let Export { name, value } = fn_export(export, "", |_| Ok(None));
    let ExportValue::Callable(callable) = value else { unreachable!() };
    CommandEntry {
        id: model::custom_id(&name),
        export: name.clone(),
        name: name.clone(),
        description: format!("Execute {} function", name),
        callable,
    }
}

#[derive(Debug, Default)]
pub struct ModuleCalls {
    pub loads: usize,
    pub invalidations: usize,
}

/// Module contents keyed by path; unknown paths load as empty modules.
#[derive(Clone, Default)]
pub struct StaticModules {
    modules: Rc<RefCell<HashMap<PathBuf, Result<Vec<Export>, String>>>>,
    calls: Rc<RefCell<ModuleCalls>>,
}

impl StaticModules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &Path, exports: Vec<Export>) -> Self {
        self.set(path, exports);
        self
    }

    pub fn failing(self, path: &Path, message: &str) -> Self {
        self.modules.borrow_mut().insert(path.to_path_buf(), Err(message.to_string()));
        self
    }

    pub fn set(&self, path: &Path, exports: Vec<Export>) {
        self.modules.borrow_mut().insert(path.to_path_buf(), Ok(exports));
    }

    pub fn calls(&self) -> Rc<RefCell<ModuleCalls>> {
        self.calls.clone()
    }
}

impl ModuleLoader for StaticModules {
    fn load(&mut self, path: &Path) -> Result<Vec<Export>> {
        self.calls.borrow_mut().loads += 1;
        match self.modules.borrow().get(path) {
            Some(Ok(exports)) => Ok(exports.clone()),
            Some(Err(message)) => bail!("{}", message),
            None => Ok(Vec::new()),
        }
    }

    fn invalidate(&mut self, _path: &Path) {
        self.calls.borrow_mut().invalidations += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warn(String),
    Error(String),
    Status(String),
}

#[derive(Default)]
struct UiLog {
    notices: Vec<Notice>,
    picks: Vec<Vec<PickItem>>,
    choices: VecDeque<Option<usize>>,
    answers: VecDeque<Option<String>>,
    opened: Vec<PathBuf>,
}

/// Records everything shown; prompts answer from scripted queues and
/// dismiss once those run dry.
#[derive(Clone, Default)]
pub struct RecordingUi {
    log: Rc<RefCell<UiLog>>,
}

impl RecordingUi {
    pub fn notices(&self) -> Vec<Notice> {
        self.log.borrow().notices.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.log
            .borrow()
            .notices
            .iter()
            .filter_map(|n| match n {
                Notice::Error(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn picks(&self) -> Vec<Vec<PickItem>> {
        self.log.borrow().picks.clone()
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.log.borrow().opened.clone()
    }

    pub fn choose(&self, choice: Option<usize>) {
        self.log.borrow_mut().choices.push_back(choice);
    }

    pub fn answer(&self, answer: Option<&str>) {
        self.log.borrow_mut().answers.push_back(answer.map(str::to_string));
    }

    pub fn clear(&self) {
        let mut log = self.log.borrow_mut();
        log.notices.clear();
        log.picks.clear();
    }
}

impl Ui for RecordingUi {
    fn info(&mut self, message: &str) {
        self.log.borrow_mut().notices.push(Notice::Info(message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.log.borrow_mut().notices.push(Notice::Warn(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.log.borrow_mut().notices.push(Notice::Error(message.to_string()));
    }

    fn status(&mut self, message: &str) {
        self.log.borrow_mut().notices.push(Notice::Status(message.to_string()));
    }

    fn ask(&mut self, _message: &str, _choices: &[&str]) -> Option<String> {
        self.log.borrow_mut().answers.pop_front().flatten()
    }

    fn pick(&mut self, items: &[PickItem], _placeholder: &str) -> Option<usize> {
        let mut log = self.log.borrow_mut();
        log.picks.push(items.to_vec());
        log.choices.pop_front().flatten()
    }

    fn open_document(&mut self, path: &Path) {
        self.log.borrow_mut().opened.push(path.to_path_buf());
    }
}

#[derive(Default)]
struct EditorState {
    selection: Option<String>,
    replacements: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeEditor {
    state: Rc<RefCell<EditorState>>,
}

impl FakeEditor {
    pub fn select(&self, text: &str) {
        self.state.borrow_mut().selection = Some(text.to_string());
    }

    pub fn replacements(&self) -> Vec<String> {
        self.state.borrow().replacements.clone()
    }
}

impl Editor for FakeEditor {
    fn selection(&self) -> Option<String> {
        self.state.borrow().selection.clone()
    }

    fn replace_selection(&mut self, text: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if state.selection.is_none() {
            return false;
        }
        state.selection = Some(text.to_string());
        state.replacements.push(text.to_string());
        true
    }
}

#[derive(Clone, Default)]
pub struct FakeClipboard {
    contents: Rc<RefCell<Vec<String>>>,
    broken: Rc<RefCell<bool>>,
}

impl FakeClipboard {
    pub fn contents(&self) -> Vec<String> {
        self.contents.borrow().clone()
    }

    pub fn fail(&self) {
        *self.broken.borrow_mut() = true;
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if *self.broken.borrow() {
            return Err(anyhow!("no display"));
        }
        self.contents.borrow_mut().push(text.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub state: AppState,
    pub modules: StaticModules,
    pub ui: RecordingUi,
    pub editor: FakeEditor,
    pub clipboard: FakeClipboard,
    _workspace: tempfile::TempDir,
}

impl Harness {
    pub fn define(&self, exports: Vec<Export>) {
        if let Some(path) = self.state.definitions_path() {
            self.modules.set(&path, exports);
        }
    }

    pub fn define_failure(&self, message: &str) {
        if let Some(path) = self.state.definitions_path() {
            self.modules
                .modules
                .borrow_mut()
                .insert(path, Err(message.to_string()));
        }
    }
}

/// A workspace whose definitions file exists, backed by `StaticModules`.
pub fn harness() -> Harness {
    let workspace = tempfile::tempdir().expect("tempdir");
    let path = crate::workspace::definitions_path(workspace.path());
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "module.exports = {}").expect("write definitions");

    let modules = StaticModules::new();
    let ui = RecordingUi::default();
    let editor = FakeEditor::default();
    let clipboard = FakeClipboard::default();

    let state = AppState::new(
        Config::default(),
        Some(workspace.path().to_path_buf()),
        CommandLoader::new(Box::new(modules.clone())),
        Box::new(CommandTable::new()),
        Surfaces {
            ui: Box::new(ui.clone()),
            editor: Box::new(editor.clone()),
            clipboard: Box::new(clipboard.clone()),
        },
    );

    Harness {
        state,
        modules,
        ui,
        editor,
        clipboard,
        _workspace: workspace,
    }
}
