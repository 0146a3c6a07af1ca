use crate::config::Config;
use crate::error::CommanderError;
use crate::executor;
use crate::history::RecencyList;
use crate::loader::CommandLoader;
use crate::model::{CommandEntry, CREATE_COMMANDS_FILE, RELOAD_COMMANDS};
use crate::picker;
use crate::registry::{Builtin, CommandHost, Handler, Registration, Registry};
use crate::ui::{Clipboard, Editor, Ui};
use crate::workspace;
use log::{debug, info};
use std::path::PathBuf;

/// Host surfaces the commands act on.
pub struct Surfaces {
    pub ui: Box<dyn Ui>,
    pub editor: Box<dyn Editor>,
    pub clipboard: Box<dyn Clipboard>,
}

/// Everything that lives between activation and deactivation.
pub struct AppState {
    pub config: Config,
    pub workspace: Option<PathBuf>,
    pub loader: CommandLoader,
    pub entries: Vec<CommandEntry>,
    pub history: RecencyList,
    pub registry: Registry,
    pub host: Box<dyn CommandHost>,
    pub builtins: Vec<Registration>,
    pub ui: Box<dyn Ui>,
    pub editor: Box<dyn Editor>,
    pub clipboard: Box<dyn Clipboard>,
}

impl AppState {
    pub fn new(
        config: Config,
        workspace: Option<PathBuf>,
        loader: CommandLoader,
        host: Box<dyn CommandHost>,
        surfaces: Surfaces,
    ) -> Self {
        Self {
            config,
            workspace,
            loader,
            entries: Vec::new(),
            history: RecencyList::new(),
            registry: Registry::new(),
            host,
            builtins: Vec::new(),
            ui: surfaces.ui,
            editor: surfaces.editor,
            clipboard: surfaces.clipboard,
        }
    }

    pub fn definitions_path(&self) -> Option<PathBuf> {
        self.workspace.as_deref().map(workspace::definitions_path)
    }

    pub fn activate(&mut self) {
        self.builtins = vec![
            self.host.register(CREATE_COMMANDS_FILE, Handler::Builtin(Builtin::CreateCommandsFile)),
            self.host.register(RELOAD_COMMANDS, Handler::Builtin(Builtin::ReloadCommands)),
        ];
        self.reload(false);
    }

    pub fn deactivate(&mut self) {
        self.registry.dispose(self.host.as_mut());
        for registration in self.builtins.iter_mut() {
            registration.dispose(self.host.as_mut());
        }
        self.builtins.clear();
        info!("AppState: deactivated");
    }

    /// Loader + Registry. A silent reload shows no status message.
    pub fn reload(&mut self, silent: bool) {
        self.entries = match self.definitions_path() {
            Some(path) => self.loader.load(&path).unwrap_or_else(|e| {
                self.ui.error(&e.to_string());
                Vec::new()
            }),
            None => {
                if !silent {
                    self.ui.warn("No workspace folder is open; custom commands are unavailable");
                }
                Vec::new()
            }
        };
        self.resort();

        if !silent {
            self.ui.status(&format!("Loaded {} custom command(s)", self.entries.len()));
        }
    }

    /// Re-registers the current entries under the current recency order.
    pub fn resort(&mut self) {
        self.registry.register(self.host.as_mut(), &self.entries, &self.history);
    }

    /// Drops every command without reading the definitions file.
    pub fn clear(&mut self) {
        if let Some(path) = self.definitions_path() {
            self.loader.invalidate(&path);
        }
        self.entries.clear();
        self.resort();
    }

    pub fn touch(&mut self, id: &str) {
        self.history.touch(id);
        if self.config.general.reload_on_use {
            self.reload(true);
        } else {
            self.resort();
        }
    }

    pub fn entry(&self, id: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in registry order.
    pub fn ordered_entries(&self) -> Vec<&CommandEntry> {
        self.registry.order().iter().filter_map(|id| self.entry(id)).collect()
    }

    /// Runs whatever is registered under `id`.
    pub fn invoke(&mut self, id: &str) {
        debug!("AppState: invoke '{}'", id);
        let result = match self.host.handler(id) {
            Some(Handler::Builtin(Builtin::CreateCommandsFile)) => {
                self.create_commands_file();
                Ok(())
            }
            Some(Handler::Builtin(Builtin::ReloadCommands)) => {
                self.reload(false);
                Ok(())
            }
            Some(Handler::Builtin(Builtin::PickCustomCommand)) => {
                self.pick();
                Ok(())
            }
            Some(Handler::Custom(id)) => executor::execute(self, &id),
            None => Err(CommanderError::CommandNotFound(id.to_string())),
        };

        if let Err(e) = result {
            self.ui.error(&e.to_string());
        }
    }

    pub fn pick(&mut self) {
        picker::pick(self);
    }

    pub fn create_commands_file(&mut self) {
        let Some(path) = self.definitions_path() else {
            self.ui.error(&CommanderError::NoWorkspace.to_string());
            return;
        };

        if path.exists() {
            let choice = self.ui.ask("Custom commands file already exists.", &["Open"]);
            if choice.as_deref() == Some("Open") {
                self.ui.open_document(&path);
            }
            return;
        }

        if let Err(e) = workspace::write_template(&path) {
            self.ui.error(&e.to_string());
            return;
        }

        info!("AppState: created {:?}", path);
        self.ui.open_document(&path);
        self.ui.info(&format!("Created {}", path.display()));
        self.reload(false);
    }

    /// Registered custom commands, one per line, in registry order.
    pub fn describe_commands(&self) -> String {
        self.ordered_entries()
            .iter()
            .map(|e| format!("{}\t{}\t{}\n", e.id, e.name, e.description))
            .collect()
    }
}
