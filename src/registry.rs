use crate::history::RecencyList;
use crate::model::{CommandEntry, PICK_CUSTOM_COMMAND};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    CreateCommandsFile,
    ReloadCommands,
    PickCustomCommand,
}

/// What a registered id runs when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    Builtin(Builtin),
    Custom(String),
}

/// Host side of command registration.
pub trait CommandHost {
    fn register(&mut self, id: &str, handler: Handler) -> Registration;
    fn unregister(&mut self, id: &str);
    fn handler(&self, id: &str) -> Option<Handler>;
    fn ids(&self) -> Vec<String>;
}

/// Handle for one registered id.
#[derive(Debug)]
pub struct Registration {
    id: String,
    disposed: bool,
}

impl Registration {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string(), disposed: false }
    }

    /// Safe to call more than once.
    pub fn dispose(&mut self, host: &mut dyn CommandHost) {
        if self.disposed {
            return;
        }
        host.unregister(&self.id);
        self.disposed = true;
    }
}

/// In-process command table, kept in registration order.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<(String, Handler)>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandHost for CommandTable {
    fn register(&mut self, id: &str, handler: Handler) -> Registration {
        self.commands.retain(|(existing, _)| existing != id);
        self.commands.push((id.to_string(), handler));
        Registration::new(id)
    }

    fn unregister(&mut self, id: &str) {
        self.commands.retain(|(existing, _)| existing != id);
    }

    fn handler(&self, id: &str) -> Option<Handler> {
        self.commands.iter().find(|(existing, _)| existing == id).map(|(_, h)| h.clone())
    }

    fn ids(&self) -> Vec<String> {
        self.commands.iter().map(|(id, _)| id.clone()).collect()
    }
}

/// Ids in recency order first, then the rest in their original order.
pub fn order_ids(entries: &[CommandEntry], recency: &RecencyList) -> Vec<String> {
    let mut recent: Vec<(usize, &str)> = Vec::new();
    let mut rest: Vec<&str> = Vec::new();

    for entry in entries {
        match recency.index_of(&entry.id) {
            Some(pos) => recent.push((pos, entry.id.as_str())),
            None => rest.push(entry.id.as_str()),
        }
    }
    recent.sort_by_key(|(pos, _)| *pos);

    recent
        .into_iter()
        .map(|(_, id)| id)
        .chain(rest)
        .map(str::to_string)
        .collect()
}

/// Live registrations for the custom commands plus the picker.
#[derive(Debug, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, host: &mut dyn CommandHost, entries: &[CommandEntry], recency: &RecencyList) {
        // 1. Drop everything from the previous round
        self.dispose(host);

        // 2. Recency first, the rest in load order
        self.order = order_ids(entries, recency);

        // 3. One registration per command
        for id in &self.order {
            self.registrations.push(host.register(id, Handler::Custom(id.clone())));
        }

        // 4. The picker is always present
        self.registrations
            .push(host.register(PICK_CUSTOM_COMMAND, Handler::Builtin(Builtin::PickCustomCommand)));

        info!("Registry: registered {} command(s) plus picker", self.order.len());
    }

    pub fn dispose(&mut self, host: &mut dyn CommandHost) {
        for registration in self.registrations.iter_mut() {
            registration.dispose(host);
        }
        debug!("Registry: disposed {} registration(s)", self.registrations.len());
        self.registrations.clear();
        self.order.clear();
    }

    /// Custom command ids in registration order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }
}
