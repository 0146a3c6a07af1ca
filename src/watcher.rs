use crate::session::Event;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use notify::event::{ModifyKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    Created,
    Changed,
    Deleted,
}

/// Watches the definitions file. The parent directory is watched rather than
/// the file so creation after deletion is seen; until the parent exists the
/// workspace root is watched instead.
pub struct DefinitionsWatcher {
    watcher: RecommendedWatcher,
    root: PathBuf,
    target: PathBuf,
    watched: PathBuf,
}

impl DefinitionsWatcher {
    pub fn start(workspace: &Path, target: PathBuf, tx: Sender<Event>) -> Result<Self> {
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    let _ = tx.send(Event::File(event));
                }
                Err(e) => warn!("DefinitionsWatcher: {}", e),
            },
            notify::Config::default(),
        )
        .context("cannot create file watcher")?;

        let parent = target.parent().map(Path::to_path_buf).unwrap_or_else(|| workspace.to_path_buf());
        let watched = if parent.is_dir() { parent } else { workspace.to_path_buf() };

        let mut this = Self {
            watcher,
            root: workspace.to_path_buf(),
            target,
            watched: PathBuf::new(),
        };
        this.watch(watched)?;
        Ok(this)
    }

    fn watch(&mut self, dir: PathBuf) -> Result<()> {
        if !self.watched.as_os_str().is_empty() {
            if let Err(e) = self.watcher.unwatch(&self.watched) {
                debug!("DefinitionsWatcher: unwatch {:?}: {}", self.watched, e);
            }
        }
        self.watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("cannot watch {}", dir.display()))?;
        info!("DefinitionsWatcher: watching {:?}", dir);
        self.watched = dir;
        Ok(())
    }

    /// Keeps the watch on the definitions directory while it exists and on the
    /// workspace root otherwise. A file that was written before the watch moved
    /// into the new directory is reported as created.
    pub fn follow(&mut self) -> Option<FileChange> {
        let parent = self.target.parent().map(Path::to_path_buf)?;

        if self.watched == parent {
            if !parent.is_dir() {
                debug!("DefinitionsWatcher: {:?} is gone", parent);
                let root = self.root.clone();
                if let Err(e) = self.watch(root) {
                    warn!("DefinitionsWatcher: {:#}", e);
                }
            }
            return None;
        }

        if !parent.is_dir() {
            return None;
        }
        if let Err(e) = self.watch(parent) {
            warn!("DefinitionsWatcher: {:#}", e);
            return None;
        }
        if self.target.exists() {
            debug!("DefinitionsWatcher: {:?} appeared with its directory", self.target);
            return Some(FileChange::Created);
        }
        None
    }

    pub fn classify(&self, event: &notify::Event) -> Option<FileChange> {
        classify(event, &self.target)
    }

    /// What one raw event means for the definitions file.
    pub fn observe(&mut self, event: &notify::Event) -> Option<FileChange> {
        self.follow().or_else(|| self.classify(event))
    }
}

pub fn classify(event: &notify::Event, target: &Path) -> Option<FileChange> {
    if !event.paths.iter().any(|p| p == target) {
        return None;
    }

    let change = match event.kind {
        EventKind::Create(_) => FileChange::Created,
        EventKind::Remove(_) => FileChange::Deleted,
        // Editors often save through a rename; the file's presence decides.
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => FileChange::Deleted,
            RenameMode::To => FileChange::Created,
            _ if target.exists() => FileChange::Changed,
            _ => FileChange::Deleted,
        },
        EventKind::Modify(_) => FileChange::Changed,
        EventKind::Any | EventKind::Other if target.exists() => FileChange::Changed,
        _ => return None,
    };

    debug!("DefinitionsWatcher: {:?} -> {:?}", event.kind, change);
    Some(change)
}
