mod config;
mod coordinator;
mod error;
mod executor;
mod history;
mod loader;
mod matcher;
mod metadata;
mod model;
mod modules;
mod picker;
mod registry;
mod session;
mod state;
mod ui;
mod watcher;
mod workspace;

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crate::config::load_config;
use crate::loader::CommandLoader;
use crate::modules::node::NodeModuleLoader;
use crate::registry::CommandTable;
use crate::session::Inbox;
use crate::state::{AppState, Surfaces};
use crate::ui::clipboard::SystemClipboard;
use crate::ui::editor::SelectionEditor;
use crate::ui::terminal::TerminalUi;
use crate::watcher::DefinitionsWatcher;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workspace root holding .vscode/custom-commander.js
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Selected text handed to commands
    #[arg(short, long, conflicts_with = "selection_file")]
    selection: Option<String>,

    /// File whose contents act as the selection; replacements rewrite it
    #[arg(long)]
    selection_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List registered custom commands in order
    List,
    /// Run a command by id or export name
    Run { id: String },
    /// Choose a command from the picker
    Pick,
    /// Create the definitions file from the template
    Init,
    /// Watch the definitions file and read commands from stdin
    Session,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let config = load_config(args.config.as_deref())?;

    let workspace = match args.workspace {
        Some(dir) => Some(dir),
        None => std::env::current_dir().ok(),
    };
    let workspace = workspace.and_then(|dir| dir.canonicalize().ok());

    // 2. Host surfaces
    let (inbox, tx_events) = Inbox::from_stdin();
    let inbox = Rc::new(RefCell::new(inbox));

    let editor = match (args.selection, args.selection_file) {
        (Some(text), _) => SelectionEditor::Text(text),
        (None, Some(path)) => SelectionEditor::File(path),
        (None, None) => SelectionEditor::None,
    };
    let surfaces = Surfaces {
        ui: Box::new(TerminalUi::new(inbox.clone(), config.general.editor.clone())),
        editor: Box::new(editor),
        clipboard: Box::new(SystemClipboard::new()),
    };

    // 3. Activate
    let loader = CommandLoader::new(Box::new(NodeModuleLoader::new(config.general.node.clone())));
    let mut state = AppState::new(config, workspace, loader, Box::new(CommandTable::new()), surfaces);
    state.activate();

    // 4. Dispatch
    match args.command.unwrap_or(Cmd::Session) {
        Cmd::List => print!("{}", state.describe_commands()),
        Cmd::Run { id } => state.invoke(&model::resolve_id(&id)),
        Cmd::Pick => state.pick(),
        Cmd::Init => state.create_commands_file(),
        Cmd::Session => {
            let watcher = match (&state.workspace, state.definitions_path()) {
                (Some(root), Some(target)) => match DefinitionsWatcher::start(root, target, tx_events) {
                    Ok(watcher) => Some(watcher),
                    Err(e) => {
                        log::warn!("File watching disabled: {:#}", e);
                        None
                    }
                },
                _ => None,
            };
            session::run(&mut state, inbox, watcher);
        }
    }

    state.deactivate();
    Ok(())
}
