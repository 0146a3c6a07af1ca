use crate::coordinator;
use crate::state::AppState;
use crate::watcher::DefinitionsWatcher;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub enum Event {
    Line(String),
    File(notify::Event),
    Closed,
}

/// Single queue for input lines and file-system events.
pub struct Inbox {
    rx: Receiver<Event>,
    deferred: VecDeque<notify::Event>,
    closed: bool,
}

impl Inbox {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self {
            rx,
            deferred: VecDeque::new(),
            closed: false,
        }
    }

    /// Inbox fed by a thread reading stdin line by line.
    pub fn from_stdin() -> (Self, Sender<Event>) {
        let (tx, rx) = mpsc::channel();
        let tx_lines = tx.clone();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx_lines.send(Event::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx_lines.send(Event::Closed);
        });
        (Self::new(rx), tx)
    }

    /// Blocks for the next input line. File events seen meanwhile are kept
    /// for `next_event`.
    pub fn next_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        loop {
            match self.rx.recv() {
                Ok(Event::Line(line)) => return Some(line),
                Ok(Event::File(event)) => self.deferred.push_back(event),
                Ok(Event::Closed) | Err(_) => {
                    self.closed = true;
                    return None;
                }
            }
        }
    }

    pub fn next_event(&mut self) -> Option<Event> {
        if let Some(event) = self.deferred.pop_front() {
            return Some(Event::File(event));
        }
        if self.closed {
            return None;
        }
        match self.rx.recv() {
            Ok(Event::Closed) | Err(_) => {
                self.closed = true;
                None
            }
            Ok(event) => Some(event),
        }
    }
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ReplCommand {
    /// List registered commands
    List,
    /// Open the command picker
    Pick,
    /// Run a command by id or export name
    Run { id: String },
    /// Reload the definitions file
    Reload,
    /// Create the definitions file from the template
    Init,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

fn parse_line(line: &str) -> Result<ReplCommand, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
}

/// Serves commands from the inbox until input ends or `quit`.
pub fn run(state: &mut AppState, inbox: Rc<RefCell<Inbox>>, mut watcher: Option<DefinitionsWatcher>) {
    info!("Session: started");
    eprintln!("Commands: list, pick, run <id>, reload, init, quit");

    loop {
        let event = inbox.borrow_mut().next_event();
        let Some(event) = event else { break };

        match event {
            Event::File(event) => {
                if let Some(watcher) = watcher.as_mut() {
                    if let Some(change) = watcher.observe(&event) {
                        coordinator::handle(state, change);
                    }
                }
            }
            Event::Line(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(&line) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => dispatch(state, command),
                    Err(e) => {
                        debug!("Session: bad input '{}': {}", line, e);
                        eprintln!("Unknown command '{}'", line.trim());
                    }
                }
            }
            Event::Closed => break,
        }
    }

    if watcher.is_none() {
        warn!("Session: ran without a file watcher");
    }
    info!("Session: ended");
}

fn dispatch(state: &mut AppState, command: ReplCommand) {
    match command {
        ReplCommand::List => print!("{}", state.describe_commands()),
        ReplCommand::Pick => state.pick(),
        ReplCommand::Run { id } => state.invoke(&crate::model::resolve_id(&id)),
        ReplCommand::Reload => state.reload(false),
        ReplCommand::Init => state.create_commands_file(),
        ReplCommand::Quit => {}
    }
}
