use crate::state::AppState;
use crate::watcher::FileChange;
use log::info;

pub fn handle(state: &mut AppState, change: FileChange) {
    info!("Coordinator: definitions file {:?}", change);
    match change {
        FileChange::Created | FileChange::Changed => state.reload(false),
        // Known empty; nothing to load.
        FileChange::Deleted => state.clear(),
    }
}
