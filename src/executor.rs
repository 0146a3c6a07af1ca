use crate::error::CommanderError;
use crate::model::ActionResult;
use crate::state::AppState;
use log::{debug, info};

pub fn execute(state: &mut AppState, id: &str) -> Result<(), CommanderError> {
    let entry = state
        .entry(id)
        .cloned()
        .ok_or_else(|| CommanderError::CommandNotFound(id.to_string()))?;

    // Record usage first; a failing command still counts as used
    state.touch(&entry.id);

    let selection = state.editor.selection();
    info!("Executor: running '{}'", entry.id);

    let result = entry
        .callable
        .call(selection.as_deref())
        .map_err(|e| CommanderError::CallableFailure {
            name: entry.name.clone(),
            message: format!("{:#}", e),
        })?;

    match result {
        Some(result) => apply(state, &result),
        None => {
            debug!("Executor: '{}' returned nothing", entry.id);
            Ok(())
        }
    }
}

/// Popup, then replace, then clipboard.
fn apply(state: &mut AppState, result: &ActionResult) -> Result<(), CommanderError> {
    if let Some(popup) = &result.popup {
        state.ui.info(popup);
    }

    if let Some(replace) = &result.replace {
        if !state.editor.replace_selection(replace) {
            debug!("Executor: no editable selection, skipping replace");
        }
    }

    if let Some(text) = &result.clipboard {
        state
            .clipboard
            .write_text(text)
            .map_err(|e| CommanderError::Clipboard(format!("{:#}", e)))?;
        let preview = truncate(text, state.config.general.clipboard_preview);
        state.ui.info(&format!("Copied to clipboard: {}", preview));
    }

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
