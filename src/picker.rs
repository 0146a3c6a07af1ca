use crate::config::PickerConfig;
use crate::history::RecencyList;
use crate::model::CommandEntry;
use crate::state::AppState;
use crate::ui::PickItem;
use log::debug;

pub const CREATE_LABEL: &str = "Create custom commands file";
pub const CREATE_DETAIL: &str = "Creates .vscode/custom-commander.js from a template";

pub fn items(entries: &[&CommandEntry], history: &RecencyList, config: &PickerConfig) -> Vec<PickItem> {
    entries
        .iter()
        .map(|entry| PickItem {
            label: entry.name.clone(),
            description: history.contains(&entry.id).then(|| config.recent_label.clone()),
            detail: Some(entry.description.clone()),
        })
        .collect()
}

fn create_item() -> PickItem {
    PickItem {
        detail: Some(CREATE_DETAIL.to_string()),
        ..PickItem::new(CREATE_LABEL)
    }
}

pub fn pick(state: &mut AppState) {
    let placeholder = state.config.picker.placeholder.clone();

    if state.entries.is_empty() {
        let choice = state.ui.pick(&[create_item()], &placeholder);
        if choice.is_some() {
            state.create_commands_file();
        }
        return;
    }

    let (ids, items): (Vec<String>, Vec<PickItem>) = {
        let ordered = state.ordered_entries();
        let ids: Vec<String> = ordered.iter().map(|e| e.id.clone()).collect();
        (ids, items(&ordered, &state.history, &state.config.picker))
    };

    let Some(index) = state.ui.pick(&items, &placeholder) else {
        debug!("Picker: dismissed");
        return;
    };
    if let Some(id) = ids.get(index) {
        state.invoke(id);
    }
}
