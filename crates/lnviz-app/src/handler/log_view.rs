//! Log view operation handlers
//!
//! Search, row expansion, export and clipboard copy. None of these touch the
//! backend.

use std::path::PathBuf;

use tracing::{info, warn};

use lnviz_core::export_json;

use crate::state::{AppState, NoticeLevel, UiMode};

use super::{UpdateAction, UpdateResult};

pub fn handle_start_search(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::SearchInput;
    UpdateResult::none()
}

/// Live filter update while typing
pub fn handle_search_input(state: &mut AppState, text: String) -> UpdateResult {
    state.log_view.set_search_query(text);
    UpdateResult::none()
}

pub fn handle_submit_search(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

pub fn handle_clear_search(state: &mut AppState) -> UpdateResult {
    state.log_view.set_search_query(String::new());
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

/// Expand or collapse the row under the cursor
pub fn handle_toggle_expand(state: &mut AppState) -> UpdateResult {
    if let Some(index) = state.cursor_history_index() {
        state.log_view.toggle_expanded(index);
    }
    UpdateResult::none()
}

/// Export the full, unfiltered history
pub fn handle_export(state: &mut AppState) -> UpdateResult {
    UpdateResult::action(UpdateAction::ExportHistory {
        dir: state.settings.log.export_dir.clone(),
        events: state.history.clone(),
    })
}

pub fn handle_export_finished(state: &mut AppState, result: Result<PathBuf, String>) -> UpdateResult {
    match result {
        Ok(path) => state.notify(
            format!("Exported to {}", path.display()),
            NoticeLevel::Info,
        ),
        Err(e) => {
            warn!("Export failed: {}", e);
            state.notify(format!("Export failed: {e}"), NoticeLevel::Error);
        }
    }
    UpdateResult::none()
}

/// Queue the history JSON for the clipboard; the TUI emits it on the next frame
pub fn handle_copy(state: &mut AppState) -> UpdateResult {
    match export_json(&state.history) {
        Ok(text) => {
            info!("Copying {} messages to clipboard", state.history.len());
            state.clipboard_request = Some(text);
            state.notify("Messages copied to clipboard!", NoticeLevel::Info);
        }
        Err(e) => {
            warn!("Failed to serialize history: {}", e);
            state.notify("Failed to copy messages", NoticeLevel::Error);
        }
    }
    UpdateResult::none()
}
