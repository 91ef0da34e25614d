//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::SearchInput => handle_key_search_input(state, key),
        UiMode::Compose => handle_key_compose(state, key),
        UiMode::TemplatePicker => handle_key_template_picker(key),
    }
}

/// Handle key events in normal mode
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // ─────────────────────────────────────────────────────────
        // Flow actions
        // ─────────────────────────────────────────────────────────
        InputKey::Char('c') => Some(Message::ToggleConnection),
        InputKey::Char('m') => Some(Message::OpenCompose),
        InputKey::Char('t') => Some(Message::OpenTemplatePicker),
        InputKey::Char('s') => Some(Message::SendSelectedTemplate),
        InputKey::Char('u') => Some(Message::ClearTemplateSelection),
        InputKey::Char('x') => Some(Message::RunExampleSequence),

        // ─────────────────────────────────────────────────────────
        // Log navigation
        // ─────────────────────────────────────────────────────────
        InputKey::Char('j') | InputKey::Down => Some(Message::ScrollDown),
        InputKey::Char('k') | InputKey::Up => Some(Message::ScrollUp),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::Char('g') | InputKey::Home => Some(Message::ScrollToTop),
        InputKey::Char('G') | InputKey::End => Some(Message::ScrollToBottom),
        InputKey::Enter | InputKey::Char(' ') => Some(Message::ToggleExpand),

        // ─────────────────────────────────────────────────────────
        // Log operations
        // ─────────────────────────────────────────────────────────
        InputKey::Char('/') => Some(Message::StartSearch),
        InputKey::Esc if state.log_view.has_search() => Some(Message::ClearSearch),
        InputKey::Char('T') => Some(Message::ToggleTimestamps),
        InputKey::Char('a') => Some(Message::ToggleAutoScroll),
        InputKey::Char('e') => Some(Message::ExportLog),
        InputKey::Char('y') => Some(Message::CopyLog),
        InputKey::Char('C') => Some(Message::ClearMessages),

        _ => None,
    }
}

/// Handle key events in search input mode
fn handle_key_search_input(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ClearSearch),

        // Keep query, exit input mode
        InputKey::Enter => Some(Message::SubmitSearch),

        InputKey::Backspace => {
            let mut query = state.log_view.search_query.clone();
            query.pop();
            Some(Message::SearchInput { text: query })
        }

        InputKey::CharCtrl('u') => Some(Message::SearchInput {
            text: String::new(),
        }),

        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Char(c) => {
            let mut query = state.log_view.search_query.clone();
            query.push(c);
            Some(Message::SearchInput { text: query })
        }

        _ => None,
    }
}

/// Handle key events in the raw-message compose modal
fn handle_key_compose(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CloseCompose),
        InputKey::Enter => Some(Message::SubmitCompose),
        InputKey::Tab | InputKey::BackTab => Some(Message::ComposeSwitchField),

        InputKey::Backspace => {
            let mut text = state.compose.active_text().to_string();
            text.pop();
            Some(Message::ComposeInput { text })
        }

        InputKey::CharCtrl('u') => Some(Message::ComposeInput {
            text: String::new(),
        }),

        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Char(c) => {
            let mut text = state.compose.active_text().to_string();
            text.push(c);
            Some(Message::ComposeInput { text })
        }

        _ => None,
    }
}

/// Handle key events in the template picker
fn handle_key_template_picker(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseTemplatePicker),
        InputKey::Up | InputKey::Char('k') => Some(Message::PickerUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::PickerDown),
        InputKey::Enter => Some(Message::PickerConfirm),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}
