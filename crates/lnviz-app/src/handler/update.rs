//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::state::AppState;

use super::{compose, connection, keys::handle_key, log_view, scroll, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.tick(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Connection Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleConnection => connection::handle_toggle(state),
        Message::ConnectSucceeded { epoch, response } => {
            connection::handle_connect_succeeded(state, epoch, response)
        }
        Message::ConnectFailed { epoch, error } => {
            connection::handle_connect_failed(state, epoch, error)
        }
        Message::PushChannelClosed { reason } => connection::handle_channel_closed(state, reason),
        Message::StatusPolled { epoch, result } => {
            connection::handle_status_polled(state, epoch, result)
        }
        Message::HistoryPolled { epoch, result } => {
            connection::handle_history_polled(state, epoch, result)
        }

        // ─────────────────────────────────────────────────────────
        // Push Channel Messages
        // ─────────────────────────────────────────────────────────
        Message::PushMessage(event) => {
            state.add_message(event);
            UpdateResult::none()
        }
        Message::PushError(err) => connection::handle_push_error(state, err),
        Message::SequenceComplete => connection::handle_sequence_complete(state),

        // ─────────────────────────────────────────────────────────
        // Sending Messages
        // ─────────────────────────────────────────────────────────
        Message::SendRawMessage { msg_type, content } => {
            compose::handle_send_raw(state, msg_type, content)
        }
        Message::RawMessageSent { msg_type, result } => compose::handle_sent(msg_type, result),
        Message::SendSelectedTemplate => compose::handle_send_selected_template(state),
        Message::RunExampleSequence => connection::handle_run_example_sequence(state),
        Message::SequenceStarted { result } => connection::handle_sequence_started(state, result),

        // ─────────────────────────────────────────────────────────
        // Compose / Template Picker Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenCompose => compose::handle_open_compose(state),
        Message::CloseCompose => compose::handle_close_compose(state),
        Message::ComposeInput { text } => {
            state.compose.set_active_text(text);
            UpdateResult::none()
        }
        Message::ComposeSwitchField => {
            state.compose.switch_field();
            UpdateResult::none()
        }
        Message::SubmitCompose => compose::handle_submit_compose(state),

        Message::OpenTemplatePicker => compose::handle_open_picker(state),
        Message::CloseTemplatePicker => compose::handle_close_picker(state),
        Message::PickerUp => compose::handle_picker_move(state, -1),
        Message::PickerDown => compose::handle_picker_move(state, 1),
        Message::PickerConfirm => compose::handle_picker_confirm(state),
        Message::ClearTemplateSelection => {
            state.select_template(None);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Search Messages
        // ─────────────────────────────────────────────────────────
        Message::StartSearch => log_view::handle_start_search(state),
        Message::SearchInput { text } => log_view::handle_search_input(state, text),
        Message::SubmitSearch => log_view::handle_submit_search(state),
        Message::ClearSearch => log_view::handle_clear_search(state),

        // ─────────────────────────────────────────────────────────
        // Log View Messages
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp => scroll::handle_scroll_up(state),
        Message::ScrollDown => scroll::handle_scroll_down(state),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),
        Message::ToggleExpand => log_view::handle_toggle_expand(state),
        Message::ToggleTimestamps => {
            state.log_view.toggle_timestamps();
            UpdateResult::none()
        }
        Message::ToggleAutoScroll => {
            state.log_view.toggle_auto_scroll();
            UpdateResult::none()
        }
        Message::ClearMessages => {
            state.clear_messages();
            UpdateResult::none()
        }
        Message::ExportLog => log_view::handle_export(state),
        Message::ExportFinished { result } => log_view::handle_export_finished(state, result),
        Message::CopyLog => log_view::handle_copy(state),
    }
}
