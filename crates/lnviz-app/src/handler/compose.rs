//! Raw-message compose modal, template picker and send handlers

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use lnviz_transport::RawMessageResponse;

use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::{UpdateAction, UpdateResult};

/// Turn free-form compose text into a message body.
///
/// Empty text becomes `{}`, a JSON object is used as-is, and anything else
/// (including valid non-object JSON) is wrapped as `{"data": "<raw text>"}`.
pub fn parse_content(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        _ => json!({ "data": raw }),
    }
}

/// Send gate shared by raw and template sends
pub fn handle_send_raw(state: &mut AppState, msg_type: String, content: Value) -> UpdateResult {
    if !state.connected {
        warn!("Not connected; '{}' was not sent", msg_type);
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::SendMessage { msg_type, content })
}

/// Failures are logged only; the UI does not change
pub fn handle_sent(msg_type: String, result: Result<RawMessageResponse, String>) -> UpdateResult {
    match result {
        Ok(response) => info!("Sent '{}' ({})", response.message_type, response.status),
        Err(e) => warn!("Failed to send '{}': {}", msg_type, e),
    }
    UpdateResult::none()
}

/// Send the selected canned template and clear the selection
pub fn handle_send_selected_template(state: &mut AppState) -> UpdateResult {
    if !state.connected {
        debug!("Template send ignored while not connected");
        return UpdateResult::none();
    }
    let Some(template) = state.selected_template().cloned() else {
        debug!("No template selected");
        return UpdateResult::none();
    };

    state.select_template(None);
    UpdateResult::message(Message::SendRawMessage {
        msg_type: template.msg_type.to_string(),
        content: template.payload,
    })
}

// ─────────────────────────────────────────────────────────
// Compose modal
// ─────────────────────────────────────────────────────────

pub fn handle_open_compose(state: &mut AppState) -> UpdateResult {
    if !state.connected {
        return UpdateResult::none();
    }
    state.compose.reset();
    state.ui_mode = UiMode::Compose;
    UpdateResult::none()
}

pub fn handle_close_compose(state: &mut AppState) -> UpdateResult {
    state.compose.reset();
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

/// Validate and send. An empty type keeps the modal open with a hint.
pub fn handle_submit_compose(state: &mut AppState) -> UpdateResult {
    let msg_type = state.compose.msg_type.trim().to_string();
    if msg_type.is_empty() {
        state.compose.error = Some("Message type is required".to_string());
        return UpdateResult::none();
    }

    let content = parse_content(&state.compose.content);
    state.compose.reset();
    state.ui_mode = UiMode::Normal;

    UpdateResult::message(Message::SendRawMessage { msg_type, content })
}

// ─────────────────────────────────────────────────────────
// Template picker
// ─────────────────────────────────────────────────────────

pub fn handle_open_picker(state: &mut AppState) -> UpdateResult {
    if !state.connected {
        return UpdateResult::none();
    }
    state.picker.cursor = state.selected_template.unwrap_or(0);
    state.ui_mode = UiMode::TemplatePicker;
    UpdateResult::none()
}

pub fn handle_close_picker(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

/// Move the picker cursor, wrapping at both ends
pub fn handle_picker_move(state: &mut AppState, delta: isize) -> UpdateResult {
    let len = state.catalog.len();
    if len == 0 {
        return UpdateResult::none();
    }
    let cursor = state.picker.cursor as isize + delta;
    state.picker.cursor = cursor.rem_euclid(len as isize) as usize;
    UpdateResult::none()
}

pub fn handle_picker_confirm(state: &mut AppState) -> UpdateResult {
    state.select_template(Some(state.picker.cursor));
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_empty_is_empty_object() {
        assert_eq!(parse_content(""), json!({}));
        assert_eq!(parse_content("   "), json!({}));
    }

    #[test]
    fn test_parse_content_object_passes_through() {
        assert_eq!(
            parse_content(r#"{"num_pong_bytes":1,"ignored":"00"}"#),
            json!({"num_pong_bytes": 1, "ignored": "00"})
        );
    }

    #[test]
    fn test_parse_content_wraps_everything_else() {
        assert_eq!(parse_content("hello"), json!({"data": "hello"}));
        assert_eq!(parse_content("{broken"), json!({"data": "{broken"}));
        assert_eq!(parse_content("[1,2]"), json!({"data": "[1,2]"}));
        assert_eq!(parse_content("42"), json!({"data": "42"}));
    }
}
