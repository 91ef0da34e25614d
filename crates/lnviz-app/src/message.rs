//! Message types for the application (TEA pattern)
//!
//! Every state change flows through one of these. Keyboard input, push-channel
//! callbacks, poll loops and REST completions all send into the same queue.

use std::path::PathBuf;

use serde_json::Value;

use lnviz_core::{MessageEvent, PushError};
use lnviz_transport::{ConnectResponse, NodeInfo, RawMessageResponse};

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),
    /// Tick for periodic updates (edge expiry, notices)
    Tick,
    Quit,

    // ─────────────────────────────────────────────────────────
    // Connection lifecycle
    // ─────────────────────────────────────────────────────────
    /// Connect when disconnected, disconnect otherwise
    ToggleConnection,
    /// Push channel open and connect sequence acknowledged
    ConnectSucceeded {
        epoch: u64,
        response: ConnectResponse,
    },
    ConnectFailed {
        epoch: u64,
        error: String,
    },
    /// Push channel dropped without being asked to
    PushChannelClosed {
        reason: String,
    },
    StatusPolled {
        epoch: u64,
        result: Result<NodeInfo, String>,
    },
    HistoryPolled {
        epoch: u64,
        result: Result<Vec<MessageEvent>, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Push channel events
    // ─────────────────────────────────────────────────────────
    PushMessage(MessageEvent),
    PushError(PushError),
    SequenceComplete,

    // ─────────────────────────────────────────────────────────
    // Sending
    // ─────────────────────────────────────────────────────────
    SendRawMessage {
        msg_type: String,
        content: Value,
    },
    RawMessageSent {
        msg_type: String,
        result: Result<RawMessageResponse, String>,
    },
    SendSelectedTemplate,
    /// Re-run the backend's example connect sequence on the open channel
    RunExampleSequence,
    SequenceStarted {
        result: Result<ConnectResponse, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Compose modal
    // ─────────────────────────────────────────────────────────
    OpenCompose,
    CloseCompose,
    ComposeInput {
        text: String,
    },
    ComposeSwitchField,
    SubmitCompose,

    // ─────────────────────────────────────────────────────────
    // Template picker
    // ─────────────────────────────────────────────────────────
    OpenTemplatePicker,
    CloseTemplatePicker,
    PickerUp,
    PickerDown,
    /// Select the template under the picker cursor
    PickerConfirm,
    ClearTemplateSelection,

    // ─────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────
    StartSearch,
    SearchInput {
        text: String,
    },
    /// Leave search input, keeping the query
    SubmitSearch,
    /// Leave search input and drop the query
    ClearSearch,

    // ─────────────────────────────────────────────────────────
    // Log view
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    ToggleExpand,
    ToggleTimestamps,
    ToggleAutoScroll,
    ClearMessages,
    ExportLog,
    ExportFinished {
        result: Result<PathBuf, String>,
    },
    CopyLog,
}
