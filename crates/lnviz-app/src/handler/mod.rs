//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `connection`: Connect/disconnect, polling results, push-channel loss
//! - `compose`: Raw-message modal, template picker, sending
//! - `scroll`: Log cursor and scroll handlers
//! - `log_view`: Search, expansion, export and clipboard handlers

pub(crate) mod compose;
pub(crate) mod connection;
pub(crate) mod keys;
pub(crate) mod log_view;
pub(crate) mod scroll;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use lnviz_core::MessageEvent;

use crate::message::Message;

// Re-export main entry point
pub use compose::parse_content;
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Open the push channel, then run the backend connect sequence.
    /// Completion is reported with the same `epoch`.
    Connect { epoch: u64, node_id: String },

    /// Stop both poll loops and close the push channel
    Disconnect,

    /// Spawn the status and/or history poll loops for `epoch`,
    /// replacing any loops already running
    StartPolling {
        epoch: u64,
        interval: Duration,
        status: bool,
        history: bool,
    },

    /// `POST /rawmsg`
    SendMessage { msg_type: String, content: Value },

    /// `POST /connect` on the already-open channel
    RunConnectSequence { node_id: String },

    /// Write the history snapshot to `dir` as a dated JSON file
    ExportHistory {
        dir: PathBuf,
        events: Vec<MessageEvent>,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
