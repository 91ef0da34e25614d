//! Headless mode - JSON lines on stdout instead of the TUI.
//!
//! Every received protocol message is printed as one line, tagged with
//! `"type":"message"` and carried unchanged under `message`, so backend
//! fields never collide with the tag. Connection changes, backend errors and
//! fatal errors get their own line types.
//!
//! ```json
//! {"type":"status","status":"connected","sequence_id":"seq_03_1700000000","timestamp":1700000000100}
//! {"type":"message","message":{"sequence_id":"seq_03_1700000000","step":1,"direction":"out","event":"Connect","data":{},"timestamp":1700000000200}}
//! {"type":"error","message":"Connection lost: socket closed","fatal":true,"timestamp":1700000001000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use lnviz_core::{ConnectionStatus, MessageEvent};

/// Lines emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Connection status changed
    Status {
        status: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        sequence_id: Option<String>,
        timestamp: i64,
    },

    /// A protocol message appended to history
    Message { message: MessageEvent },

    /// Backend reported an error on the push channel
    PushError { error: String, timestamp: i64 },

    /// The backend finished a message sequence
    SequenceComplete { completed: u32, timestamp: i64 },

    /// Local error; `fatal` errors end the run
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event to stdout as one JSON line
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_line(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    pub fn write_line<W: Write>(&self, out: &mut W) -> lnviz_core::Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{json}")?;
        out.flush()?;
        Ok(())
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn status(status: ConnectionStatus, sequence_id: Option<String>) -> Self {
        let status = match status {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        };
        Self::Status {
            status,
            sequence_id,
            timestamp: Self::now(),
        }
    }

    pub fn message(message: MessageEvent) -> Self {
        Self::Message { message }
    }

    pub fn push_error(error: impl Into<String>) -> Self {
        Self::PushError {
            error: error.into(),
            timestamp: Self::now(),
        }
    }

    pub fn sequence_complete(completed: u32) -> Self {
        Self::SequenceComplete {
            completed,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}
