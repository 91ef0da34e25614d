//! Protocol message events as broadcast by the harness backend

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which way a message travelled between the two nodes.
///
/// `Out` is Runner → LDK, `In` is LDK → Runner. The backend omits the field on
/// bookkeeping broadcasts such as `sequence_complete`; those default to `Out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Out,
    In,
}

impl Direction {
    pub fn is_outgoing(self) -> bool {
        self == Direction::Out
    }

    /// Arrow glyph used by the log and flow views
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Out => "→",
            Direction::In => "←",
        }
    }

    /// Human label used by badges ("Outgoing" / "Incoming")
    pub fn label(self) -> &'static str {
        match self {
            Direction::Out => "Outgoing",
            Direction::In => "Incoming",
        }
    }

    /// (source, target) node pair for this direction
    pub fn endpoints(self) -> (NodeRole, NodeRole) {
        match self {
            Direction::Out => (NodeRole::Runner, NodeRole::Ldk),
            Direction::In => (NodeRole::Ldk, NodeRole::Runner),
        }
    }
}

/// The two fixed nodes on the flow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Runner,
    Ldk,
}

impl NodeRole {
    pub fn label(self) -> &'static str {
        match self {
            NodeRole::Runner => "Runner",
            NodeRole::Ldk => "LDK",
        }
    }

    pub fn short_tag(self) -> &'static str {
        match self {
            NodeRole::Runner => "RUNNER",
            NodeRole::Ldk => "LDK",
        }
    }
}

/// One protocol message as seen by the dashboard.
///
/// Immutable once received. Fields the backend sends that are not modelled
/// here (e.g. `total_steps`) are kept in `extra` so an export can be parsed
/// back into an identical event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,

    #[serde(default)]
    pub direction: Direction,

    pub event: String,

    #[serde(default = "empty_object")]
    pub data: Value,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl MessageEvent {
    /// Create an event stamped with the current time
    pub fn new(direction: Direction, event: impl Into<String>, data: Value) -> Self {
        Self::at(direction, event, data, Utc::now().timestamp_millis())
    }

    /// Create an event with an explicit timestamp (milliseconds)
    pub fn at(direction: Direction, event: impl Into<String>, data: Value, timestamp: i64) -> Self {
        Self {
            sequence_id: None,
            step: None,
            direction,
            event: event.into(),
            data,
            timestamp,
            extra: Map::new(),
        }
    }

    pub fn with_sequence(mut self, sequence_id: impl Into<String>, step: u32) -> Self {
        self.sequence_id = Some(sequence_id.into());
        self.step = Some(step);
        self
    }

    /// Local wall-clock time of the event, if the timestamp is representable
    pub fn local_time(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    /// `HH:MM:SS.mmm` in local time, or the raw number when out of range
    pub fn format_time(&self) -> String {
        match self.local_time() {
            Some(t) => t.format("%H:%M:%S%.3f").to_string(),
            None => self.timestamp.to_string(),
        }
    }

    /// Compact single-line JSON of the payload
    pub fn data_compact(&self) -> String {
        serde_json::to_string(&self.data).unwrap_or_default()
    }

    /// Pretty-printed payload, two-space indented
    pub fn data_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.data).unwrap_or_default()
    }
}

/// Backend-reported error pushed on the `error` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushError {
    #[serde(default)]
    pub error: String,
}
