//! Core domain types: connection status and history statistics

use std::collections::HashSet;

use crate::events::{Direction, MessageEvent};

/// Process-wide connection status shown by the badge and the flow view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    pub fn is_connected(self) -> bool {
        self == ConnectionStatus::Connected
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
        }
    }

    /// Label for the connect/disconnect toggle in this status
    pub fn toggle_label(self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Connect",
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Disconnect",
        }
    }
}

/// Aggregate counts over the message history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageStats {
    pub total: usize,
    pub outgoing: usize,
    pub incoming: usize,
    pub unique_events: usize,
}

impl MessageStats {
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a MessageEvent>) -> Self {
        let mut stats = Self::default();
        let mut names: HashSet<&str> = HashSet::new();

        for event in events {
            stats.total += 1;
            match event.direction {
                Direction::Out => stats.outgoing += 1,
                Direction::In => stats.incoming += 1,
            }
            names.insert(event.event.as_str());
        }

        stats.unique_events = names.len();
        stats
    }
}
