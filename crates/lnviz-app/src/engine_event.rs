//! Events broadcast by the engine to non-TUI consumers (headless output)

use lnviz_core::{ConnectionStatus, MessageEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StatusChanged {
        old: ConnectionStatus,
        new: ConnectionStatus,
    },
    /// A new entry at the end of history
    MessageAppended(MessageEvent),
    /// History was replaced by a list that does not extend the old one
    HistoryReplaced { len: usize },
    Shutdown,
}
