//! History export task

use std::path::PathBuf;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::warn;

use lnviz_core::{write_export, MessageEvent};

use crate::message::Message;

/// Write `lightning-messages-<today>.json` under `dir` off the event loop
pub(super) fn spawn_export(msg_tx: mpsc::Sender<Message>, dir: PathBuf, events: Vec<MessageEvent>) {
    tokio::spawn(async move {
        let today = Local::now().date_naive();
        let result =
            match tokio::task::spawn_blocking(move || write_export(&dir, &events, today)).await {
                Ok(written) => written.map_err(|e| e.to_string()),
                Err(e) => {
                    warn!("Export task panicked: {}", e);
                    Err(e.to_string())
                }
            };
        let _ = msg_tx.send(Message::ExportFinished { result }).await;
    });
}
