//! Push-channel lifecycle worker.
//!
//! Connect and disconnect requests are queued to one task and applied to the
//! bridge strictly in dispatch order, so a late disconnect can never close a
//! channel opened by a later connect.

use tokio::sync::{mpsc, oneshot, watch};

use lnviz_core::prelude::*;
use lnviz_transport::TransportBridge;

use crate::message::Message;

/// A queued bridge lifecycle request
#[derive(Debug)]
pub(super) enum Lifecycle {
    Connect { epoch: u64, node_id: String },
    Disconnect { done: Option<oneshot::Sender<()>> },
}

/// Start the worker. It exits once every sender is dropped.
pub(super) fn spawn_lifecycle_worker(
    bridge: TransportBridge,
    msg_tx: mpsc::Sender<Message>,
    shutdown_rx: watch::Receiver<bool>,
) -> mpsc::UnboundedSender<Lifecycle> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Lifecycle>();

    tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                Lifecycle::Connect { epoch, node_id } => {
                    if *shutdown_rx.borrow() {
                        debug!("Engine shutting down, skipping connect attempt {}", epoch);
                        continue;
                    }
                    connect(&bridge, &msg_tx, epoch, node_id).await;
                }
                Lifecycle::Disconnect { done } => {
                    bridge.disconnect().await;
                    if let Some(done) = done {
                        let _ = done.send(());
                    }
                }
            }
        }
        debug!("Lifecycle worker stopped");
    });

    tx
}

/// Open the push channel in order, then run the backend connect sequence off
/// the worker so a queued disconnect is not held up by the REST call.
/// The outcome is reported tagged with `epoch`.
async fn connect(bridge: &TransportBridge, msg_tx: &mpsc::Sender<Message>, epoch: u64, node_id: String) {
    if let Err(e) = bridge.connect().await {
        warn!("Connect attempt {} failed: {}", epoch, e);
        report(
            msg_tx,
            Message::ConnectFailed {
                epoch,
                error: e.to_string(),
            },
        )
        .await;
        return;
    }

    let bridge = bridge.clone();
    let msg_tx = msg_tx.clone();
    tokio::spawn(async move {
        let msg = match bridge.run_connect_sequence(&node_id).await {
            Ok(response) => Message::ConnectSucceeded { epoch, response },
            Err(e) => {
                warn!("Connect sequence for attempt {} failed: {}", epoch, e);
                Message::ConnectFailed {
                    epoch,
                    error: e.to_string(),
                }
            }
        };
        report(&msg_tx, msg).await;
    });
}

async fn report(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Engine gone before connect result was delivered");
    }
}
