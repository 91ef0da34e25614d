//! Action handlers: UpdateAction dispatch and background task spawning

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use lnviz_core::{Error, Result};
use lnviz_transport::TransportBridge;

use crate::handler::UpdateAction;
use crate::message::Message;

use connection::Lifecycle;

pub(super) mod connection;
pub(super) mod export;
pub(super) mod messages;
pub(super) mod polling;

/// Everything a spawned action needs, owned by the engine
pub struct ActionContext {
    pub bridge: TransportBridge,
    pub msg_tx: mpsc::Sender<Message>,
    /// Engine-wide shutdown signal
    pub shutdown_rx: watch::Receiver<bool>,
    /// Stop signal for the running poll loops, if any
    polling: Option<watch::Sender<bool>>,
    /// Ordered connect/disconnect queue, started on first use
    lifecycle: Option<mpsc::UnboundedSender<Lifecycle>>,
}

impl ActionContext {
    pub fn new(
        bridge: TransportBridge,
        msg_tx: mpsc::Sender<Message>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            bridge,
            msg_tx,
            shutdown_rx,
            polling: None,
            lifecycle: None,
        }
    }

    pub fn is_polling(&self) -> bool {
        self.polling.is_some()
    }

    /// Signal the poll loops to exit. Safe to call when none are running.
    pub fn stop_polling(&mut self) {
        if let Some(tx) = self.polling.take() {
            debug!("Stopping poll loops");
            let _ = tx.send(true);
        }
    }

    fn queue(&mut self, cmd: Lifecycle) -> Result<()> {
        let bridge = &self.bridge;
        let msg_tx = &self.msg_tx;
        let shutdown_rx = &self.shutdown_rx;
        let tx = self.lifecycle.get_or_insert_with(|| {
            connection::spawn_lifecycle_worker(bridge.clone(), msg_tx.clone(), shutdown_rx.clone())
        });
        tx.send(cmd)
            .map_err(|_| Error::channel_send("lifecycle worker"))
    }

    /// Queue a disconnect behind any pending lifecycle requests and wait for
    /// the push channel to be closed.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelSend`] or [`Error::ChannelClosed`] if the lifecycle
    /// worker is no longer running.
    pub async fn close_channel(&mut self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.queue(Lifecycle::Disconnect { done: Some(done_tx) })?;
        done_rx.await.map_err(|_| Error::ChannelClosed)
    }
}

/// Execute an action by spawning a background task
pub fn handle_action(action: UpdateAction, ctx: &mut ActionContext) {
    match action {
        UpdateAction::Connect { epoch, node_id } => {
            if let Err(e) = ctx.queue(Lifecycle::Connect { epoch, node_id }) {
                warn!("Connect attempt {} not queued: {}", epoch, e);
            }
        }

        UpdateAction::Disconnect => {
            ctx.stop_polling();
            if let Err(e) = ctx.queue(Lifecycle::Disconnect { done: None }) {
                warn!("Disconnect not queued: {}", e);
            }
        }

        UpdateAction::StartPolling {
            epoch,
            interval,
            status,
            history,
        } => {
            ctx.stop_polling();
            let (stop_tx, stop_rx) = watch::channel(false);
            if status {
                polling::spawn_status_poll(
                    ctx.bridge.clone(),
                    ctx.msg_tx.clone(),
                    epoch,
                    interval,
                    stop_rx.clone(),
                    ctx.shutdown_rx.clone(),
                );
            }
            if history {
                polling::spawn_history_poll(
                    ctx.bridge.clone(),
                    ctx.msg_tx.clone(),
                    epoch,
                    interval,
                    stop_rx,
                    ctx.shutdown_rx.clone(),
                );
            }
            ctx.polling = Some(stop_tx);
        }

        UpdateAction::SendMessage { msg_type, content } => {
            messages::spawn_send(ctx.bridge.clone(), ctx.msg_tx.clone(), msg_type, content);
        }

        UpdateAction::RunConnectSequence { node_id } => {
            messages::spawn_sequence(ctx.bridge.clone(), ctx.msg_tx.clone(), node_id);
        }

        UpdateAction::ExportHistory { dir, events } => {
            export::spawn_export(ctx.msg_tx.clone(), dir, events);
        }
    }
}
