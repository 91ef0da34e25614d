//! Status and history poll loops.
//!
//! Both loops tick at the configured interval (never below
//! [`POLL_MIN_MS`](crate::config::POLL_MIN_MS)) and run until:
//! - the stop channel changes (intent dropped or loops replaced), or
//! - the engine shutdown channel changes, or
//! - the `msg_tx` channel is closed.
//!
//! Failures are reported as messages; the loops never retry on their own.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use lnviz_transport::TransportBridge;

use crate::message::Message;

fn interval_after_first(period: Duration) -> tokio::time::Interval {
    // The first poll happens one period after connect, not immediately
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Poll `GET /node-info` and report it as [`Message::StatusPolled`]
pub(super) fn spawn_status_poll(
    bridge: TransportBridge,
    msg_tx: mpsc::Sender<Message>,
    epoch: u64,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        info!("Status poll started (epoch {}, every {:?})", epoch, period);
        let mut tick = interval_after_first(period);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let result = bridge.node_info().await.map_err(|e| e.to_string());
                    if msg_tx.send(Message::StatusPolled { epoch, result }).await.is_err() {
                        break;
                    }
                }
                _ = stop_rx.changed() => break,
                _ = shutdown_rx.changed() => break,
            }
        }
        debug!("Status poll stopped (epoch {})", epoch);
    });
}

/// Poll `GET /messages` and report it as [`Message::HistoryPolled`]
pub(super) fn spawn_history_poll(
    bridge: TransportBridge,
    msg_tx: mpsc::Sender<Message>,
    epoch: u64,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        info!("History poll started (epoch {}, every {:?})", epoch, period);
        let mut tick = interval_after_first(period);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let result = bridge
                        .messages()
                        .await
                        .map(|r| r.messages)
                        .map_err(|e| e.to_string());
                    if msg_tx.send(Message::HistoryPolled { epoch, result }).await.is_err() {
                        break;
                    }
                }
                _ = stop_rx.changed() => break,
                _ = shutdown_rx.changed() => break,
            }
        }
        debug!("History poll stopped (epoch {})", epoch);
    });
}
