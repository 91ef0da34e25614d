//! Engine - shared orchestration core for the TUI and headless runners.
//!
//! Owns the state, the message channel, the transport bridge and its
//! subscriptions. Push-channel callbacks never touch state directly; they
//! are forwarded into the same queue as keyboard input.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{info, warn};

use lnviz_core::prelude::*;
use lnviz_core::{ConnectionStatus, MessageEvent};
use lnviz_transport::{Subscription, TransportBridge};

use crate::actions::ActionContext;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the update queue
const MESSAGE_QUEUE: usize = 256;

/// How long shutdown waits for the push channel to close
const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Snapshot of the fields engine events are derived from
#[derive(Debug, Clone)]
struct StateSnapshot {
    status: ConnectionStatus,
    history_len: usize,
    last: Option<MessageEvent>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            status: state.status,
            history_len: state.history.len(),
            last: state.history.last().cloned(),
        }
    }
}

pub struct Engine {
    pub state: AppState,

    /// Sender half of the update queue, cloned into every producer
    pub msg_tx: mpsc::Sender<Message>,

    pub msg_rx: mpsc::Receiver<Message>,

    shutdown_tx: watch::Sender<bool>,

    actions: ActionContext,

    subscriptions: Vec<Subscription>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Build the engine and wire bridge callbacks into the update queue.
    ///
    /// Must be called inside a Tokio runtime (spawns the signal handler).
    pub fn new(settings: Settings) -> Result<Self> {
        let bridge = TransportBridge::new(settings.bridge_config())?;
        let state = AppState::with_settings(settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_QUEUE);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        let subscriptions = Self::subscribe_bridge(&bridge, &msg_tx);
        let actions = ActionContext::new(bridge, msg_tx.clone(), shutdown_rx);
        let (event_tx, _) = broadcast::channel(256);

        Ok(Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            actions,
            subscriptions,
            event_tx,
        })
    }

    fn subscribe_bridge(bridge: &TransportBridge, msg_tx: &mpsc::Sender<Message>) -> Vec<Subscription> {
        let tx = msg_tx.clone();
        let on_message = bridge.on_message(move |event| {
            forward(&tx, Message::PushMessage(event.clone()));
        });

        let tx = msg_tx.clone();
        let on_error = bridge.on_error(move |err| {
            forward(&tx, Message::PushError(err.clone()));
        });

        let tx = msg_tx.clone();
        let on_complete = bridge.on_complete(move |_| {
            forward(&tx, Message::SequenceComplete);
        });

        let tx = msg_tx.clone();
        let on_closed = bridge.on_closed(move |reason| {
            forward(
                &tx,
                Message::PushChannelClosed {
                    reason: reason.clone(),
                },
            );
        });

        vec![on_message, on_error, on_complete, on_closed]
    }

    /// Subscribe to engine events
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    pub fn bridge(&self) -> &TransportBridge {
        &self.actions.bridge
    }

    /// Process a single message through the TEA cycle
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);
        process::process_message(&mut self.state, msg, &mut self.actions);
        self.emit_events(&pre);
    }

    /// Drain and process all pending messages. Returns how many were handled.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop background tasks, close the push channel and drop subscriptions
    pub async fn shutdown(&mut self) {
        info!("Engine shutting down");
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);
        self.actions.stop_polling();

        match tokio::time::timeout(DISCONNECT_TIMEOUT, self.actions.close_channel()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Push channel close failed: {}", e),
            Err(_) => warn!("Push channel did not close within {:?}", DISCONNECT_TIMEOUT),
        }

        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    fn emit_events(&self, pre: &StateSnapshot) {
        if pre.status != self.state.status {
            self.emit(EngineEvent::StatusChanged {
                old: pre.status,
                new: self.state.status,
            });
        }

        let history = &self.state.history;
        let extends = history.len() >= pre.history_len
            && pre.last.as_ref() == pre.history_len.checked_sub(1).and_then(|i| history.get(i));

        if !extends {
            self.emit(EngineEvent::HistoryReplaced { len: history.len() });
            return;
        }

        for event in &history[pre.history_len..] {
            self.emit(EngineEvent::MessageAppended(event.clone()));
        }
    }

    /// `send` fails only when nobody is subscribed, which is fine
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

/// Forward a bridge callback into the update queue without blocking the
/// push-channel task
fn forward(tx: &mpsc::Sender<Message>, msg: Message) {
    if let Err(e) = tx.try_send(msg) {
        warn!("Dropping push event: {}", e);
    }
}
