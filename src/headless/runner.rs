//! Headless mode runner - event loop without the TUI

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use lnviz_app::config::Settings;
use lnviz_app::state::AppState;
use lnviz_app::{Engine, EngineEvent, Message};
use lnviz_core::prelude::*;

use super::HeadlessEvent;

/// Connect, run the connect sequence and print messages until interrupted.
///
/// Returns an error when the connection fails or is lost, so scripts can
/// tell a clean interrupt from a broken harness by the exit status.
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("lnviz starting in HEADLESS mode");
    info!("Backend: {}", settings.server.base_url);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings)?;
    let mut events = engine.subscribe();

    engine.process_message(Message::ToggleConnection);
    emit_engine_events(&mut events, &engine.state);

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown().await;

    info!("lnviz headless mode exiting");
    result
}

async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            return Ok(());
        }

        let Some(msg) = engine.msg_rx.recv().await else {
            info!("Message channel closed");
            return Ok(());
        };

        emit_pre_message_events(&msg);
        let completes_sequence = matches!(msg, Message::SequenceComplete);
        let had_intent = engine.state.intent_connected;

        engine.process_message(msg);

        emit_engine_events(events, &engine.state);
        if completes_sequence {
            HeadlessEvent::sequence_complete(engine.state.sequences_completed).emit();
        }

        // Intent is only dropped by a failed connect or a lost push channel
        if had_intent && !engine.state.intent_connected {
            let reason = engine
                .state
                .notice
                .as_ref()
                .map(|n| n.text.clone())
                .unwrap_or_else(|| "connection lost".to_string());
            HeadlessEvent::error(reason.clone(), true).emit();
            return Err(Error::push_channel(reason));
        }
    }
}

/// Events derived from the message itself rather than from state changes
fn emit_pre_message_events(msg: &Message) {
    if let Message::PushError(err) = msg {
        HeadlessEvent::push_error(err.error.clone()).emit();
    }
}

/// Translate engine events raised by the last message into output lines
fn emit_engine_events(events: &mut broadcast::Receiver<EngineEvent>, state: &AppState) {
    loop {
        match events.try_recv() {
            Ok(EngineEvent::StatusChanged { new, .. }) => {
                HeadlessEvent::status(new, state.last_sequence_id.clone()).emit();
            }
            Ok(EngineEvent::MessageAppended(event)) => {
                HeadlessEvent::message(event).emit();
            }
            Ok(EngineEvent::HistoryReplaced { len }) => {
                debug!("History replaced by backend ({} entries), not re-emitted", len);
            }
            Ok(EngineEvent::Shutdown) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} engine events", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}
