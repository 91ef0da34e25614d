//! Connection lifecycle handlers
//!
//! Connection intent and the epoch are owned here. Every intent change bumps
//! the epoch so late results from a previous connect attempt or poll loop are
//! recognised and dropped.

use tracing::{debug, info, warn};

use lnviz_core::{ConnectionStatus, MessageEvent, PushError};
use lnviz_transport::{ConnectResponse, NodeInfo};

use crate::state::{AppState, NoticeLevel};

use super::{UpdateAction, UpdateResult};

/// Connect when idle, disconnect when connected. Ignored mid-connect.
pub fn handle_toggle(state: &mut AppState) -> UpdateResult {
    match state.status {
        ConnectionStatus::Connecting => {
            debug!("Connection toggle ignored while connecting");
            UpdateResult::none()
        }
        ConnectionStatus::Connected => begin_disconnect(state),
        ConnectionStatus::Disconnected => begin_connect(state),
    }
}

fn begin_connect(state: &mut AppState) -> UpdateResult {
    state.epoch += 1;
    state.intent_connected = true;
    state.set_connection_status(ConnectionStatus::Connecting);
    info!("Connecting to {}", state.settings.server.base_url);

    UpdateResult::action(UpdateAction::Connect {
        epoch: state.epoch,
        node_id: state.settings.server.node_id.clone(),
    })
}

/// User-initiated disconnect. History is left untouched.
fn begin_disconnect(state: &mut AppState) -> UpdateResult {
    drop_intent(state);
    info!("Disconnected by user");
    UpdateResult::action(UpdateAction::Disconnect)
}

fn drop_intent(state: &mut AppState) {
    state.epoch += 1;
    state.intent_connected = false;
    state.set_connection_status(ConnectionStatus::Disconnected);
}

fn is_current(state: &AppState, epoch: u64, what: &str) -> bool {
    if epoch != state.epoch || !state.intent_connected {
        debug!(
            "Dropping stale {} (epoch {}, current {}, intent {})",
            what, epoch, state.epoch, state.intent_connected
        );
        return false;
    }
    true
}

pub fn handle_connect_succeeded(
    state: &mut AppState,
    epoch: u64,
    response: ConnectResponse,
) -> UpdateResult {
    if !is_current(state, epoch, "connect result") {
        return UpdateResult::none();
    }

    info!(
        "Connected: sequence {} for node {} ({} steps)",
        response.sequence_id, response.node_id, response.steps_completed
    );
    state.set_connection_status(ConnectionStatus::Connected);
    state.last_sequence_id = Some(response.sequence_id);

    let polling = &state.settings.polling;
    if !polling.status_enabled && !polling.history_enabled {
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::StartPolling {
        epoch,
        interval: polling.interval(),
        status: polling.status_enabled,
        history: polling.history_enabled,
    })
}

/// Any failure during connect reverts to disconnected and drops intent
pub fn handle_connect_failed(state: &mut AppState, epoch: u64, error: String) -> UpdateResult {
    if !is_current(state, epoch, "connect failure") {
        return UpdateResult::none();
    }

    warn!("Connection failed: {}", error);
    drop_intent(state);
    state.notify(format!("Connection failed: {error}"), NoticeLevel::Error);

    // The push channel may have opened before the REST call failed
    UpdateResult::action(UpdateAction::Disconnect)
}

/// The push channel went away without a user disconnect
pub fn handle_channel_closed(state: &mut AppState, reason: String) -> UpdateResult {
    if !state.intent_connected {
        debug!("Push channel closed after intent dropped: {}", reason);
        return UpdateResult::none();
    }

    warn!("Push channel lost: {}", reason);
    drop_intent(state);
    state.notify(format!("Connection lost: {reason}"), NoticeLevel::Error);
    UpdateResult::action(UpdateAction::Disconnect)
}

/// Status poll: any active backend connection means connected
pub fn handle_status_polled(
    state: &mut AppState,
    epoch: u64,
    result: Result<NodeInfo, String>,
) -> UpdateResult {
    if !is_current(state, epoch, "status poll") {
        return UpdateResult::none();
    }

    let status = match result {
        Ok(info) if info.has_connections() => ConnectionStatus::Connected,
        Ok(_) => ConnectionStatus::Disconnected,
        Err(e) => {
            debug!("Status poll failed: {}", e);
            ConnectionStatus::Disconnected
        }
    };

    if status != state.status {
        info!("Status poll: {} -> {}", state.status.label(), status.label());
    }
    state.set_connection_status(status);
    UpdateResult::none()
}

/// History poll: replaces local history wholesale while connected
pub fn handle_history_polled(
    state: &mut AppState,
    epoch: u64,
    result: Result<Vec<MessageEvent>, String>,
) -> UpdateResult {
    if !is_current(state, epoch, "history poll") {
        return UpdateResult::none();
    }

    match result {
        Ok(messages) if state.connected => state.set_messages(messages),
        Ok(_) => debug!("History poll result ignored while not connected"),
        Err(e) => debug!("History poll failed: {}", e),
    }
    UpdateResult::none()
}

pub fn handle_push_error(state: &mut AppState, err: PushError) -> UpdateResult {
    warn!("Backend error: {}", err.error);
    state.notify(format!("Backend error: {}", err.error), NoticeLevel::Error);
    state.last_push_error = Some(err.error);
    UpdateResult::none()
}

pub fn handle_sequence_complete(state: &mut AppState) -> UpdateResult {
    state.sequences_completed += 1;
    info!("Sequence complete ({} total)", state.sequences_completed);
    state.notify("Sequence complete", NoticeLevel::Info);
    UpdateResult::none()
}

/// Re-run the example connect sequence without reopening the channel
pub fn handle_run_example_sequence(state: &mut AppState) -> UpdateResult {
    if !state.connected {
        debug!("Example sequence ignored while not connected");
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::RunConnectSequence {
        node_id: state.settings.server.node_id.clone(),
    })
}

pub fn handle_sequence_started(
    state: &mut AppState,
    result: Result<ConnectResponse, String>,
) -> UpdateResult {
    match result {
        Ok(response) => {
            info!("Sequence {} started", response.sequence_id);
            state.last_sequence_id = Some(response.sequence_id);
        }
        Err(e) => {
            warn!("Failed to run connect sequence: {}", e);
            state.notify(format!("Sequence failed: {e}"), NoticeLevel::Warning);
        }
    }
    UpdateResult::none()
}
