//! Async push-channel client for the harness backend.
//!
//! [`PushChannel::open`] performs the Engine.IO handshake and the Socket.IO
//! namespace connect before returning, so callers know the channel is live.
//! A background task then owns the WebSocket, answers pings, and fans
//! incoming events out to the registered [`PushHubs`].
//!
//! ```text
//! ┌────────────────┐   cmd chan   ┌──────────────────────────────┐
//! │  PushChannel   │─────────────▶│  Background task             │
//! │  close()       │              │  ws read / ping deadline     │
//! └────────────────┘              │  "message" → hubs.message    │
//!                                 │  "error"   → hubs.error      │
//!                                 │  complete  → hubs.complete   │
//!                                 │  lost      → hubs.closed     │
//!                                 └──────────────────────────────┘
//! ```
//!
//! There is no reconnection: an unexpected loss is reported once through
//! `hubs.closed` and the task exits.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use lnviz_core::prelude::*;
use lnviz_core::{MessageEvent, PushError};

use crate::socketio::{self, Frame, Handshake, SocketPacket};
use crate::subscriptions::Subscribers;

/// Event name the backend uses to signal the end of a connect sequence
pub const SEQUENCE_COMPLETE: &str = "sequence_complete";

const CMD_CHANNEL_CAPACITY: usize = 8;

/// How long `close()` waits for the task to flush the close frames
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;
type WsSink = SplitSink<WsStream, WsMessage>;

/// Callback registries fed by the background task
#[derive(Clone, Default)]
pub struct PushHubs {
    pub message: Subscribers<MessageEvent>,
    pub error: Subscribers<PushError>,
    pub complete: Subscribers<Value>,
    /// Reason text for an unexpected loss of the channel
    pub closed: Subscribers<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    Closed,
}

enum PushCommand {
    Disconnect,
}

/// A live Socket.IO session
pub struct PushChannel {
    cmd_tx: mpsc::Sender<PushCommand>,
    state: Arc<RwLock<ChannelState>>,
    task: JoinHandle<()>,
    sid: String,
}

impl std::fmt::Debug for PushChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushChannel")
            .field("sid", &self.sid)
            .field("state", &self.state())
            .finish()
    }
}

impl PushChannel {
    /// Connect, complete the handshake and start the background task.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectTimeout`] if the handshake does not finish within
    ///   `connect_timeout`.
    /// - [`Error::PushChannel`] on socket failure or a `connect_error` reply.
    /// - [`Error::Protocol`] on an undecodable handshake frame.
    pub async fn open(url: &Url, connect_timeout: Duration, hubs: PushHubs) -> Result<Self> {
        info!("Opening push channel at {}", url);

        let (ws, handshake) = match tokio::time::timeout(connect_timeout, establish(url)).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::ConnectTimeout),
        };

        info!("Push channel open (sid {})", handshake.sid);

        let (cmd_tx, cmd_rx) = mpsc::channel(CMD_CHANNEL_CAPACITY);
        let state = Arc::new(RwLock::new(ChannelState::Open));

        let task = tokio::spawn(run_io_loop(
            ws,
            handshake.liveness_deadline(),
            cmd_rx,
            hubs,
            Arc::clone(&state),
        ));

        Ok(Self {
            cmd_tx,
            state,
            task,
            sid: handshake.sid,
        })
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn state(&self) -> ChannelState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    /// Send a namespace disconnect and a Close frame, then wait briefly for
    /// the task to finish. Safe to call on an already-lost channel.
    pub async fn close(self) {
        let Self { cmd_tx, mut task, .. } = self;

        // The task may already have exited after a loss
        let _ = cmd_tx.send(PushCommand::Disconnect).await;

        if tokio::time::timeout(CLOSE_TIMEOUT, &mut task).await.is_err() {
            warn!("Push channel task did not stop in time, aborting");
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

async fn establish(url: &Url) -> Result<(WsStream, Handshake)> {
    let (mut ws, _response) = connect_async(url.as_str())
        .await
        .map_err(|e| Error::push_channel(format!("failed to connect: {e}")))?;

    let handshake = loop {
        match next_frame(&mut ws).await? {
            Frame::Open(handshake) => break handshake,
            other => debug!("Push channel: ignoring {:?} before open", other),
        }
    };

    ws.send(text_frame(socketio::CONNECT))
        .await
        .map_err(|e| Error::push_channel(format!("failed to send connect: {e}")))?;

    loop {
        match next_frame(&mut ws).await? {
            Frame::Socket(SocketPacket::Connect(_)) => break,
            Frame::Socket(SocketPacket::ConnectError(payload)) => {
                return Err(Error::push_channel(format!(
                    "connect_error: {}",
                    describe_payload(&payload)
                )));
            }
            Frame::Ping => {
                ws.send(text_frame(socketio::PONG))
                    .await
                    .map_err(|e| Error::push_channel(e.to_string()))?;
            }
            Frame::Close => return Err(Error::push_channel("closed during handshake")),
            other => debug!("Push channel: ignoring {:?} before connect ack", other),
        }
    }

    Ok((ws, handshake))
}

async fn next_frame(ws: &mut WsStream) -> Result<Frame> {
    loop {
        match ws.next().await {
            Some(Ok(WsMessage::Text(text))) => return socketio::decode(text.as_str()),
            Some(Ok(WsMessage::Close(_))) | None => {
                return Err(Error::push_channel("connection closed during handshake"))
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(Error::push_channel(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

async fn run_io_loop(
    ws: WsStream,
    liveness: Duration,
    mut cmd_rx: mpsc::Receiver<PushCommand>,
    hubs: PushHubs,
    state: Arc<RwLock<ChannelState>>,
) {
    let (mut sink, mut stream) = ws.split();

    let deadline = tokio::time::sleep(liveness);
    tokio::pin!(deadline);

    let lost = loop {
        tokio::select! {
            frame = stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        deadline.as_mut().reset(Instant::now() + liveness);
                        match socketio::decode(text.as_str()) {
                            Ok(frame) => {
                                if let Some(reason) = handle_frame(frame, &mut sink, &hubs).await {
                                    break Some(reason);
                                }
                            }
                            Err(e) => warn!("Push channel: dropping frame: {}", e),
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) => break Some("server closed the connection".to_string()),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Some(format!("read error: {e}")),
                    None => break Some("connection ended".to_string()),
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(PushCommand::Disconnect) => debug!("Push channel: disconnect requested"),
                    None => debug!("Push channel: handle dropped, shutting down"),
                }
                let _ = sink.send(text_frame(socketio::DISCONNECT)).await;
                send_close(&mut sink).await;
                break None;
            }

            _ = &mut deadline => break Some("ping timeout".to_string()),
        }
    };

    {
        let mut guard = state.write().unwrap_or_else(|e| e.into_inner());
        *guard = ChannelState::Closed;
    }

    match lost {
        Some(reason) => {
            warn!("Push channel lost: {}", reason);
            hubs.closed.emit(&reason);
        }
        None => info!("Push channel closed"),
    }
}

/// Returns the loss reason when the frame ends the session
async fn handle_frame(frame: Frame, sink: &mut WsSink, hubs: &PushHubs) -> Option<String> {
    match frame {
        Frame::Ping => {
            if let Err(e) = sink.send(text_frame(socketio::PONG)).await {
                return Some(format!("failed to answer ping: {e}"));
            }
            None
        }
        Frame::Close => Some("server closed the session".to_string()),
        Frame::Socket(SocketPacket::Disconnect) => Some("server disconnected the client".to_string()),
        Frame::Socket(SocketPacket::ConnectError(payload)) => {
            Some(format!("connect_error: {}", describe_payload(&payload)))
        }
        Frame::Socket(SocketPacket::Event {
            name,
            payload,
            ack_id,
        }) => {
            if let Some(id) = ack_id {
                let _ = sink.send(text_frame(&socketio::encode_ack(id))).await;
            }
            dispatch_event(&name, payload, hubs);
            None
        }
        Frame::Open(_) | Frame::Pong | Frame::Noop => None,
        Frame::Socket(SocketPacket::Connect(_)) | Frame::Socket(SocketPacket::Ack) => None,
    }
}

/// Route one named event to its hub. Unknown names are ignored.
///
/// A `message` whose `event` is `sequence_complete` is delivered as a
/// message and also signals completion.
pub(crate) fn dispatch_event(name: &str, payload: Value, hubs: &PushHubs) {
    match name {
        "message" => match MessageEvent::deserialize(&payload) {
            Ok(event) => {
                let complete = event.event == SEQUENCE_COMPLETE;
                hubs.message.emit(&event);
                if complete {
                    hubs.complete.emit(&payload);
                }
            }
            Err(e) => warn!("Push channel: malformed message event: {}", e),
        },
        "error" => {
            let error = match payload {
                Value::String(error) => PushError { error },
                other => PushError::deserialize(&other).unwrap_or_else(|_| PushError {
                    error: describe_payload(&other),
                }),
            };
            hubs.error.emit(&error);
        }
        SEQUENCE_COMPLETE => hubs.complete.emit(&payload),
        other => debug!("Push channel: ignoring event '{}'", other),
    }
}

fn describe_payload(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => payload.to_string(),
        },
        Value::Null => "no details".to_string(),
        other => other.to_string(),
    }
}

fn text_frame(text: &str) -> WsMessage {
    WsMessage::Text(text.to_string().into())
}

async fn send_close(sink: &mut WsSink) {
    let _ = sink.send(WsMessage::Close(None)).await;
    let _ = sink.close().await;
}
