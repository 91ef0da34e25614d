//! In-process stand-in for the harness push endpoint.
//!
//! Speaks just enough Engine.IO / Socket.IO over a local WebSocket to drive
//! the client through handshake, events, pings and loss.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;

use crate::socketio;

/// Server behaviour knobs
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub ping_interval_ms: u64,
    pub ping_timeout_ms: u64,
    /// Send an engine ping at this cadence
    pub ping_every: Option<Duration>,
    /// Answer the namespace connect with `44{"message": ..}`
    pub reject_with: Option<String>,
    /// Accept the TCP/WebSocket connection but never send the open packet
    pub silent: bool,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            ping_interval_ms: 25_000,
            ping_timeout_ms: 20_000,
            ping_every: None,
            reject_with: None,
            silent: false,
        }
    }
}

#[derive(Debug, Clone)]
enum ServerCommand {
    Send(String),
    DropAll,
}

/// A running fake push endpoint bound to an ephemeral local port
pub struct FakeHarness {
    addr: SocketAddr,
    commands: broadcast::Sender<ServerCommand>,
    received: Arc<Mutex<Vec<String>>>,
    sessions: Arc<AtomicUsize>,
}

impl FakeHarness {
    pub async fn start() -> Self {
        Self::start_with(HarnessOptions::default()).await
    }

    pub async fn start_with(options: HarnessOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake harness");
        let addr = listener.local_addr().expect("local addr");
        let (commands, _) = broadcast::channel(64);
        let received = Arc::new(Mutex::new(Vec::new()));
        let sessions = Arc::new(AtomicUsize::new(0));

        let accept_sessions = Arc::clone(&sessions);
        let accept_commands = commands.clone();
        let accept_received = Arc::clone(&received);
        tokio::spawn(async move {
            while let Ok((tcp, _)) = listener.accept().await {
                tokio::spawn(serve_client(
                    tcp,
                    options.clone(),
                    accept_commands.subscribe(),
                    Arc::clone(&accept_received),
                    Arc::clone(&accept_sessions),
                ));
            }
        });

        Self {
            addr,
            commands,
            received,
            sessions,
        }
    }

    /// Base URL as the REST client would see it
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Broadcast `42["name",payload]` to every connected client
    pub fn push_event(&self, name: &str, payload: Value) {
        let text = socketio::encode_event(name, &payload).expect("encode event");
        self.push_raw(text);
    }

    pub fn push_raw(&self, text: impl Into<String>) {
        let _ = self.commands.send(ServerCommand::Send(text.into()));
    }

    /// Close every client socket without a Socket.IO disconnect
    pub fn drop_clients(&self) {
        let _ = self.commands.send(ServerCommand::DropAll);
    }

    /// Text frames received from clients after their namespace connect
    pub fn received(&self) -> Vec<String> {
        self.received.lock().expect("received lock").clone()
    }

    /// Number of namespace connects accepted so far
    pub fn sessions(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }

    /// Poll until `check` passes; panics after two seconds
    pub async fn wait_for(&self, check: impl Fn(&Self) -> bool) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while !check(self) {
            assert!(
                tokio::time::Instant::now() < deadline,
                "condition not met; received frames: {:?}",
                self.received()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn serve_client(
    tcp: TcpStream,
    options: HarnessOptions,
    mut commands: broadcast::Receiver<ServerCommand>,
    received: Arc<Mutex<Vec<String>>>,
    sessions: Arc<AtomicUsize>,
) {
    let Ok(mut ws) = tokio_tungstenite::accept_async(tcp).await else {
        return;
    };

    if options.silent {
        // Hold the socket open without speaking
        while let Some(Ok(_)) = ws.next().await {}
        return;
    }

    let open = format!(
        r#"0{{"sid":"test-sid","upgrades":[],"pingInterval":{},"pingTimeout":{},"maxPayload":1000000}}"#,
        options.ping_interval_ms, options.ping_timeout_ms
    );
    if ws.send(text(open)).await.is_err() {
        return;
    }

    // Wait for the namespace connect
    loop {
        match ws.next().await {
            Some(Ok(WsMessage::Text(t))) if t.as_str() == socketio::CONNECT => break,
            Some(Ok(_)) => continue,
            _ => return,
        }
    }

    if let Some(reason) = options.reject_with {
        let reply = format!("44{}", serde_json::json!({ "message": reason }));
        let _ = ws.send(text(reply)).await;
        return;
    }

    sessions.fetch_add(1, Ordering::SeqCst);
    if ws.send(text(r#"40{"sid":"ns-sid"}"#)).await.is_err() {
        return;
    }
    let _ = ws
        .send(text(r#"42["connected",{"data":"Connected"}]"#))
        .await;

    let mut ping = tokio::time::interval(options.ping_every.unwrap_or(Duration::from_secs(3600)));
    ping.tick().await;

    loop {
        tokio::select! {
            frame = ws.next() => match frame {
                Some(Ok(WsMessage::Text(t))) => {
                    let t = t.as_str().to_string();
                    let done = t == socketio::DISCONNECT;
                    received.lock().expect("received lock").push(t);
                    if done {
                        break;
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
            cmd = commands.recv() => match cmd {
                Ok(ServerCommand::Send(t)) => {
                    if ws.send(text(t)).await.is_err() {
                        break;
                    }
                }
                Ok(ServerCommand::DropAll) | Err(broadcast::error::RecvError::Closed) => {
                    let _ = ws.close(None).await;
                    break;
                }
                Err(broadcast::error::RecvError::Lagged(_)) => {}
            },
            _ = ping.tick(), if options.ping_every.is_some() => {
                if ws.send(text("2")).await.is_err() {
                    break;
                }
            }
        }
    }
}

fn text(s: impl Into<String>) -> WsMessage {
    WsMessage::Text(s.into().into())
}
