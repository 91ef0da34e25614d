//! The single façade the application talks to: REST calls plus the push
//! channel lifecycle and its subscriptions.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use lnviz_core::prelude::*;
use lnviz_core::{MessageEvent, PushError};

use crate::push::{PushChannel, PushHubs};
use crate::rest::{ConnectResponse, MessagesResponse, NodeInfo, RawMessageResponse, RestClient};
use crate::socketio::socket_url;
use crate::subscriptions::Subscription;

/// Connection parameters for a [`TransportBridge`]
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_millis(10_000),
            connect_timeout: Duration::from_millis(5_000),
        }
    }
}

struct Inner {
    rest: RestClient,
    socket_url: Url,
    connect_timeout: Duration,
    hubs: PushHubs,
    channel: Mutex<Option<PushChannel>>,
}

/// Clonable handle to the harness backend.
///
/// Subscriptions survive reconnects: callbacks are registered on the bridge,
/// not on an individual push-channel session.
#[derive(Clone)]
pub struct TransportBridge {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TransportBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportBridge")
            .field("base_url", &self.inner.rest.base_url())
            .field("socket_url", &self.inner.socket_url.as_str())
            .finish()
    }
}

impl TransportBridge {
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] when `base_url` cannot be turned into REST and
    /// WebSocket endpoints.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let rest = RestClient::new(&config.base_url, config.request_timeout)?;
        let socket_url = socket_url(&config.base_url)?;

        Ok(Self {
            inner: Arc::new(Inner {
                rest,
                socket_url,
                connect_timeout: config.connect_timeout,
                hubs: PushHubs::default(),
                channel: Mutex::new(None),
            }),
        })
    }

    /// Open the push channel. A no-op while a session is open.
    pub async fn connect(&self) -> Result<()> {
        let mut slot = self.inner.channel.lock().await;

        if let Some(channel) = slot.as_ref() {
            if channel.is_open() {
                debug!("Push channel already open, connect is a no-op");
                return Ok(());
            }
        }

        // Replace a session that was lost since the last connect
        if let Some(stale) = slot.take() {
            stale.close().await;
        }

        let channel = PushChannel::open(
            &self.inner.socket_url,
            self.inner.connect_timeout,
            self.inner.hubs.clone(),
        )
        .await?;
        *slot = Some(channel);
        Ok(())
    }

    /// Close the push channel if one exists. Idempotent.
    pub async fn disconnect(&self) {
        let channel = self.inner.channel.lock().await.take();
        match channel {
            Some(channel) => {
                info!("Disconnecting push channel");
                channel.close().await;
            }
            None => debug!("Disconnect with no push channel, nothing to do"),
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.inner
            .channel
            .lock()
            .await
            .as_ref()
            .is_some_and(PushChannel::is_open)
    }

    /// Ask the backend to run its multi-step connect handshake with `node_id`
    pub async fn run_connect_sequence(&self, node_id: &str) -> Result<ConnectResponse> {
        info!("Running connect sequence for node {}", node_id);
        self.inner.rest.connect_sequence(node_id).await
    }

    pub async fn send_message(&self, msg_type: &str, content: &Value) -> Result<RawMessageResponse> {
        debug!("Sending raw message '{}'", msg_type);
        self.inner.rest.raw_message(msg_type, content).await
    }

    pub async fn node_info(&self) -> Result<NodeInfo> {
        self.inner.rest.node_info().await
    }

    pub async fn messages(&self) -> Result<MessagesResponse> {
        self.inner.rest.messages().await
    }

    pub fn on_message(&self, callback: impl Fn(&MessageEvent) + Send + Sync + 'static) -> Subscription {
        self.inner.hubs.message.subscribe(callback)
    }

    pub fn on_error(&self, callback: impl Fn(&PushError) + Send + Sync + 'static) -> Subscription {
        self.inner.hubs.error.subscribe(callback)
    }

    pub fn on_complete(&self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Subscription {
        self.inner.hubs.complete.subscribe(callback)
    }

    /// Called with a reason when an open channel is lost without a
    /// `disconnect()`
    pub fn on_closed(&self, callback: impl Fn(&String) + Send + Sync + 'static) -> Subscription {
        self.inner.hubs.closed.subscribe(callback)
    }
}
