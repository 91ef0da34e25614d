//! # lnviz-transport - Harness Transport Bridge
//!
//! REST and push-channel plumbing between the dashboard and the Lightning
//! protocol test-harness backend.
//!
//! Depends on [`lnviz_core`] for the event model and error handling.
//!
//! ## Public API
//!
//! ### Bridge
//! - [`TransportBridge`] - connect/disconnect, REST calls, `on_*` subscriptions
//! - [`BridgeConfig`] - base URL and timeouts
//! - [`Subscription`] - handle returned by every `on_*` call
//!
//! ### REST (`rest`)
//! - [`RestClient`] - `POST /connect`, `POST /rawmsg`, `GET /node-info`, `GET /messages`
//! - [`ConnectResponse`], [`RawMessageResponse`], [`NodeInfo`], [`MessagesResponse`]
//!
//! ### Push channel (`push`, `socketio`)
//! - [`PushChannel`] - one Socket.IO session over WebSocket
//! - [`socketio::decode()`], [`socketio::encode_event()`], [`socketio::socket_url()`]

pub mod bridge;
pub mod push;
pub mod rest;
pub mod socketio;
pub mod subscriptions;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use bridge::{BridgeConfig, TransportBridge};
pub use push::{ChannelState, PushChannel, PushHubs, SEQUENCE_COMPLETE};
pub use rest::{ConnectResponse, MessagesResponse, NodeInfo, RawMessageResponse, RestClient};
pub use subscriptions::{Subscribers, Subscription};
