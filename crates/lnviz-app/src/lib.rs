//! lnviz-app - Application state and orchestration for lnviz
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the Engine that owns the transport bridge and the update
//! queue, configuration loading and signal handling.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod log_view_state;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, UiMode};

// Re-export core and transport types for the TUI
pub use lnviz_core::{ConnectionStatus, Direction, MessageEvent, MessageTemplate, NodeRole};
pub use lnviz_transport::TransportBridge;
