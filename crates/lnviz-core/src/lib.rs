//! # lnviz-core - Core Domain Types
//!
//! Foundation crate for the Lightning message-flow dashboard. Provides the
//! message event model, the template catalog, error handling, history
//! filtering and export.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Events (`events`)
//! - [`MessageEvent`] - One protocol message as broadcast by the harness
//! - [`Direction`] - `Out` (Runner → LDK) or `In` (LDK → Runner)
//! - [`NodeRole`] - The two nodes drawn on the flow diagram
//!
//! ### Domain Types (`types`)
//! - [`ConnectionStatus`] - Disconnected / Connecting / Connected
//! - [`MessageStats`] - Totals per direction and distinct event names
//!
//! ### Templates (`templates`)
//! - [`MessageTemplate`], [`MessageCategory`], [`default_catalog()`]
//!
//! ### History helpers (`filter`, `export`)
//! - [`matches_query()`], [`filter_indices()`]
//! - [`export_json()`], [`write_export()`], [`export_file_name()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use lnviz_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod export;
pub mod filter;
pub mod logging;
pub mod templates;
pub mod types;

/// Prelude for common imports used throughout all lnviz crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use events::{Direction, MessageEvent, NodeRole, PushError};
pub use export::{export_file_name, export_json, parse_export, write_export};
pub use filter::{filter_indices, matches_query};
pub use templates::{default_catalog, MessageCategory, MessageTemplate};
pub use types::{ConnectionStatus, MessageStats};
