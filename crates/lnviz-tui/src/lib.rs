//! lnviz-tui - Terminal UI for lnviz
//!
//! This crate provides the ratatui-based dashboard. It creates an Engine
//! from lnviz-app and adds terminal rendering, event polling, clipboard
//! support and widget display.

pub mod clipboard;
pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
