//! Custom widget components

mod compose_dialog;
mod detail_panel;
mod flow_view;
mod header;
mod log_view;
pub mod modal_overlay;
mod search_input;
mod status_bar;
mod template_picker;

pub use compose_dialog::ComposeDialog;
pub use detail_panel::DetailPanel;
pub use flow_view::{edge_text, FlowView};
pub use header::MainHeader;
pub use log_view::{format_summary, LogView, EMPTY_HISTORY, NO_MATCHES};
pub use search_input::SearchInput;
pub use status_bar::StatusBar;
pub use template_picker::TemplatePicker;

use ratatui::text::Span;

use crate::theme::styles;

/// `[key] label` hint spans
pub(crate) fn key_hint(key: &str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{key}]"), styles::keybinding()),
        Span::styled(format!(" {label}"), styles::text_secondary()),
    ]
}
