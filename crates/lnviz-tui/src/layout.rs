//! Screen layout definitions for the dashboard

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the flow diagram panel, borders included
const FLOW_HEIGHT: u16 = 9;

/// Below this width the detail panel is dropped
const DETAIL_MIN_WIDTH: u16 = 70;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, connection badge and toggle hint
    pub header: Rect,

    /// Two-node flow diagram
    pub flow: Rect,

    /// Message log
    pub log: Rect,

    /// Statistics, latest message and selected template.
    /// Zero-sized on narrow terminals.
    pub detail: Rect,

    /// One-line key hints or notice
    pub status: Rect,
}

/// Split the terminal into the dashboard areas.
///
/// ```text
/// ┌ header ──────────────────────────────┐
/// ├ flow ───────────────────┬ detail ────┤
/// ├ log ────────────────────┤            │
/// └─────────────────────────┴────────────┘
///  status
/// ```
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .split(area);

    let (main, detail) = if area.width >= DETAIL_MIN_WIDTH {
        let cols = Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[1]);
        (cols[0], cols[1])
    } else {
        (rows[1], Rect::new(rows[1].x, rows[1].y, 0, 0))
    };

    let left = Layout::vertical([Constraint::Length(FLOW_HEIGHT), Constraint::Min(3)]).split(main);

    ScreenAreas {
        header: rows[0],
        flow: left[0],
        log: left[1],
        detail,
        status: rows[2],
    }
}
