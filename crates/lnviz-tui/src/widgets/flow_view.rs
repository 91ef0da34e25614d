//! Flow diagram: the Runner and LDK nodes, the permanent `init` edge and the
//! transient edge of the most recent message.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use lnviz_app::state::TransientEdge;
use lnviz_core::{ConnectionStatus, Direction, NodeRole};

use crate::theme::{palette, styles};

const NODE_WIDTH: u16 = 14;
const NODE_HEIGHT: u16 = 3;

pub struct FlowView<'a> {
    status: ConnectionStatus,
    edge: Option<&'a TransientEdge>,
    message_count: usize,
}

impl<'a> FlowView<'a> {
    pub fn new(status: ConnectionStatus) -> Self {
        Self {
            status,
            edge: None,
            message_count: 0,
        }
    }

    /// Edge to draw for the latest message, if still within its display time
    pub fn edge(mut self, edge: Option<&'a TransientEdge>) -> Self {
        self.edge = edge;
        self
    }

    pub fn message_count(mut self, count: usize) -> Self {
        self.message_count = count;
        self
    }

    fn node_style(&self, role: NodeRole) -> Style {
        match self.status {
            ConnectionStatus::Connected => styles::node(role).add_modifier(Modifier::BOLD),
            ConnectionStatus::Connecting => styles::status_yellow(),
            ConnectionStatus::Disconnected => styles::text_muted(),
        }
    }

    fn status_line(&self) -> Line<'static> {
        let (dot, style) = styles::connection_indicator(self.status);
        let detail = match self.status {
            ConnectionStatus::Disconnected => "press c to connect".to_string(),
            ConnectionStatus::Connecting => "running connect sequence".to_string(),
            ConnectionStatus::Connected => match self.message_count {
                1 => "1 message".to_string(),
                n => format!("{n} messages"),
            },
        };
        Line::from(vec![
            Span::styled(dot, style),
            Span::raw(" "),
            Span::styled(self.status.label(), style),
            Span::styled(format!(" · {detail}"), styles::text_muted()),
        ])
    }

    fn render_node(&self, role: NodeRole, area: Rect, buf: &mut Buffer) {
        let style = self.node_style(role);
        let block = styles::glass_block(false).border_style(style);
        let label = Line::from(vec![
            Span::styled("⚡ ", style),
            Span::styled(role.label(), style),
        ]);
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }

    /// Compact single-line rendering for panels too small for the diagram
    fn render_compact(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = self.status_line().spans;
        if let Some(edge) = self.edge {
            let (from, to) = edge.direction.endpoints();
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} {} {}: {}", from.label(), edge.direction.arrow(), to.label(), edge.label),
                styles::edge(edge.direction),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

impl Widget for FlowView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(Line::styled(" Message Flow ", styles::title()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        if inner.height < NODE_HEIGHT + 2 || inner.width < NODE_WIDTH * 2 + 8 {
            self.render_compact(inner, buf);
            return;
        }

        buf.set_line(inner.x + 1, inner.y, &self.status_line(), inner.width - 1);

        let top = inner.y + 1 + (inner.height - NODE_HEIGHT - 1) / 2;
        let runner = Rect::new(inner.x + 1, top, NODE_WIDTH, NODE_HEIGHT);
        let ldk = Rect::new(inner.right() - NODE_WIDTH - 1, top, NODE_WIDTH, NODE_HEIGHT);
        self.render_node(NodeRole::Runner, runner, buf);
        self.render_node(NodeRole::Ldk, ldk, buf);

        // Gap between the nodes, one cell of padding on each side
        let gap_x = runner.right() + 1;
        let gap_width = ldk.x.saturating_sub(gap_x + 1) as usize;

        let init = edge_text("init", gap_width, '╌', None);
        buf.set_string(gap_x, top + 1, init, Style::default().fg(palette::INIT_EDGE));

        if let Some(edge) = self.edge {
            // Below the nodes when there is room, otherwise above
            let y = if top + NODE_HEIGHT < inner.bottom() {
                top + NODE_HEIGHT
            } else {
                top - 1
            };
            let text = edge_text(&edge.label, gap_width, '━', Some(edge.direction));
            buf.set_string(
                gap_x,
                y,
                text,
                styles::edge(edge.direction).add_modifier(Modifier::BOLD),
            );
        }
    }
}

/// Build a horizontal edge of exactly `width` columns with `label` centered.
///
/// An outgoing edge ends in `▶`, an incoming one starts with `◀`. Labels too
/// long for the gap are truncated with `…`.
pub fn edge_text(label: &str, width: usize, fill: char, direction: Option<Direction>) -> String {
    if width == 0 {
        return String::new();
    }

    // Room for at least one fill cell on each side of " label "
    let max_label = width.saturating_sub(4);
    let label = truncate(label, max_label);
    let label_width: usize = label.chars().filter_map(|c| c.width()).sum();
    let padded_width = if label.is_empty() { 0 } else { label_width + 2 };

    let fill_total = width.saturating_sub(padded_width);
    let left = fill_total / 2;
    let right = fill_total - left;

    let mut out = String::with_capacity(width * 3);
    for i in 0..left {
        out.push(if i == 0 && direction == Some(Direction::In) {
            '◀'
        } else {
            fill
        });
    }
    if !label.is_empty() {
        out.push(' ');
        out.push_str(&label);
        out.push(' ');
    }
    for i in 0..right {
        out.push(if i + 1 == right && direction == Some(Direction::Out) {
            '▶'
        } else {
            fill
        });
    }
    out
}

fn truncate(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().filter_map(|c| c.width()).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use std::time::Instant;

    fn edge(direction: Direction, label: &str) -> TransientEdge {
        TransientEdge {
            direction,
            label: label.to_string(),
            shown_at: Instant::now(),
        }
    }

    #[test]
    fn test_edge_text_outgoing_points_right() {
        let text = edge_text("ping", 20, '━', Some(Direction::Out));
        assert_eq!(text.chars().count(), 20);
        assert!(text.contains(" ping "));
        assert!(text.ends_with('▶'));
        assert!(!text.contains('◀'));
    }

    #[test]
    fn test_edge_text_incoming_points_left() {
        let text = edge_text("pong", 20, '━', Some(Direction::In));
        assert!(text.starts_with('◀'));
        assert!(!text.contains('▶'));
    }

    #[test]
    fn test_edge_text_truncates_long_labels() {
        let text = edge_text("channel_announcement", 12, '━', Some(Direction::Out));
        assert_eq!(text.chars().count(), 12);
        assert!(text.contains('…'));
    }

    #[test]
    fn test_edge_text_zero_width() {
        assert_eq!(edge_text("init", 0, '╌', None), "");
    }

    #[test]
    fn test_renders_nodes_and_init_edge() {
        let mut term = TestTerminal::with_size(60, 9);
        term.render_widget(FlowView::new(ConnectionStatus::Disconnected), term.area());

        assert!(term.buffer_contains("Runner"));
        assert!(term.buffer_contains("LDK"));
        assert!(term.buffer_contains(" init "));
        assert!(term.buffer_contains("press c to connect"));
    }

    #[test]
    fn test_renders_transient_edge() {
        let e = edge(Direction::Out, "ping");
        let mut term = TestTerminal::with_size(60, 9);
        term.render_widget(
            FlowView::new(ConnectionStatus::Connected)
                .edge(Some(&e))
                .message_count(1),
            term.area(),
        );

        assert!(term.buffer_contains(" ping "));
        assert!(term.buffer_contains("▶"));
        assert!(term.buffer_contains("1 message"));
    }

    #[test]
    fn test_no_transient_edge_without_message() {
        let mut term = TestTerminal::with_size(60, 9);
        term.render_widget(FlowView::new(ConnectionStatus::Connected), term.area());

        assert!(!term.buffer_contains("▶"));
        assert!(!term.buffer_contains("◀"));
    }

    #[test]
    fn test_compact_rendering_on_small_area() {
        let e = edge(Direction::In, "pong");
        let mut term = TestTerminal::with_size(70, 3);
        term.render_widget(
            FlowView::new(ConnectionStatus::Connecting).edge(Some(&e)),
            term.area(),
        );

        assert!(term.buffer_contains("Connecting..."));
        assert!(term.buffer_contains("LDK ← Runner: pong"));
    }
}
