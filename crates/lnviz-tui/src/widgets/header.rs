//! Header bar: title, backend address, connection badge and toggle hint

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use lnviz_core::ConnectionStatus;

use crate::theme::{palette, styles};

use super::key_hint;

pub struct MainHeader<'a> {
    status: ConnectionStatus,
    base_url: &'a str,
    node_id: &'a str,
}

impl<'a> MainHeader<'a> {
    pub fn new(status: ConnectionStatus, base_url: &'a str, node_id: &'a str) -> Self {
        Self {
            status,
            base_url,
            node_id,
        }
    }

    fn title_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("⚡", styles::status_yellow()),
            Span::raw(" "),
            Span::styled(
                "Lightning Message Flow",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" / ", styles::text_muted()),
            Span::styled(self.base_url, styles::text_secondary()),
            Span::styled(" node ", styles::text_muted()),
            Span::styled(self.node_id, styles::text_secondary()),
        ])
    }

    /// Right-hand badge, e.g. `● Connected  [c] Disconnect`
    fn badge_line(&self) -> Line<'static> {
        let (dot, style) = styles::connection_indicator(self.status);
        let mut spans = vec![
            Span::styled(dot, style),
            Span::raw(" "),
            Span::styled(self.status.label(), style),
            Span::raw("  "),
        ];
        if self.status == ConnectionStatus::Connecting {
            spans.push(Span::styled("please wait ", styles::text_muted()));
        } else {
            spans.extend(key_hint("c", self.status.toggle_label()));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let badge = self.badge_line();
        let badge_width = badge.width() as u16;
        let title = self.title_line();

        // The badge wins when space is short; the title is truncated
        let title_width = inner.width.saturating_sub(badge_width + 1);
        buf.set_line(inner.x, inner.y, &title, title_width);

        if badge_width <= inner.width {
            let x = inner.x + inner.width - badge_width;
            buf.set_line(x, inner.y, &badge, badge_width);
        }
    }
}
