//! Scrollable message log with search filter and expandable payloads

use lnviz_app::log_view_state::LogViewState;
use lnviz_core::MessageEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

use crate::theme::{palette, styles};


pub const EMPTY_HISTORY: &str = "No messages yet. Start by connecting!";
pub const NO_MATCHES: &str = "No messages match your search.";

/// Log view widget. `rows` holds the history indices to show, in order.
pub struct LogView<'a> {
    history: &'a [MessageEvent],
    rows: &'a [usize],
    focused: bool,
}

impl<'a> LogView<'a> {
    pub fn new(history: &'a [MessageEvent], rows: &'a [usize]) -> Self {
        Self {
            history,
            rows,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self, state: &LogViewState) -> Line<'static> {
        let mut spans = vec![Span::styled(" Message Log ", styles::title())];
        if state.has_search() {
            spans.push(Span::styled(
                format!("({}/{}) ", self.rows.len(), self.history.len()),
                styles::status_yellow(),
            ));
        } else {
            spans.push(Span::styled(
                format!("({}) ", self.history.len()),
                styles::text_muted(),
            ));
        }
        Line::from(spans)
    }

    fn scroll_indicator(state: &LogViewState) -> Line<'static> {
        if state.auto_scroll {
            Line::styled(" ⬇ Auto ", Style::default().fg(palette::STATUS_GREEN))
        } else {
            Line::styled(" ⬆ Manual ", styles::status_yellow())
        }
    }

    /// Lines one row occupies: the summary plus the payload when expanded
    fn row_height(&self, history_index: usize, state: &LogViewState) -> usize {
        match self.history.get(history_index) {
            Some(event) if state.is_expanded(history_index) => {
                1 + event.data_pretty().lines().count()
            }
            _ => 1,
        }
    }

    /// Move `offset` forward until the cursor row is fully on screen
    fn fit_cursor(&self, state: &mut LogViewState, height: usize) {
        while state.offset < state.cursor {
            let used: usize = self.rows[state.offset..=state.cursor]
                .iter()
                .map(|&i| self.row_height(i, state))
                .sum();
            if used <= height {
                break;
            }
            state.offset += 1;
        }
    }

    fn row_lines(&self, history_index: usize, selected: bool, state: &LogViewState) -> Vec<Line<'a>> {
        let Some(event) = self.history.get(history_index) else {
            return Vec::new();
        };
        let expanded = state.is_expanded(history_index);

        let mut summary = format_summary(event, state.show_timestamps, expanded);
        if selected {
            summary = summary.style(Style::default().bg(palette::INPUT_BG));
            summary.spans.insert(0, Span::styled("▌", styles::accent()));
        } else {
            summary.spans.insert(0, Span::raw(" "));
        }

        let mut lines = vec![summary];
        if expanded {
            lines.extend(
                event
                    .data_pretty()
                    .lines()
                    .map(|l| Line::styled(format!("    {l}"), Style::default().fg(palette::PAYLOAD))),
            );
        }
        lines
    }
}

/// Summary line of one message:
/// `12:00:01.123  #2  init  RUNNER → LDK  {"msgtype":"init"}`
pub fn format_summary(event: &MessageEvent, show_timestamp: bool, expanded: bool) -> Line<'static> {
    let direction_style = styles::log_direction(event.direction);
    let (from, to) = event.direction.endpoints();
    let mut spans = Vec::with_capacity(10);

    spans.push(Span::styled(
        if expanded { "▾ " } else { "▸ " },
        styles::text_muted(),
    ));
    if show_timestamp {
        spans.push(Span::styled(
            format!("{} ", event.format_time()),
            styles::text_muted(),
        ));
    }
    if let Some(step) = event.step {
        spans.push(Span::styled(
            format!(" #{step} "),
            Style::default()
                .fg(palette::TEXT_SECONDARY)
                .bg(palette::STEP_BADGE_BG),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        event.event.clone(),
        direction_style.add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(from.short_tag(), styles::node(from)));
    spans.push(Span::styled(
        format!(" {} ", event.direction.arrow()),
        styles::text_muted(),
    ));
    spans.push(Span::styled(to.short_tag(), styles::node(to)));

    if !expanded {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(event.data_compact(), styles::text_muted()));
    }

    Line::from(spans)
}

impl StatefulWidget for LogView<'_> {
    type State = LogViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = styles::glass_block(self.focused)
            .title(self.title(state))
            .title_bottom(Self::scroll_indicator(state).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.rows.is_empty() {
            state.update_content_size(0, inner.height as usize);
            let text = if self.history.is_empty() {
                EMPTY_HISTORY
            } else {
                NO_MATCHES
            };
            let y = inner.y + inner.height / 2;
            Paragraph::new(Line::styled(text, styles::text_muted()))
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
            return;
        }

        let height = inner.height as usize;
        state.update_content_size(self.rows.len(), height);
        self.fit_cursor(state, height);

        let mut lines: Vec<Line> = Vec::with_capacity(height);
        for (pos, &history_index) in self.rows.iter().enumerate().skip(state.offset) {
            if lines.len() >= height {
                break;
            }
            lines.extend(self.row_lines(history_index, pos == state.cursor, state));
        }
        lines.truncate(height);

        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        Paragraph::new(lines).render(text_area, buf);

        if self.rows.len() > height {
            let mut scrollbar_state = ScrollbarState::new(self.rows.len()).position(state.offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(Some("│"))
                .thumb_symbol("┃")
                .render(inner, buf, &mut scrollbar_state);
        }
    }
}
