//! Inline search prompt drawn over the bottom border of the log

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

pub struct SearchInput<'a> {
    query: &'a str,
    /// Typing mode shows a cursor
    active: bool,
    matches: usize,
    total: usize,
}

impl<'a> SearchInput<'a> {
    pub fn new(query: &'a str, active: bool) -> Self {
        Self {
            query,
            active,
            matches: 0,
            total: 0,
        }
    }

    pub fn counts(mut self, matches: usize, total: usize) -> Self {
        self.matches = matches;
        self.total = total;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                "/",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.query, Style::default().fg(Color::White)),
        ];

        if self.active {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }

        if !self.query.trim().is_empty() {
            let status_style = if self.matches > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("[{}/{} matches]", self.matches, self.total),
                status_style,
            ));
        }

        let line = Line::from(spans);
        let width = (line.width() as u16).saturating_add(1).min(area.width);
        let bar = Rect { width, ..area };
        Clear.render(bar, buf);
        Paragraph::new(line).render(bar, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_active_prompt_shows_cursor() {
        let mut term = TestTerminal::with_size(40, 1);
        term.render_widget(SearchInput::new("pin", true).counts(2, 9), term.area());

        assert!(term.buffer_contains("/pin_ [2/9 matches]"));
    }

    #[test]
    fn test_inactive_empty_prompt() {
        let mut term = TestTerminal::with_size(40, 1);
        term.render_widget(SearchInput::new("", false), term.area());

        assert!(term.line_contains(0, "/"));
        assert!(!term.buffer_contains("matches"));
    }
}
