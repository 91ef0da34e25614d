//! Detail panel: history statistics, the latest message and the selected
//! canned template.

use lnviz_core::{MessageEvent, MessageStats, MessageTemplate};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::{palette, styles};

use super::key_hint;

const STATS_HEIGHT: u16 = 6;

pub struct DetailPanel<'a> {
    stats: MessageStats,
    latest: Option<&'a MessageEvent>,
    template: Option<&'a MessageTemplate>,
    sequences_completed: u32,
}

impl<'a> DetailPanel<'a> {
    pub fn new(stats: MessageStats) -> Self {
        Self {
            stats,
            latest: None,
            template: None,
            sequences_completed: 0,
        }
    }

    pub fn latest(mut self, latest: Option<&'a MessageEvent>) -> Self {
        self.latest = latest;
        self
    }

    pub fn template(mut self, template: Option<&'a MessageTemplate>) -> Self {
        self.template = template;
        self
    }

    pub fn sequences_completed(mut self, count: u32) -> Self {
        self.sequences_completed = count;
        self
    }

    fn stats_lines(&self) -> Vec<Line<'static>> {
        let row = |label: &'static str, value: usize, color| {
            Line::from(vec![
                Span::styled(format!("{label:<16}"), styles::text_secondary()),
                Span::styled(
                    value.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        };
        vec![
            row("Total Messages", self.stats.total, palette::TEXT_PRIMARY),
            row("Outgoing", self.stats.outgoing, palette::LOG_OUTGOING),
            row("Incoming", self.stats.incoming, palette::LOG_INCOMING),
            row("Unique Events", self.stats.unique_events, palette::ACCENT),
        ]
    }

    fn latest_lines(&self) -> Vec<Line<'static>> {
        let Some(event) = self.latest else {
            return vec![Line::styled("No messages received yet.", styles::text_muted())];
        };

        let badge_style = styles::log_direction(event.direction).add_modifier(Modifier::REVERSED);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", event.direction.label()), badge_style),
                Span::raw(" "),
                Span::styled(
                    event.event.clone(),
                    styles::text_primary().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(event.format_time(), styles::text_muted()),
        ];
        if self.sequences_completed > 0 {
            lines.push(Line::styled(
                format!("Sequences completed: {}", self.sequences_completed),
                styles::text_muted(),
            ));
        }
        lines.extend(
            event
                .data_pretty()
                .lines()
                .map(|l| Line::styled(l.to_string(), Style::default().fg(palette::PAYLOAD))),
        );
        lines
    }

    fn template_lines(&self) -> Vec<Line<'static>> {
        let Some(template) = self.template else {
            let mut hint = vec![Span::styled("Select a template with ", styles::text_muted())];
            hint.extend(key_hint("t", "to view its details"));
            return vec![Line::from(hint)];
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", template.category.label()),
                    Style::default().fg(palette::CONTRAST_FG).bg(palette::ACCENT),
                ),
                Span::raw(" "),
                Span::styled(
                    template.name,
                    styles::text_primary().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(template.description, styles::text_secondary()),
        ];
        let preview = serde_json_pretty(&template.payload);
        lines.extend(
            preview
                .lines()
                .map(|l| Line::styled(l.to_string(), Style::default().fg(palette::PAYLOAD))),
        );
        let mut send = vec![Span::raw("")];
        send.extend(key_hint("s", "send"));
        lines.push(Line::from(send));
        lines
    }
}

fn serde_json_pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn section(title: &'static str, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let block = styles::glass_block(false).title(Line::styled(format!(" {title} "), styles::title()));
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block)
        .render(area, buf);
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let [stats, latest, template] = Layout::vertical([
            Constraint::Length(STATS_HEIGHT),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        section("Statistics", self.stats_lines(), stats, buf);
        section("Latest Message", self.latest_lines(), latest, buf);
        section("Selected Template", self.template_lines(), template, buf);
    }
}
