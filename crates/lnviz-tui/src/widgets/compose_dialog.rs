//! Raw-message compose modal

use lnviz_app::handler::parse_content;
use lnviz_app::state::{ComposeField, ComposeState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

use super::{key_hint, modal_overlay};

const WIDTH: u16 = 64;
const HEIGHT: u16 = 12;

pub struct ComposeDialog<'a> {
    compose: &'a ComposeState,
}

impl<'a> ComposeDialog<'a> {
    pub fn new(compose: &'a ComposeState) -> Self {
        Self { compose }
    }

    fn label(&self, text: &'static str, field: ComposeField) -> Line<'static> {
        let style = if self.compose.field == field {
            styles::accent().add_modifier(Modifier::BOLD)
        } else {
            styles::text_secondary()
        };
        Line::styled(text, style)
    }

    fn input(&self, value: &'a str, field: ComposeField, placeholder: &'static str) -> Line<'a> {
        let focused = self.compose.field == field;
        let bg = Style::default().bg(palette::INPUT_BG);
        let mut spans = vec![Span::styled(
            if focused { "› " } else { "  " },
            styles::accent(),
        )];
        if value.is_empty() && !focused {
            spans.push(Span::styled(placeholder, styles::text_muted()));
        } else {
            spans.push(Span::styled(value, styles::text_primary()));
        }
        if focused {
            spans.push(Span::styled("_", styles::status_yellow()));
        }
        Line::from(spans).style(bg)
    }

    /// What the content field will be sent as
    fn preview(&self) -> Line<'static> {
        let parsed = parse_content(&self.compose.content).to_string();
        Line::from(vec![
            Span::styled("sends ", styles::text_muted()),
            Span::styled(parsed, Style::default().fg(palette::PAYLOAD)),
        ])
    }
}

impl Widget for ComposeDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::open_modal(buf, area, WIDTH, HEIGHT);
        let block = styles::modal_block(" Send Raw Message ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let status = match &self.compose.error {
            Some(error) => Line::styled(error.clone(), styles::status_red()),
            None => Line::raw(""),
        };

        let mut hints = Vec::new();
        hints.extend(key_hint("Tab", "switch field  "));
        hints.extend(key_hint("Enter", "send  "));
        hints.extend(key_hint("Esc", "cancel"));

        let lines = vec![
            self.label("Message type", ComposeField::Type),
            self.input(&self.compose.msg_type, ComposeField::Type, "e.g. ping"),
            Line::raw(""),
            self.label("Content (JSON object or plain text)", ComposeField::Content),
            self.input(
                &self.compose.content,
                ComposeField::Content,
                r#"e.g. {"num_pong_bytes": 1}"#,
            ),
            self.preview(),
            Line::raw(""),
            status,
            Line::from(hints),
        ];

        Paragraph::new(lines)
            .style(Style::default().bg(palette::POPUP_BG))
            .render(inner, buf);
    }
}
