//! Bottom status line: a transient notice, or key hints for the current mode

use lnviz_app::state::{Notice, NoticeLevel};
use lnviz_app::UiMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

use super::key_hint;

pub struct StatusBar<'a> {
    mode: UiMode,
    connected: bool,
    notice: Option<&'a Notice>,
}

impl<'a> StatusBar<'a> {
    pub fn new(mode: UiMode, connected: bool) -> Self {
        Self {
            mode,
            connected,
            notice: None,
        }
    }

    pub fn notice(mut self, notice: Option<&'a Notice>) -> Self {
        self.notice = notice;
        self
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let pairs: &[(&'static str, &'static str)] = match self.mode {
            UiMode::Normal if self.connected => &[
                ("c", "disconnect  "),
                ("m", "compose  "),
                ("t", "templates  "),
                ("s", "send  "),
                ("x", "sequence  "),
                ("/", "search  "),
                ("e", "export  "),
                ("y", "copy  "),
                ("q", "quit"),
            ],
            UiMode::Normal => &[
                ("c", "connect  "),
                ("/", "search  "),
                ("⏎", "expand  "),
                ("T", "timestamps  "),
                ("e", "export  "),
                ("y", "copy  "),
                ("C", "clear  "),
                ("q", "quit"),
            ],
            UiMode::SearchInput => &[("Enter", "apply  "), ("Esc", "clear  "), ("^U", "erase")],
            UiMode::Compose => &[("Tab", "switch field  "), ("Enter", "send  "), ("Esc", "cancel")],
            UiMode::TemplatePicker => &[("↑↓", "move  "), ("Enter", "select  "), ("Esc", "close")],
        };

        let mut spans = vec![Span::raw(" ")];
        for &(key, label) in pairs {
            spans.extend(key_hint(key, label));
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => palette::STATUS_GREEN,
                    NoticeLevel::Warning => palette::STATUS_YELLOW,
                    NoticeLevel::Error => palette::STATUS_RED,
                };
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(notice.text.clone(), Style::default().fg(color)),
                ])
            }
            None => Line::from(self.hints()),
        };
        Paragraph::new(line).render(area, buf);
    }
}
