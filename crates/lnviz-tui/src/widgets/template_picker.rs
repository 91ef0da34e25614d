//! Canned template picker modal

use lnviz_core::MessageTemplate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

use super::{key_hint, modal_overlay};

const WIDTH: u16 = 70;

pub struct TemplatePicker<'a> {
    catalog: &'a [MessageTemplate],
    cursor: usize,
    selected: Option<usize>,
}

impl<'a> TemplatePicker<'a> {
    pub fn new(catalog: &'a [MessageTemplate], cursor: usize) -> Self {
        Self {
            catalog,
            cursor,
            selected: None,
        }
    }

    /// Currently selected template, marked with a check
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    fn row(&self, index: usize, template: &'a MessageTemplate) -> Line<'a> {
        let mark = if self.selected == Some(index) { "✓ " } else { "  " };
        let text = format!("{mark}{:<24}{:<12}", template.name, template.category.label());

        if index == self.cursor {
            Line::from(vec![
                Span::styled(text, styles::focused_selected()),
                Span::styled(template.description, styles::focused_selected()),
            ])
        } else {
            Line::from(vec![
                Span::styled(text, styles::text_primary()),
                Span::styled(template.description, styles::text_muted()),
            ])
        }
    }
}

impl Widget for TemplatePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.catalog.len() as u16 + 4;
        let modal = modal_overlay::open_modal(buf, area, WIDTH, height);
        let block = styles::modal_block(" Message Templates ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines: Vec<Line> = self
            .catalog
            .iter()
            .enumerate()
            .map(|(i, t)| self.row(i, t))
            .collect();

        let mut hints = vec![Span::raw("")];
        hints.extend(key_hint("↑↓", "move  "));
        hints.extend(key_hint("Enter", "select  "));
        hints.extend(key_hint("Esc", "close"));
        lines.push(Line::raw(""));
        lines.push(Line::from(hints));

        // Keep the cursor on screen when the terminal is short
        let visible = inner.height.saturating_sub(2) as usize;
        let scroll = (self.cursor + 1).saturating_sub(visible);
        if scroll > 0 {
            let footer = lines.split_off(self.catalog.len());
            lines.drain(..scroll);
            lines.truncate(visible);
            lines.extend(footer);
        }

        Paragraph::new(lines)
            .style(Style::default().bg(palette::POPUP_BG))
            .render(inner, buf);
    }
}
