//! Semantic style builders

use lnviz_core::{ConnectionStatus, Direction, NodeRole};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn title() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent / status ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - focused row or option
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Domain styles ---

/// Color of a message travelling in `direction`, matching its source node
pub fn edge(direction: Direction) -> Style {
    let (from, _) = direction.endpoints();
    node(from)
}

pub fn node(role: NodeRole) -> Style {
    let color = match role {
        NodeRole::Runner => palette::RUNNER,
        NodeRole::Ldk => palette::LDK,
    };
    Style::default().fg(color)
}

/// Log row accent for a direction
pub fn log_direction(direction: Direction) -> Style {
    match direction {
        Direction::Out => Style::default().fg(palette::LOG_OUTGOING),
        Direction::In => Style::default().fg(palette::LOG_INCOMING),
    }
}

/// Status dot, label and style for the connection badge
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Style) {
    match status {
        ConnectionStatus::Connected => (
            "●",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        ConnectionStatus::Connecting => (
            "◐",
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        ConnectionStatus::Disconnected => ("○", Style::default().fg(palette::STATUS_RED)),
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(self::title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}
