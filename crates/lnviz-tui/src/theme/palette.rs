//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);
pub const INPUT_BG: Color = Color::Rgb(40, 44, 56);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const CONTRAST_FG: Color = Color::Black;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;

// --- Nodes and edges ---
/// Runner node and Runner → LDK edges
pub const RUNNER: Color = Color::LightBlue;
/// LDK node and LDK → Runner edges
pub const LDK: Color = Color::Yellow;
pub const INIT_EDGE: Color = Color::Gray;

// --- Log rows ---
pub const LOG_OUTGOING: Color = Color::LightBlue;
pub const LOG_INCOMING: Color = Color::LightGreen;
pub const STEP_BADGE_BG: Color = Color::Rgb(45, 51, 59);
pub const PAYLOAD: Color = Color::Gray;
