//! Application state (Model in TEA pattern)

use std::time::{Duration, Instant};

use lnviz_core::{
    default_catalog, filter_indices, ConnectionStatus, Direction, MessageEvent, MessageStats,
    MessageTemplate,
};

use crate::config::Settings;
use crate::log_view_state::LogViewState;

/// How long a status-line notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Dashboard with keyboard shortcuts active
    #[default]
    Normal,

    /// Typing a log filter
    SearchInput,

    /// Raw message compose modal
    Compose,

    /// Canned template picker modal
    TemplatePicker,
}

// ─────────────────────────────────────────────────────────────────────────────
// Compose modal
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Type,
    Content,
}

/// Fields of the raw-message compose modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeState {
    pub msg_type: String,
    pub content: String,
    pub field: ComposeField,
    /// Inline validation hint
    pub error: Option<String>,
}

impl ComposeState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Text of the focused field
    pub fn active_text(&self) -> &str {
        match self.field {
            ComposeField::Type => &self.msg_type,
            ComposeField::Content => &self.content,
        }
    }

    pub fn set_active_text(&mut self, text: String) {
        match self.field {
            ComposeField::Type => self.msg_type = text,
            ComposeField::Content => self.content = text,
        }
        self.error = None;
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            ComposeField::Type => ComposeField::Content,
            ComposeField::Content => ComposeField::Type,
        };
    }
}

/// Cursor of the template picker modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePickerState {
    pub cursor: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Flow view
// ─────────────────────────────────────────────────────────────────────────────

/// The single animated edge for the most recent message
#[derive(Debug, Clone, PartialEq)]
pub struct TransientEdge {
    pub direction: Direction,
    pub label: String,
    pub shown_at: Instant,
}

/// Flow diagram state. A newer message replaces the edge; there is no queue.
#[derive(Debug, Clone)]
pub struct FlowState {
    pub edge: Option<TransientEdge>,
    pub display: Duration,
}

impl FlowState {
    pub fn new(display: Duration) -> Self {
        Self {
            edge: None,
            display,
        }
    }

    pub fn show(&mut self, event: &MessageEvent, now: Instant) {
        self.edge = Some(TransientEdge {
            direction: event.direction,
            label: event.event.clone(),
            shown_at: now,
        });
    }

    /// Drop the edge once its display time has elapsed
    pub fn expire(&mut self, now: Instant) {
        if let Some(edge) = &self.edge {
            if now.saturating_duration_since(edge.shown_at) >= self.display {
                self.edge = None;
            }
        }
    }

    pub fn visible_edge(&self, now: Instant) -> Option<&TransientEdge> {
        self.edge
            .as_ref()
            .filter(|edge| now.saturating_duration_since(edge.shown_at) < self.display)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notices
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Short-lived status-line message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub settings: Settings,
    quitting: bool,

    /// Process-wide connection status
    pub status: ConnectionStatus,
    /// Mirrors `status == Connected`
    pub connected: bool,
    /// Whether the user wants to stay connected
    pub intent_connected: bool,
    /// Bumped on every intent change; async results from older epochs are dropped
    pub epoch: u64,

    /// Ordered message history; identity of an entry is its index
    pub history: Vec<MessageEvent>,
    pub catalog: Vec<MessageTemplate>,
    pub selected_template: Option<usize>,

    pub log_view: LogViewState,
    pub flow: FlowState,
    pub compose: ComposeState,
    pub picker: TemplatePickerState,

    pub notice: Option<Notice>,
    pub sequences_completed: u32,
    pub last_sequence_id: Option<String>,
    pub last_push_error: Option<String>,

    /// Text the TUI should place on the clipboard on the next frame
    pub clipboard_request: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut log_view = LogViewState::new();
        log_view.show_timestamps = settings.log.show_timestamps;
        log_view.auto_scroll = settings.log.auto_scroll;

        Self {
            ui_mode: UiMode::Normal,
            flow: FlowState::new(settings.flow.edge_display()),
            settings,
            quitting: false,
            status: ConnectionStatus::Disconnected,
            connected: false,
            intent_connected: false,
            epoch: 0,
            history: Vec::new(),
            catalog: default_catalog(),
            selected_template: None,
            log_view,
            compose: ComposeState::default(),
            picker: TemplatePickerState::default(),
            notice: None,
            sequences_completed: 0,
            last_sequence_id: None,
            last_push_error: None,
            clipboard_request: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    // ─────────────────────────────────────────────────────────
    // Store operations
    // ─────────────────────────────────────────────────────────

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.connected = status.is_connected();
    }

    /// Replace history wholesale.
    ///
    /// Expansion is kept only when the new list extends the old one, since
    /// entries are identified by index. A longer list animates its last entry.
    pub fn set_messages(&mut self, messages: Vec<MessageEvent>) {
        let old_len = self.history.len();
        let extends = messages.len() >= old_len && messages[..old_len] == self.history[..];
        if !extends {
            self.log_view.expanded.clear();
        }

        if messages.len() > old_len {
            if let Some(last) = messages.last() {
                self.flow.show(last, Instant::now());
            }
        }
        self.history = messages;
    }

    /// Append one message and animate it on the flow view
    pub fn add_message(&mut self, event: MessageEvent) {
        self.flow.show(&event, Instant::now());
        self.history.push(event);
    }

    pub fn clear_messages(&mut self) {
        self.history.clear();
        self.log_view.reset();
    }

    /// Set or clear the selected canned template. Out-of-range indices clear.
    pub fn select_template(&mut self, index: Option<usize>) {
        self.selected_template = index.filter(|i| *i < self.catalog.len());
    }

    // ─────────────────────────────────────────────────────────
    // Projections
    // ─────────────────────────────────────────────────────────

    pub fn selected_template(&self) -> Option<&MessageTemplate> {
        self.selected_template.and_then(|i| self.catalog.get(i))
    }

    /// History indices matching the current search query
    pub fn filtered_indices(&self) -> Vec<usize> {
        filter_indices(&self.history, &self.log_view.search_query)
    }

    /// History index under the log cursor, if any
    pub fn cursor_history_index(&self) -> Option<usize> {
        self.filtered_indices().get(self.log_view.cursor).copied()
    }

    pub fn stats(&self) -> MessageStats {
        MessageStats::from_events(&self.history)
    }

    pub fn latest_message(&self) -> Option<&MessageEvent> {
        self.history.last()
    }

    // ─────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────

    pub fn notify(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notice = Some(Notice {
            text: text.into(),
            level,
            expires_at: Instant::now() + NOTICE_DURATION,
        });
    }

    /// Expire time-bound UI elements; called on every tick
    pub fn tick(&mut self, now: Instant) {
        self.flow.expire(now);
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
        }
    }
}
