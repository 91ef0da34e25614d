//! Log view state - cursor, scroll position, row expansion and search query.
//!
//! Shared by the handler layer (navigation commands) and the TUI layer
//! (which reports the viewport size on every frame).

use std::collections::HashSet;

/// State for the message log panel.
///
/// `cursor` and `offset` are positions in the *filtered* row list; `expanded`
/// holds history indices so expansion survives filter changes.
#[derive(Debug)]
pub struct LogViewState {
    /// Selected row in the filtered list
    pub cursor: usize,
    /// First visible row
    pub offset: usize,
    /// Follow the newest message
    pub auto_scroll: bool,
    /// Rows in the filtered list (set during render)
    pub total_rows: usize,
    /// Rows that fit in the viewport (set during render)
    pub visible_rows: usize,
    /// History indices whose payload is shown pretty-printed
    pub expanded: HashSet<usize>,
    pub show_timestamps: bool,
    /// Active filter text, empty for none
    pub search_query: String,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            auto_scroll: true,
            total_rows: 0,
            visible_rows: 0,
            expanded: HashSet::new(),
            show_timestamps: true,
            search_query: String::new(),
        }
    }

    fn last_row(&self) -> usize {
        self.total_rows.saturating_sub(1)
    }

    /// Move the cursor up by n rows
    pub fn scroll_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.auto_scroll = false;
        self.keep_cursor_visible();
    }

    /// Move the cursor down by n rows
    pub fn scroll_down(&mut self, n: usize) {
        self.cursor = (self.cursor + n).min(self.last_row());

        // Re-enable auto-scroll when the newest row is reached
        if self.cursor >= self.last_row() {
            self.auto_scroll = true;
        }
        self.keep_cursor_visible();
    }

    pub fn scroll_to_top(&mut self) {
        self.cursor = 0;
        self.offset = 0;
        self.auto_scroll = false;
    }

    /// Jump to the newest row and follow new messages
    pub fn scroll_to_bottom(&mut self) {
        self.cursor = self.last_row();
        self.auto_scroll = true;
        self.keep_cursor_visible();
    }

    pub fn page_up(&mut self) {
        let page = self.visible_rows.saturating_sub(1).max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_rows.saturating_sub(1).max(1);
        self.scroll_down(page);
    }

    /// Update with new content size; follows the newest row when auto-scroll is on
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_rows = total;
        self.visible_rows = visible;

        if self.auto_scroll {
            self.cursor = self.last_row();
        } else {
            self.cursor = self.cursor.min(self.last_row());
        }
        self.keep_cursor_visible();
    }

    fn keep_cursor_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.visible_rows > 0 && self.cursor >= self.offset + self.visible_rows {
            self.offset = self.cursor + 1 - self.visible_rows;
        }
        let max_offset = self.total_rows.saturating_sub(self.visible_rows);
        self.offset = self.offset.min(max_offset);
    }

    pub fn toggle_auto_scroll(&mut self) {
        self.auto_scroll = !self.auto_scroll;
        if self.auto_scroll {
            self.scroll_to_bottom();
        }
    }

    pub fn toggle_timestamps(&mut self) {
        self.show_timestamps = !self.show_timestamps;
    }

    /// Flip expansion of the given history index
    pub fn toggle_expanded(&mut self, history_index: usize) {
        if !self.expanded.remove(&history_index) {
            self.expanded.insert(history_index);
        }
    }

    pub fn is_expanded(&self, history_index: usize) -> bool {
        self.expanded.contains(&history_index)
    }

    /// Forget position and expansion; used when history is cleared
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
        self.total_rows = 0;
        self.expanded.clear();
    }

    /// Set the filter text; the cursor restarts from the top of the new result
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }
}
