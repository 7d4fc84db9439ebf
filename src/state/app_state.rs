//! Application state definitions
//!
//! Everything here is transient UI state. Committed field values live in the
//! session's `FormState`; drafts only reach it through a codec.

use super::Dialog;
use std::collections::{HashMap, VecDeque};

/// Per-field UI state that never reaches the form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUiState {
    /// Text typed since the last commit
    pub draft: Option<String>,
    /// Focused phone segment
    pub segment: usize,
    /// Highlighted option for inline choices
    pub highlighted: usize,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Index into the focus order (schema fields, then preferences)
    pub active_field: usize,
    pub field_ui: HashMap<String, FieldUiState>,
    /// Open picker dialog, if any
    pub dialog: Option<Dialog>,
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Move focus forward, wrapping around
    pub fn next_field(&mut self, count: usize) {
        if count > 0 {
            self.active_field = (self.active_field + 1) % count;
        }
    }

    /// Move focus backward, wrapping around
    pub fn prev_field(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if self.active_field == 0 {
            self.active_field = count - 1;
        } else {
            self.active_field -= 1;
        }
    }

    pub fn field_ui(&self, name: &str) -> FieldUiState {
        self.field_ui.get(name).cloned().unwrap_or_default()
    }

    pub fn field_ui_mut(&mut self, name: &str) -> &mut FieldUiState {
        self.field_ui.entry(name.to_string()).or_default()
    }

    /// Append a character to the draft, starting from `committed` if no draft exists
    pub fn input_char(&mut self, name: &str, c: char, committed: &str) {
        self.field_ui_mut(name)
            .draft
            .get_or_insert_with(|| committed.to_string())
            .push(c);
    }

    /// Remove the last draft character, starting from `committed` if no draft exists
    pub fn backspace(&mut self, name: &str, committed: &str) {
        self.field_ui_mut(name)
            .draft
            .get_or_insert_with(|| committed.to_string())
            .pop();
    }

    /// Take the pending draft for a field
    pub fn take_draft(&mut self, name: &str) -> Option<String> {
        self.field_ui.get_mut(name).and_then(|ui| ui.draft.take())
    }

    /// Move the inline highlight within `len` options
    pub fn move_highlight(&mut self, name: &str, forward: bool, len: usize) {
        if len == 0 {
            return;
        }
        let ui = self.field_ui_mut(name);
        ui.highlighted = if forward {
            (ui.highlighted + 1) % len
        } else {
            (ui.highlighted + len - 1) % len
        };
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the error dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        let mut state = AppState::default();
        state.prev_field(3);
        assert_eq!(state.active_field, 2);
        state.next_field(3);
        assert_eq!(state.active_field, 0);
        state.next_field(0);
        assert_eq!(state.active_field, 0);
    }

    #[test]
    fn test_draft_starts_from_committed_text() {
        let mut state = AppState::default();
        state.input_char("nick_name", 'o', "ne");
        state.input_char("nick_name", '!', "ignored");
        assert_eq!(state.field_ui("nick_name").draft.as_deref(), Some("neo!"));

        assert_eq!(state.take_draft("nick_name").as_deref(), Some("neo!"));
        assert_eq!(state.take_draft("nick_name"), None);
    }

    #[test]
    fn test_backspace_on_committed_text() {
        let mut state = AppState::default();
        state.backspace("nick_name", "neo");
        assert_eq!(state.take_draft("nick_name").as_deref(), Some("ne"));
    }

    #[test]
    fn test_highlight_wraps_both_ways() {
        let mut state = AppState::default();
        state.move_highlight("gender", false, 3);
        assert_eq!(state.field_ui("gender").highlighted, 2);
        state.move_highlight("gender", true, 3);
        assert_eq!(state.field_ui("gender").highlighted, 0);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".into());
        state.push_error("second".into());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }
}
