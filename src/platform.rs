//! Keyboard shortcuts shared by the key handler and the status bar

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Submit shortcut display
/// Ctrl+S on all platforms (Cmd is not reported by most terminals)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Quit shortcut display
pub const QUIT_SHORTCUT: &str = "Ctrl+C";

pub fn is_submit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s')
}

pub fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
