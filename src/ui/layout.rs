//! Layout components (content area, status bar)

use crate::app::{App, Focus, Widget};
use crate::platform::{QUIT_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split off the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.title()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    if let Some(ref msg) = app.state.status_message {
        spans.push(Span::styled(
            format!(" {msg} "),
            Style::default().fg(Color::Green),
        ));
    }

    let hints = focus_hints(app);
    spans.push(Span::styled(
        format!(" {hints}"),
        Style::default().fg(Color::Gray),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_hint = format!(" {QUIT_SHORTCUT}:quit ");
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused entry
fn focus_hints(app: &App) -> String {
    let widget = match app.focused() {
        Some(Focus::Field(name)) => app.widget(&name),
        Some(Focus::Preference(_)) => {
            return format!("←/→:choose  Space:select  Tab:next  {SUBMIT_SHORTCUT}:submit");
        }
        None => None,
    };
    let field_hint = match widget {
        Some(Widget::Text { multiline: true }) => "type  Enter:newline",
        Some(Widget::Text { .. }) => "type  Enter:commit",
        Some(Widget::Phone) => "digits  ←/→:segment  Enter:commit",
        Some(Widget::Address) => "type:detail  Enter:look up",
        Some(Widget::Question) => "type:answer  Enter:question",
        Some(Widget::Date) => "Enter:pick date",
        Some(Widget::Image) => "Enter:choose image",
        Some(Widget::Choice { many: true, .. }) => "←/→:choose  Space:toggle",
        Some(Widget::Choice { .. }) => "←/→:choose  Space:select",
        Some(Widget::Dropdown(_)) => "Enter:select",
        Some(Widget::Unresolved(_)) | None => "",
    };
    format!("{field_hint}  Tab:next  {SUBMIT_SHORTCUT}:submit")
}
