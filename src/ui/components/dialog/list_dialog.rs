//! Single-pick list dialog for dropdowns and recovery questions

use super::base::{centered_rect, hint_line, open_frame};
use crate::state::{ListDialog, ListKind};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

pub fn render_list_dialog(frame: &mut Frame, dialog: &ListDialog) {
    let title = match dialog.kind {
        ListKind::Options => "Select",
        ListKind::Question => "Account Recovery Question",
    };
    let width = dialog
        .items
        .iter()
        .map(|(_, label)| label.chars().count() as u16 + 6)
        .max()
        .unwrap_or(0)
        .clamp(30, 70);
    let height = (dialog.items.len() as u16).clamp(1, 12) + 4;

    let area = centered_rect(frame.area(), width, height);
    let inner = open_frame(frame, area, title, Color::Cyan);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if dialog.items.is_empty() {
        frame.render_widget(
            Paragraph::new("No options").style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );
    } else {
        let items: Vec<ListItem> = dialog
            .items
            .iter()
            .map(|(_, label)| ListItem::new(label.clone()))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");
        render_scrollable_list(frame, chunks[0], list, dialog.highlighted);
    }

    frame.render_widget(
        Paragraph::new(hint_line(&[("↑/↓", "move"), ("Enter", "pick"), ("Esc", "cancel")])),
        chunks[1],
    );
}
