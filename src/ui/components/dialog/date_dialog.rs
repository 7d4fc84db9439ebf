//! Date picker dialog

use super::base::{centered_rect, hint_line, open_frame};
use crate::state::{DateDialog, DatePart};
use chrono::Datelike;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_date_dialog(frame: &mut Frame, dialog: &DateDialog) {
    let area = centered_rect(frame.area(), 44, 7);
    let inner = open_frame(frame, area, "Pick a Date", Color::Cyan);

    let part = |text: String, which: DatePart| {
        let style = if dialog.part == which {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        Span::styled(text, style)
    };
    let date = dialog.date;

    let content = vec![
        Line::from(vec![
            part(format!("{:04}", date.year()), DatePart::Year),
            Span::raw(" - "),
            part(format!("{:02}", date.month()), DatePart::Month),
            Span::raw(" - "),
            part(format!("{:02}", date.day()), DatePart::Day),
        ])
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            date.format("%A").to_string(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        hint_line(&[
            ("←/→", "part"),
            ("↑/↓", "change"),
            ("Enter", "pick"),
            ("Esc", "cancel"),
        ]),
    ];
    frame.render_widget(Paragraph::new(content), inner);
}
