//! Image path prompt

use super::base::{centered_rect, hint_line, open_frame};
use crate::state::ImageDialog;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_image_dialog(frame: &mut Frame, dialog: &ImageDialog) {
    let area = centered_rect(frame.area(), 64, 7);
    let inner = open_frame(frame, area, "Choose Image", Color::Cyan);

    let content = vec![
        Line::from(Span::styled(
            "Path or file:// URI of the image",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(dialog.path.clone(), Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        hint_line(&[("Enter", "use"), ("Esc", "cancel")]),
    ];
    frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), inner);
}
