//! Address lookup dialog

use super::base::{centered_rect, hint_line, open_frame};
use crate::codec::AddressScheme;
use crate::state::{AddressDialog, ADDRESS_INPUTS};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_address_dialog(frame: &mut Frame, dialog: &AddressDialog) {
    let area = centered_rect(frame.area(), 56, ADDRESS_INPUTS.len() as u16 + 6);
    let inner = open_frame(frame, area, "Address Lookup", Color::Cyan);

    let focused = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);

    let scheme_spans = [AddressScheme::Road, AddressScheme::Lot]
        .into_iter()
        .map(|scheme| {
            let marker = if scheme == dialog.scheme() { "(•)" } else { "( )" };
            let style = if dialog.focus == 0 && scheme == dialog.scheme() {
                focused
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(format!("{marker} {}  ", scheme.label()), style)
        });
    let mut content = vec![Line::from(
        std::iter::once(Span::styled(format!("{:<14}", "Scheme"), label_style))
            .chain(scheme_spans)
            .collect::<Vec<_>>(),
    )];

    for (idx, label) in ADDRESS_INPUTS.iter().enumerate() {
        let index = idx + 1;
        let is_focused = dialog.focus == index;
        let mut spans = vec![
            Span::styled(format!("{label:<14}"), label_style),
            Span::styled(
                dialog.input(index).to_string(),
                if is_focused {
                    focused
                } else {
                    Style::default().fg(Color::White)
                },
            ),
        ];
        if is_focused {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        content.push(Line::from(spans));
    }

    content.push(Line::from(""));
    content.push(hint_line(&[
        ("Tab", "next"),
        ("Space", "scheme"),
        ("Enter", "use"),
        ("Esc", "cancel"),
    ]));
    frame.render_widget(Paragraph::new(content), inner);
}
