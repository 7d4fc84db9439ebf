//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a bordered field box around prepared lines
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, lines: Vec<Line>, is_active: bool) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(value_style(is_active));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Lines for a text value, with a trailing cursor when active
pub fn text_lines(value: &str, is_active: bool, placeholder: &str) -> Vec<Line<'static>> {
    let style = value_style(is_active);
    if value.is_empty() && !is_active {
        return vec![Line::from(Span::styled(placeholder.to_string(), style))];
    }

    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }
    lines
}

/// One line of segments separated by `sep`; the focused segment is underlined
pub fn segment_line(segments: &[String], focused: Option<usize>, sep: &str) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(
                sep.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let is_focused = focused == Some(idx);
        let text = if segment.is_empty() {
            "___".to_string()
        } else {
            segment.clone()
        };
        let style = if is_focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(text, style));
        if is_focused {
            spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }
    Line::from(spans)
}

/// One line of choice markers: `(•) a  ( ) b` or `[x] a  [ ] b`
pub fn choice_line(
    choices: &[(&str, bool)],
    highlighted: Option<usize>,
    many: bool,
) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, (label, selected)) in choices.iter().enumerate() {
        let marker = match (many, selected) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(•)",
            (false, false) => "( )",
        };
        let style = if highlighted == Some(idx) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if *selected {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{marker} {label}"), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
