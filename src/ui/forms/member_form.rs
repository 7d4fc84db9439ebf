//! Member form rendering
//!
//! Fields render in schema order, followed by the fixed preference
//! selectors. The list scrolls so the focused entry stays visible.

use super::field_renderer::{choice_line, draw_field, draw_help_text, segment_line, text_lines};
use crate::app::{App, Focus, Widget};
use crate::codec::preference::Preference;
use crate::codec::{self, question, Address, PhoneNumber};
use crate::schema::PASSWORD_FIELD;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the whole form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", app.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let targets = app.focus_targets();
    if targets.is_empty() {
        frame.render_widget(
            ratatui::widgets::Paragraph::new("This form has no fields")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    // Bottom row shows the focused field's description
    let help_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    let inner = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    if let Some(Focus::Field(name)) = targets.get(app.state.active_field) {
        if let Some(description) = app
            .session
            .schema()
            .field(name)
            .and_then(|f| f.description.as_deref())
        {
            draw_help_text(frame, help_area, description);
        }
    }

    let heights: Vec<u16> = targets.iter().map(|t| entry_height(app, t)).collect();
    let first = first_visible(&heights, app.state.active_field, inner.height);

    let bottom = inner.y + inner.height;
    let mut y = inner.y;
    for (idx, target) in targets.iter().enumerate().skip(first) {
        let height = heights[idx];
        if y + height > bottom {
            break;
        }
        let rect = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        let is_active = idx == app.state.active_field;
        match target {
            Focus::Field(name) => draw_schema_field(frame, rect, app, name, is_active),
            Focus::Preference(pref) => draw_preference(frame, rect, app, pref, is_active),
        }
        y += height;
    }
}

fn entry_height(app: &App, target: &Focus) -> u16 {
    match target {
        Focus::Field(name) => match app.widget(name) {
            Some(Widget::Text { multiline: true }) => 6,
            Some(Widget::Address | Widget::Question) => 4,
            _ => 3,
        },
        Focus::Preference(_) => 3,
    }
}

/// First entry to draw so that the active one fits in `available` rows
pub fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let active = active.min(heights.len().saturating_sub(1));
    let mut first = 0;
    while first < active {
        let needed: u16 = heights[first..=active].iter().sum();
        if needed <= available {
            break;
        }
        first += 1;
    }
    first
}

fn draw_schema_field(frame: &mut Frame, area: Rect, app: &App, name: &str, is_active: bool) {
    let Some(field) = app.session.schema().field(name) else {
        return;
    };
    let Some(widget) = app.widget(name) else {
        return;
    };
    let values = app.session.state();
    let ui = app.state.field_ui(name);
    let draft = if is_active { ui.draft.clone() } else { None };

    let mut label = if field.title.is_empty() {
        field.name.clone()
    } else {
        field.title.clone()
    };
    if field.required {
        label.push_str(" *");
    }

    let lines = match &widget {
        Widget::Text { .. } => {
            let mut text =
                draft.unwrap_or_else(|| codec::text::current(values, name).to_string());
            if name == PASSWORD_FIELD {
                text = mask(&text);
            }
            text_lines(&text, is_active, "(empty)")
        }
        Widget::Phone => {
            let mut segments = PhoneNumber::decode(values.get(name)).segments.to_vec();
            if let (Some(text), Some(slot)) = (draft, segments.get_mut(ui.segment)) {
                *slot = text;
            }
            vec![segment_line(
                &segments,
                is_active.then_some(ui.segment),
                " - ",
            )]
        }
        Widget::Address => {
            let address = Address::decode(values.get(name));
            let summary = [
                address.postal_code.as_str(),
                address.primary.as_str(),
                address.alternate.as_str(),
                address.supplementary.as_str(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
            let detail = draft.unwrap_or(address.detail);
            let mut lines = vec![dim_or_value(&summary, "(press Enter to look up)")];
            lines.extend(text_lines(&detail, is_active, "(detail)"));
            lines
        }
        Widget::Date => {
            let shown = codec::date::current(values, name)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            vec![dim_or_value(&shown, "(press Enter to pick a date)")]
        }
        Widget::Image => {
            let handle = codec::text::current(values, name);
            vec![dim_or_value(handle, "(press Enter to choose an image)")]
        }
        Widget::Question => {
            let id = codec::text::current(values, name);
            let prompt = question::label(id).unwrap_or_default();
            let answer = draft
                .unwrap_or_else(|| codec::text::current(values, question::ANSWER_KEY).to_string());
            let mut lines = vec![dim_or_value(prompt, "(press Enter to choose a question)")];
            lines.extend(text_lines(&answer, is_active, "(answer)"));
            lines
        }
        Widget::Choice { options, many } => {
            let choices: Vec<(&str, bool)> = options
                .iter()
                .map(|o| {
                    let selected = if *many {
                        codec::choice::is_selected(values, name, o)
                    } else {
                        codec::text::current(values, name) == o
                    };
                    (o.as_str(), selected)
                })
                .collect();
            vec![choice_line(
                &choices,
                is_active.then_some(ui.highlighted),
                *many,
            )]
        }
        Widget::Dropdown(_) => {
            let current = codec::text::current(values, name);
            vec![dim_or_value(current, "(press Enter to select)")]
        }
        Widget::Unresolved(reason) => vec![Line::from(Span::styled(
            format!("Options unavailable: {reason}"),
            Style::default().fg(Color::Red),
        ))],
    };

    draw_field(frame, area, &label, lines, is_active);
}

fn draw_preference(frame: &mut Frame, area: Rect, app: &App, pref: &Preference, is_active: bool) {
    let current = codec::text::current(app.session.state(), pref.key);
    let choices: Vec<(&str, bool)> = pref
        .choices
        .iter()
        .map(|(value, label)| (*label, *value == current))
        .collect();
    let highlighted = is_active.then(|| app.state.field_ui(pref.key).highlighted);
    let line = choice_line(&choices, highlighted, false);
    draw_field(frame, area, pref.title, vec![line], is_active);
}

fn mask(text: &str) -> String {
    "•".repeat(text.chars().count())
}

fn dim_or_value(value: &str, placeholder: &str) -> Line<'static> {
    if value.is_empty() {
        Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(Color::White),
        ))
    }
}
