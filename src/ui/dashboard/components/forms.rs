//! Dashboard forms component
//!
//! Renders the minutes, status and add-attendee forms, or the text input
//! while one of them is being edited

use super::super::state::DashboardState;
use crate::dashboard::forms::{ATTENDEE_FIELD, MINUTES_FIELD};
use crate::dashboard::view::FormView;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn action_line(form: &FormView) -> Line<'static> {
    Line::from(vec![
        Span::styled("POST ", Style::default().fg(Color::DarkGray)),
        Span::styled(form.action.clone(), Style::default().fg(Color::Cyan)),
    ])
}

/// A required field left empty after a submit attempt is flagged.
fn field_line(form: &FormView, name: &str, label: &str) -> Line<'static> {
    let value = form.field(name).unwrap_or_default();
    if value.is_empty() && form.was_validated {
        Line::from(Span::styled(
            format!("{}: required", label),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(format!("{}: {}", label, value))
    }
}

pub fn render_forms(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    if let Some(input) = &state.input {
        let cursor = if state.tick % 10 < 5 { "_" } else { " " };
        let editor = Paragraph::new(format!("{}{}", input.buffer(), cursor))
            .block(
                Block::default()
                    .title(input.title())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::LightYellow))
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(editor, area);
        return;
    }

    let view = &state.view;
    let mut lines = vec![
        Line::from(Span::styled(
            "Minutes",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        action_line(&view.minutes_form),
        field_line(&view.minutes_form, MINUTES_FIELD, "Notes"),
        Line::from(""),
    ];

    match &view.status_form {
        Some(status_form) => {
            lines.push(Line::from(Span::styled(
                format!("[{}]", status_form.button_label),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(action_line(&status_form.form));
        }
        None => lines.push(Line::from(Span::styled(
            "Meeting has ended",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Add Attendee",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(action_line(&view.attendee_form));
    lines.push(field_line(&view.attendee_form, ATTENDEE_FIELD, "Username"));

    let block = Block::default()
        .title("FORMS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
