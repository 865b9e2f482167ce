//! Dashboard attendee list component

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState};

/// Render the attendee list with the highlighted row.
pub fn render_attendees(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let items: Vec<ListItem> = state
        .view
        .attendees
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::raw(entry.username.clone())];
            match &entry.remove_url {
                Some(url) => spans.push(Span::styled(
                    format!("  [remove: {}]", url),
                    Style::default().fg(Color::DarkGray),
                )),
                None => spans.push(Span::styled(
                    "  (pending)",
                    Style::default().fg(Color::Yellow),
                )),
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .title(format!("ATTENDEES ({})", state.view.attendees.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Green));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.view.attendees.is_empty() {
        list_state.select(Some(state.selected_attendee));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}
