//! Dashboard header component
//!
//! Renders the title, the status line and the refresh countdown

use super::super::state::DashboardState;
use super::super::utils::get_status_color;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title, status line and refresh gauge.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "MEETING DASHBOARD v{} | Meeting {}",
        env!("CARGO_PKG_VERSION"),
        state.meeting_id
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    // Status paragraph, with the code (or reset) link when there is one
    let status = state.view.status.as_ref();
    let status_text = status.map(|s| s.text.as_str());
    let mut spans = vec![
        Span::raw("Current Status: "),
        Span::styled(
            status_text.unwrap_or("unknown").to_string(),
            Style::default()
                .fg(get_status_color(status_text))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(link) = status.and_then(|s| s.code_link.as_ref()) {
        spans.push(Span::raw(" | Meeting Code: "));
        spans.push(Span::styled(
            link.label.clone(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::UNDERLINED),
        ));
        spans.push(Span::styled(
            format!(" ({}{})", state.base_url, link.href),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        header_chunks[1],
    );

    let (label, percent) = match &state.view.last_refresh {
        Some(at) => {
            let percent = state.refresh_progress();
            let remaining = state
                .refresh_interval_secs
                .saturating_sub(state.refresh_interval_secs * u64::from(percent) / 100);
            (
                format!("Last refresh {} | next in ~{}s", at, remaining),
                percent,
            )
        }
        None => {
            // Sweep while the first poll is in flight
            ("Waiting for first refresh...".to_string(), ((state.tick % 20) * 5) as u16)
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
        .percent(percent)
        .label(label);
    f.render_widget(gauge, header_chunks[2]);
}
