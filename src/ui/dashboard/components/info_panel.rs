//! Dashboard info panel component
//!
//! Renders session information and the meeting's attachments

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn format_uptime(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = vec![
        Line::from(Span::styled(
            format!("Meeting: {}", state.meeting_id),
            Style::default().fg(Color::LightBlue),
        )),
        Line::from(Span::styled(
            format!("Server: {}", state.base_url),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            format!("Refresh: every {}s", state.refresh_interval_secs),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            format!(
                "Uptime: {}",
                format_uptime(state.start_time.elapsed().as_secs())
            ),
            Style::default().fg(Color::LightGreen),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Attachments ({})", state.view.attachments.len()),
            Style::default().fg(Color::White),
        )),
    ];

    info_lines.extend(state.view.attachments.iter().map(|attachment| {
        Line::from(vec![
            Span::raw(format!("• {} ", attachment.filename)),
            Span::styled(
                attachment.path.clone(),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }));

    let info_block = Block::default()
        .title("SESSION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_widget = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_widget, area);
}
