//! Dashboard banner component
//!
//! Renders the success and error banners, newest last

use super::super::state::DashboardState;
use super::super::utils::get_banner_color;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

pub fn render_banners(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines: Vec<Line> = state
        .view
        .banners
        .iter()
        .map(|banner| {
            Line::from(Span::styled(
                banner.message.clone(),
                Style::default().fg(get_banner_color(banner.kind)),
            ))
        })
        .collect();

    let border_color = if lines.is_empty() {
        Color::DarkGray
    } else {
        Color::LightRed
    };
    let block = Block::default()
        .title(format!("MESSAGES ({})", lines.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
