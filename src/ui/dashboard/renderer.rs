//! Dashboard main renderer

use super::components::{attendees, banners, footer, forms, header, info_panel, logs};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    info_panel::render_info_panel(f, content_chunks[0], state);
    attendees::render_attendees(f, content_chunks[1], state);
    forms::render_forms(f, content_chunks[2], state);
    banners::render_banners(f, main_chunks[2], state);
    logs::render_logs_panel(f, main_chunks[3], state);
    footer::render_footer(f, main_chunks[4], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Attendee, MeetingStatus};
    use crate::dashboard::view::render;
    use crate::dashboard::{Banner, PageState};
    use crate::ui::app::UIConfig;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn screen_text(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_dashboard_shows_status_attendees_and_banners() {
        let mut page = PageState::new(8);
        page.apply_status(MeetingStatus::active(Some("AbCd1234".to_string())));
        page.replace_attendees(vec![Attendee {
            id: 2,
            username: "alice".to_string(),
        }]);
        page.push_banner(Banner::error("Meeting minutes are required."));

        let state = DashboardState::new(
            render(&page),
            "http://localhost:5000".to_string(),
            Instant::now(),
            &UIConfig::new(false, 60),
        );
        let text = screen_text(&state);

        assert!(text.contains("Current Status: Active"));
        assert!(text.contains("AbCd1234"));
        assert!(text.contains("alice"));
        assert!(text.contains("/admin/remove-attendee/8/2"));
        assert!(text.contains("Meeting minutes are required."));
        assert!(text.contains("[End Meeting]"));
    }
}
