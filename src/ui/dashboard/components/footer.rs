//! Dashboard footer component
//!
//! Renders the key bindings for the current input mode

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const DASHBOARD_KEYS: &str = "[R] Refresh | [S] Start/End | [M] Minutes | [A] Add | [X] Remove | [C] Reset Code | [D] Dismiss | [Q] Quit";
const INPUT_KEYS: &str = "[Enter] Submit | [Esc] Cancel | [Backspace] Delete";

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = if state.input.is_some() {
        (INPUT_KEYS, Color::LightYellow)
    } else {
        (DASHBOARD_KEYS, Color::Cyan)
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
