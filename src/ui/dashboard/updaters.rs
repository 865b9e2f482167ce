//! Dashboard state update logic
//!
//! Applies new page snapshots, queued events and key presses.

use super::state::{DashboardState, InputMode, UiAction};
use crate::dashboard::DashboardView;
use crate::dashboard::forms::MINUTES_FIELD;
use crossterm::event::KeyCode;
use std::time::Instant;

impl DashboardState {
    /// Take the latest snapshot and drain queued events into the activity log.
    pub fn update(&mut self, view: DashboardView) {
        self.tick += 1;
        if view.last_refresh.is_some() && view.last_refresh != self.view.last_refresh {
            self.refreshed_at = Some(Instant::now());
        }
        self.view = view;

        // Keep the selection on a row after the list shrank
        let len = self.view.attendees.len();
        if self.selected_attendee >= len {
            self.selected_attendee = len.saturating_sub(1);
        }

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    /// Translate a key press. Text input swallows every key but Enter and Esc.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<UiAction> {
        if let Some(input) = self.input.as_mut() {
            return match code {
                KeyCode::Enter => match self.input.take() {
                    Some(InputMode::Minutes(text)) => Some(UiAction::SubmitMinutes(text)),
                    Some(InputMode::Attendee(text)) => Some(UiAction::SubmitAttendee(text)),
                    None => None,
                },
                KeyCode::Esc => {
                    self.input = None;
                    None
                }
                KeyCode::Backspace => {
                    input.buffer_mut().pop();
                    None
                }
                KeyCode::Char(c) => {
                    input.buffer_mut().push(c);
                    None
                }
                _ => None,
            };
        }

        match code {
            KeyCode::Esc | KeyCode::Char('q') => Some(UiAction::Quit),
            KeyCode::Char('r') => Some(UiAction::Refresh),
            KeyCode::Char('s') if self.view.status_form.is_some() => {
                Some(UiAction::SubmitStatusChange)
            }
            KeyCode::Char('m') => {
                let notes = self
                    .view
                    .minutes_form
                    .field(MINUTES_FIELD)
                    .unwrap_or_default()
                    .to_string();
                self.input = Some(InputMode::Minutes(notes));
                None
            }
            KeyCode::Char('a') => {
                self.input = Some(InputMode::Attendee(String::new()));
                None
            }
            KeyCode::Up => {
                self.selected_attendee = self.selected_attendee.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.selected_attendee + 1 < self.view.attendees.len() {
                    self.selected_attendee += 1;
                }
                None
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                self.selected_attendee_id().map(UiAction::RemoveAttendee)
            }
            KeyCode::Char('c') => Some(UiAction::ResetCode),
            KeyCode::Char('d') => Some(UiAction::DismissBanner),
            KeyCode::Char('D') => Some(UiAction::ClearBanners),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Attendee, MeetingStatus};
    use crate::dashboard::PageState;
    use crate::dashboard::view::render;
    use crate::ui::app::UIConfig;

    fn state_with(page: &PageState) -> DashboardState {
        DashboardState::new(
            render(page),
            "http://localhost:5000".to_string(),
            Instant::now(),
            &UIConfig::new(false, 60),
        )
    }

    fn page_with_attendees() -> PageState {
        let mut page = PageState::new(5);
        page.replace_attendees(vec![
            Attendee {
                id: 10,
                username: "alice".to_string(),
            },
            Attendee {
                id: 11,
                username: "bob".to_string(),
            },
        ]);
        page
    }

    #[test]
    fn test_selection_and_removal() {
        let mut state = state_with(&page_with_attendees());
        assert_eq!(
            state.handle_key(KeyCode::Delete),
            Some(UiAction::RemoveAttendee(10))
        );
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Down);
        assert_eq!(
            state.handle_key(KeyCode::Char('x')),
            Some(UiAction::RemoveAttendee(11))
        );
        state.handle_key(KeyCode::Up);
        assert_eq!(state.selected_attendee, 0);
    }

    #[test]
    fn test_echoed_attendee_cannot_be_removed() {
        let mut page = PageState::new(5);
        page.pending_attendees.push("carol".to_string());
        let mut state = state_with(&page);
        assert_eq!(state.handle_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_minutes_input_prefills_and_submits() {
        let mut page = PageState::new(5);
        page.minutes_form.set_field(MINUTES_FIELD, "Draft");
        let mut state = state_with(&page);

        assert_eq!(state.handle_key(KeyCode::Char('m')), None);
        // Typing 'q' inside the input does not quit
        assert_eq!(state.handle_key(KeyCode::Char('q')), None);
        state.handle_key(KeyCode::Backspace);
        state.handle_key(KeyCode::Char('!'));
        assert_eq!(
            state.handle_key(KeyCode::Enter),
            Some(UiAction::SubmitMinutes("Draft!".to_string()))
        );
        assert_eq!(state.input, None);
    }

    #[test]
    fn test_escape_cancels_input_then_quits() {
        let mut state = state_with(&PageState::new(5));
        state.handle_key(KeyCode::Char('a'));
        state.handle_key(KeyCode::Char('z'));
        assert_eq!(state.handle_key(KeyCode::Esc), None);
        assert_eq!(state.input, None);
        assert_eq!(state.handle_key(KeyCode::Esc), Some(UiAction::Quit));
    }

    #[test]
    fn test_status_key_needs_a_form() {
        let mut page = PageState::new(5);
        page.status_form = None;
        page.apply_status(MeetingStatus::Ended);
        let mut state = state_with(&page);
        assert_eq!(state.handle_key(KeyCode::Char('s')), None);

        let mut state = state_with(&PageState::new(5));
        assert_eq!(
            state.handle_key(KeyCode::Char('s')),
            Some(UiAction::SubmitStatusChange)
        );
    }

    #[test]
    fn test_update_clamps_selection() {
        let mut state = state_with(&page_with_attendees());
        state.selected_attendee = 1;
        state.update(render(&PageState::new(5)));
        assert_eq!(state.selected_attendee, 0);
        assert_eq!(state.selected_attendee_id(), None);
    }
}
