//! Page model of one meeting dashboard

use super::forms::{FormState, StatusForm};
use crate::api::types::{Attachment, Attendee, MeetingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A dismissible message in the banner region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub kind: BannerKind,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BannerKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BannerKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub meeting_id: u64,
    /// `None` until the first status poll lands.
    pub status: Option<MeetingStatus>,
    pub attendees: Vec<Attendee>,
    /// Usernames appended from the add form, shown until the next poll
    /// rebuilds the list.
    pub pending_attendees: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub minutes_form: FormState,
    /// Absent once the meeting has ended.
    pub status_form: Option<StatusForm>,
    pub attendee_form: FormState,
    pub banners: Vec<Banner>,
    pub last_refresh: Option<String>,
}

impl PageState {
    pub fn new(meeting_id: u64) -> Self {
        Self {
            meeting_id,
            status: None,
            attendees: Vec::new(),
            pending_attendees: Vec::new(),
            attachments: Vec::new(),
            minutes_form: FormState::minutes(meeting_id),
            status_form: Some(StatusForm::start(meeting_id)),
            attendee_form: FormState::add_attendee(meeting_id),
            banners: Vec::new(),
            last_refresh: None,
        }
    }

    pub fn push_banner(&mut self, banner: Banner) {
        self.banners.push(banner);
    }

    /// Returns false if there is no banner at `index`.
    pub fn dismiss_banner(&mut self, index: usize) -> bool {
        if index < self.banners.len() {
            self.banners.remove(index);
            true
        } else {
            false
        }
    }

    /// Apply a polled status, keeping the start/end affordance in step with it.
    pub fn apply_status(&mut self, polled: MeetingStatus) {
        let merged = match &self.status {
            Some(current) => current.merge_polled(polled),
            None => polled,
        };
        let starts = self.status_form.as_ref().map(StatusForm::starts_meeting);
        match (starts, &merged) {
            (Some(false), MeetingStatus::NotStarted) => {
                self.status_form = Some(StatusForm::start(self.meeting_id));
            }
            (Some(true), MeetingStatus::Active { .. }) => {
                self.status_form = Some(StatusForm::end(self.meeting_id));
            }
            _ => {}
        }
        self.status = Some(merged);
    }

    /// Clear-and-rebuild of the attendee list.
    pub fn replace_attendees(&mut self, attendees: Vec<Attendee>) {
        self.attendees = attendees;
        self.pending_attendees.clear();
    }

    /// Returns false if no attendee had that id.
    pub fn remove_attendee(&mut self, attendee_id: u64) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|attendee| attendee.id != attendee_id);
        self.attendees.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::forms::{END_LABEL, START_LABEL};

    fn alice() -> Attendee {
        Attendee {
            id: 1,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_active_poll_flips_start_form_to_end() {
        let mut state = PageState::new(4);
        state.apply_status(MeetingStatus::active(None));
        let form = state.status_form.as_ref().unwrap();
        assert_eq!(form.button_label, END_LABEL);
        assert_eq!(form.form.action, "/admin/end/4/");
    }

    #[test]
    fn test_not_started_poll_restores_start_label() {
        let mut state = PageState::new(4);
        state.status_form = Some(StatusForm::end(4));
        state.apply_status(MeetingStatus::NotStarted);
        assert_eq!(state.status_form.unwrap().button_label, START_LABEL);
    }

    #[test]
    fn test_ended_poll_leaves_form_untouched() {
        let mut state = PageState::new(4);
        state.status_form = Some(StatusForm::end(4));
        state.apply_status(MeetingStatus::Ended);
        assert_eq!(state.status_form, Some(StatusForm::end(4)));
        assert_eq!(state.status, Some(MeetingStatus::Ended));
    }

    #[test]
    fn test_replace_attendees_drops_pending_echoes() {
        let mut state = PageState::new(4);
        state.pending_attendees.push("bob".to_string());
        state.replace_attendees(vec![alice()]);
        assert!(state.pending_attendees.is_empty());
        assert_eq!(state.attendees, vec![alice()]);
    }

    #[test]
    fn test_remove_and_dismiss() {
        let mut state = PageState::new(4);
        state.replace_attendees(vec![alice()]);
        assert!(!state.remove_attendee(2));
        assert!(state.remove_attendee(1));
        assert!(state.attendees.is_empty());

        state.push_banner(Banner::success("one"));
        assert!(!state.dismiss_banner(3));
        assert!(state.dismiss_banner(0));
        assert!(state.banners.is_empty());
    }
}
