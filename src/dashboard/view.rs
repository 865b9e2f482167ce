//! Immutable view-model of the dashboard
//!
//! [`render`] turns a [`PageState`] snapshot into plain data that the terminal
//! UI, the headless printer and the tests all consume.

use super::state::{Banner, PageState};
use crate::api::paths;
use crate::api::types::{Attachment, Attendee, MeetingStatus};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// The status paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    /// Join code link, or the reset link when the code is unknown.
    pub code_link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeEntry {
    /// Server id; echoed entries have none until the next poll.
    pub id: Option<u64>,
    /// Stable key, `attendee-<id>`.
    pub key: Option<String>,
    pub username: String,
    /// Removal affordance.
    pub remove_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<(String, String)>,
    pub was_validated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFormView {
    pub form: FormView,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentEntry {
    pub filename: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub meeting_id: u64,
    pub status: Option<StatusView>,
    pub attendees: Vec<AttendeeEntry>,
    pub attachments: Vec<AttachmentEntry>,
    pub minutes_form: FormView,
    pub status_form: Option<StatusFormView>,
    pub attendee_form: FormView,
    pub banners: Vec<Banner>,
    pub last_refresh: Option<String>,
}

pub fn render_status(status: &MeetingStatus, meeting_id: u64) -> StatusView {
    let code_link = match status {
        MeetingStatus::Active {
            code: Some(code), ..
        } => Some(Link {
            label: code.clone(),
            href: paths::show_code(code),
        }),
        MeetingStatus::Active { code: None, .. } => Some(Link {
            label: "Reset Code".to_string(),
            href: paths::reset_code(meeting_id),
        }),
        MeetingStatus::NotStarted | MeetingStatus::Ended => None,
    };
    StatusView {
        text: status.label().to_string(),
        code_link,
    }
}

pub fn render_attendees(
    attendees: &[Attendee],
    pending: &[String],
    meeting_id: u64,
) -> Vec<AttendeeEntry> {
    let polled = attendees.iter().map(|attendee| AttendeeEntry {
        id: Some(attendee.id),
        key: Some(format!("attendee-{}", attendee.id)),
        username: attendee.username.clone(),
        remove_url: Some(paths::remove_attendee(meeting_id, attendee.id)),
    });
    let echoed = pending.iter().map(|username| AttendeeEntry {
        id: None,
        key: None,
        username: username.clone(),
        remove_url: None,
    });
    polled.chain(echoed).collect()
}

fn render_attachments(attachments: &[Attachment]) -> Vec<AttachmentEntry> {
    attachments
        .iter()
        .map(|attachment| AttachmentEntry {
            filename: attachment.filename.clone(),
            path: attachment.filepath.clone(),
        })
        .collect()
}

fn render_form(form: &super::forms::FormState) -> FormView {
    FormView {
        action: form.action.clone(),
        fields: form.fields().to_vec(),
        was_validated: form.was_validated,
    }
}

pub fn render(state: &PageState) -> DashboardView {
    DashboardView {
        meeting_id: state.meeting_id,
        status: state
            .status
            .as_ref()
            .map(|status| render_status(status, state.meeting_id)),
        attendees: render_attendees(
            &state.attendees,
            &state.pending_attendees,
            state.meeting_id,
        ),
        attachments: render_attachments(&state.attachments),
        minutes_form: render_form(&state.minutes_form),
        status_form: state.status_form.as_ref().map(|form| StatusFormView {
            form: render_form(&form.form),
            button_label: form.button_label.clone(),
        }),
        attendee_form: render_form(&state.attendee_form),
        banners: state.banners.clone(),
        last_refresh: state.last_refresh.clone(),
    }
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Display for StatusView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Current Status: {}", self.text)?;
        if let Some(link) = &self.code_link {
            write!(f, " | Meeting Code: {} ({})", link.label, link.href)?;
        }
        Ok(())
    }
}

impl Display for AttendeeEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.remove_url {
            Some(url) => write!(f, "{} [remove: {}]", self.username, url),
            None => write!(f, "{}", self.username),
        }
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Meeting {}", self.meeting_id)?;
        match &self.status {
            Some(status) => writeln!(f, "{}", status)?,
            None => writeln!(f, "Current Status: unknown")?,
        }
        writeln!(f, "Attendees ({}):", self.attendees.len())?;
        for entry in &self.attendees {
            writeln!(f, "  {}", entry)?;
        }
        for banner in &self.banners {
            writeln!(f, "! {}", banner.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_started_has_no_code_link() {
        let view = render_status(&MeetingStatus::from_payload("Not Started"), 12);
        assert_eq!(view.text, "Not Started");
        assert_eq!(view.code_link, None);
    }

    #[test]
    fn test_active_links_to_reset_code() {
        for payload in ["Active", "In Progress"] {
            let view = render_status(&MeetingStatus::from_payload(payload), 12);
            assert_eq!(
                view.code_link.map(|link| link.href),
                Some("/admin/reset-code/12".to_string())
            );
        }
    }

    #[test]
    fn test_known_code_links_to_show_code() {
        let status = MeetingStatus::active(Some("k9LmN2pQ".to_string()));
        let link = render_status(&status, 12).code_link.unwrap();
        assert_eq!(link.label, "k9LmN2pQ");
        assert_eq!(link.href, "/admin/show-code?code=k9LmN2pQ");
    }

    #[test]
    fn test_ended_has_no_link() {
        assert_eq!(render_status(&MeetingStatus::Ended, 12).code_link, None);
    }

    #[test]
    fn test_attendee_entry_carries_removal_url() {
        let attendees = vec![Attendee {
            id: 1,
            username: "alice".to_string(),
        }];
        let entries = render_attendees(&attendees, &[], 12);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key.as_deref(), Some("attendee-1"));
        assert_eq!(
            entries[0].remove_url.as_deref(),
            Some("/admin/remove-attendee/12/1")
        );
    }

    #[test]
    fn test_echoed_attendees_have_no_removal() {
        let entries = render_attendees(&[], &["carol".to_string()], 12);
        assert_eq!(entries[0].remove_url, None);
        assert_eq!(entries[0].id, None);
        assert_eq!(entries[0].to_string(), "carol");
    }

    #[test]
    fn test_render_page_without_status() {
        let view = render(&PageState::new(3));
        assert_eq!(view.status, None);
        assert_eq!(view.minutes_form.action, "/admin/minutes/3/");
        assert_eq!(
            view.status_form
                .as_ref()
                .map(|form| form.button_label.clone()),
            Some("Start Meeting".to_string())
        );
        assert!(view.to_string().contains("Current Status: unknown"));
    }
}
