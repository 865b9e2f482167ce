//! Wire types of the meeting-records admin API

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lifecycle of a meeting, decoded once from the status payload.
///
/// The server owns the transitions `NotStarted -> Active -> Ended`; the
/// dashboard only mirrors them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeetingStatus {
    #[default]
    NotStarted,
    /// Running. The join code is only known right after this client started
    /// the meeting or reset its code. `raw` keeps a status literal other than
    /// `"Active"` so it can be shown as the server sent it.
    Active {
        code: Option<String>,
        raw: Option<String>,
    },
    Ended,
}

impl MeetingStatus {
    pub const NOT_STARTED_LITERAL: &'static str = "Not Started";
    pub const ENDED_LITERAL: &'static str = "Ended";
    pub const ACTIVE_LITERAL: &'static str = "Active";

    pub fn active(code: Option<String>) -> Self {
        MeetingStatus::Active { code, raw: None }
    }

    /// Decode the string returned by `GET /api/event/state/{id}`.
    ///
    /// Only the two literals above are recognised; any other value means the
    /// meeting is running.
    pub fn from_payload(payload: &str) -> Self {
        match payload {
            Self::NOT_STARTED_LITERAL => MeetingStatus::NotStarted,
            Self::ENDED_LITERAL => MeetingStatus::Ended,
            Self::ACTIVE_LITERAL => MeetingStatus::active(None),
            other => MeetingStatus::Active {
                code: None,
                raw: Some(other.to_string()),
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MeetingStatus::NotStarted => Self::NOT_STARTED_LITERAL,
            MeetingStatus::Active { raw: Some(raw), .. } => raw,
            MeetingStatus::Active { raw: None, .. } => Self::ACTIVE_LITERAL,
            MeetingStatus::Ended => Self::ENDED_LITERAL,
        }
    }

    /// Merge a freshly polled status with what is already known.
    ///
    /// Polls never carry the join code, so a code learned from a start or
    /// reset response survives as long as the meeting stays active.
    pub fn merge_polled(&self, polled: MeetingStatus) -> MeetingStatus {
        match (self, polled) {
            (MeetingStatus::Active { code, .. }, MeetingStatus::Active { code: None, raw }) => {
                MeetingStatus::Active {
                    code: code.clone(),
                    raw,
                }
            }
            (_, polled) => polled,
        }
    }
}

impl Display for MeetingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A participant checked into a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: u64,
    pub username: String,
}

/// JSON body returned by every dashboard form action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub meeting_id: Option<u64>,
    #[serde(default)]
    pub minutes_id: Option<u64>,
    #[serde(default)]
    pub meeting_code: Option<String>,
}

/// One minutes document of a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesEntry {
    pub id: u64,
    pub notes: String,
    #[serde(default)]
    pub username_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub filepath: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_literals_decode_to_variants() {
        assert_eq!(
            MeetingStatus::from_payload("Not Started"),
            MeetingStatus::NotStarted
        );
        assert_eq!(MeetingStatus::from_payload("Ended"), MeetingStatus::Ended);
        assert_eq!(
            MeetingStatus::from_payload("Active"),
            MeetingStatus::active(None)
        );
        // Comparison is exact, like the server contract.
        for payload in ["not started", "Paused"] {
            assert_eq!(
                MeetingStatus::from_payload(payload),
                MeetingStatus::Active {
                    code: None,
                    raw: Some(payload.to_string())
                }
            );
        }
    }

    #[test]
    fn test_unknown_literal_is_displayed_verbatim() {
        assert_eq!(MeetingStatus::from_payload("In Progress").label(), "In Progress");
        assert_eq!(MeetingStatus::from_payload("Active").label(), "Active");
        assert_eq!(MeetingStatus::active(None).to_string(), "Active");
    }

    #[test]
    fn test_merge_keeps_known_code_while_active() {
        let known = MeetingStatus::active(Some("Xy12Ab34".to_string()));
        assert_eq!(
            known.merge_polled(MeetingStatus::active(None)),
            known
        );
        assert_eq!(
            known.merge_polled(MeetingStatus::from_payload("Running")),
            MeetingStatus::Active {
                code: Some("Xy12Ab34".to_string()),
                raw: Some("Running".to_string())
            }
        );
        assert_eq!(
            known.merge_polled(MeetingStatus::Ended),
            MeetingStatus::Ended
        );
    }

    #[test]
    fn test_attendee_ignores_extra_fields() {
        let attendees: Vec<Attendee> =
            serde_json::from_str(r#"[{"id": 1, "username": "alice", "meeting": 5}]"#).unwrap();
        assert_eq!(
            attendees,
            vec![Attendee {
                id: 1,
                username: "alice".to_string()
            }]
        );
    }

    #[test]
    fn test_action_response_tolerates_missing_ids() {
        let response: ActionResponse =
            serde_json::from_str(r#"{"message": "Meeting ended successfully.", "success": true}"#)
                .unwrap();
        assert_eq!(response.meeting_id, None);
        assert_eq!(response.success, Some(true));
    }
}
