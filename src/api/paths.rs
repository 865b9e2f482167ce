//! Endpoint paths of the meeting-records server.
//!
//! All paths are relative to the server base URL.

pub fn meeting_state(meeting_id: u64) -> String {
    format!("/api/event/state/{}", meeting_id)
}

pub fn attendees(meeting_id: u64) -> String {
    format!("/api/event/attendees/{}", meeting_id)
}

pub fn notes(meeting_id: u64) -> String {
    format!("/api/event/notes/{}", meeting_id)
}

pub fn attachments(meeting_id: u64) -> String {
    format!("/api/event/attachments/{}", meeting_id)
}

pub fn remove_attendee(meeting_id: u64, attendee_id: u64) -> String {
    format!("/admin/remove-attendee/{}/{}", meeting_id, attendee_id)
}

pub fn reset_code(meeting_id: u64) -> String {
    format!("/admin/reset-code/{}", meeting_id)
}

pub fn show_code(code: &str) -> String {
    format!("/admin/show-code?code={}", urlencoding::encode(code))
}

pub fn start_meeting(meeting_id: u64) -> String {
    format!("/admin/start/{}/", meeting_id)
}

pub fn end_meeting(meeting_id: u64) -> String {
    format!("/admin/end/{}/", meeting_id)
}

/// Create (`minutes_id == None`) or edit action of the minutes form.
pub fn minutes(meeting_id: u64, minutes_id: Option<u64>) -> String {
    match minutes_id {
        Some(minutes_id) => format!("/admin/minutes/{}/{}", meeting_id, minutes_id),
        None => format!("/admin/minutes/{}/", meeting_id),
    }
}

pub fn add_attendee(meeting_id: u64) -> String {
    format!("/admin/attendees/{}/", meeting_id)
}

/// Marker the status form action carries while it still starts the meeting.
pub const START_ACTION_MARKER: &str = "/admin/start";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_paths() {
        assert_eq!(minutes(5, None), "/admin/minutes/5/");
        assert_eq!(minutes(5, Some(9)), "/admin/minutes/5/9");
    }

    #[test]
    fn test_show_code_encodes_query() {
        assert_eq!(show_code("Ab3dE6gH"), "/admin/show-code?code=Ab3dE6gH");
        assert_eq!(show_code("a b&c"), "/admin/show-code?code=a%20b%26c");
    }

    #[test]
    fn test_start_marker_matches_start_path() {
        assert!(start_meeting(3).contains(START_ACTION_MARKER));
        assert!(!end_meeting(3).contains(START_ACTION_MARKER));
    }
}
