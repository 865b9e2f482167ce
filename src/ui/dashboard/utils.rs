//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::api::types::MeetingStatus;
use crate::dashboard::BannerKind;
use crate::events::Source;
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Refresher => Color::Cyan,
        Source::Minutes => Color::LightBlue,
        Source::Status => Color::Yellow,
        Source::Attendees => Color::Green,
        Source::Code => Color::Magenta,
    }
}

/// Color of the status line, keyed by the rendered status text.
pub fn get_status_color(text: Option<&str>) -> Color {
    match text {
        Some(MeetingStatus::NOT_STARTED_LITERAL) => Color::LightBlue,
        Some(MeetingStatus::ENDED_LITERAL) => Color::DarkGray,
        Some(_) => Color::LightGreen,
        None => Color::Gray,
    }
}

pub fn get_banner_color(kind: BannerKind) -> Color {
    match kind {
        BannerKind::Success => Color::Green,
        BannerKind::Error => Color::Red,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("operation timed out") {
        return format!(
            "{} (server unreachable)",
            msg.split(':').next().unwrap_or(msg)
        );
    }
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2026-03-14 09:26:53"), "03-14 09:26");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message("Failed to refresh status: error sending request for url"),
            "Failed to refresh status (server unreachable)"
        );
        assert_eq!(clean_http_error_message("Saved"), "Saved");
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(get_status_color(Some("Ended")), Color::DarkGray);
        assert_eq!(get_status_color(Some("Active")), Color::LightGreen);
        assert_eq!(get_status_color(None), Color::Gray);
    }
}
