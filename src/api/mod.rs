use crate::api::error::ApiError;
use crate::api::types::{ActionResponse, Attachment, Attendee, MeetingStatus, MinutesEntry};

pub(crate) mod client;
pub use client::AdminClient;
pub mod error;
pub mod paths;
pub mod types;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AdminApi: Send + Sync {
    /// Base URL every relative path is resolved against.
    fn base_url(&self) -> String;

    /// Current lifecycle state of a meeting.
    async fn meeting_state(&self, meeting_id: u64) -> Result<MeetingStatus, ApiError>;

    /// Attendees checked into a meeting.
    async fn attendees(&self, meeting_id: u64) -> Result<Vec<Attendee>, ApiError>;

    /// Minutes documents recorded for a meeting.
    async fn minutes(&self, meeting_id: u64) -> Result<Vec<MinutesEntry>, ApiError>;

    /// Files attached to a meeting.
    async fn attachments(&self, meeting_id: u64) -> Result<Vec<Attachment>, ApiError>;

    /// Posts form fields to a server-designated action URL.
    async fn submit_form(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<ActionResponse, ApiError>;

    /// Removes one attendee; only the status code matters.
    async fn remove_attendee(&self, meeting_id: u64, attendee_id: u64) -> Result<(), ApiError>;

    /// Issues a fresh join code for an active meeting and returns it.
    async fn reset_code(&self, meeting_id: u64) -> Result<String, ApiError>;
}
