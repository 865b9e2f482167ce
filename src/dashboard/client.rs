//! Dashboard client
//!
//! Keeps a [`PageState`] in sync with the server and performs the dashboard's
//! mutating actions. The state lock is never held across a request.

use super::forms::{ATTENDEE_FIELD, MINUTES_FIELD, StatusForm};
use super::sequencer::{RequestSequencer, RequestToken};
use super::state::{Banner, PageState};
use super::view::{self, DashboardView};
use crate::api::AdminApi;
use crate::api::error::ApiError;
use crate::api::paths;
use crate::api::types::{ActionResponse, Attendee, MeetingStatus, MinutesEntry};
use crate::consts::cli_consts::messages;
use crate::error_classifier::ErrorClassifier;
use crate::logging::LogLevel;
use chrono::Local;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// What to do after an attendee was added successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddAttendeeMode {
    /// Re-poll the authoritative list.
    #[default]
    Refresh,
    /// Append the submitted username until the next poll.
    Echo,
}

/// Result of polling one view region.
#[derive(Debug)]
pub enum RegionOutcome {
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    Failed(ApiError),
}

impl RegionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, RegionOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub struct RefreshReport {
    pub status: RegionOutcome,
    pub attendees: RegionOutcome,
}

impl RefreshReport {
    pub fn is_success(&self) -> bool {
        !self.status.is_failed() && !self.attendees.is_failed()
    }
}

/// Outcome of [`DashboardClient::bootstrap`].
#[derive(Debug)]
pub struct BootstrapReport {
    /// Reading the existing minutes failed; the minutes form still targets the
    /// create action, so saving would add a second entry.
    pub minutes: Result<(), ApiError>,
    pub refresh: RefreshReport,
}

impl BootstrapReport {
    pub fn is_success(&self) -> bool {
        self.minutes.is_ok() && self.refresh.is_success()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Started { code: Option<String> },
    Ended,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Blocked locally; nothing was sent.
    #[error("Required field(s) missing: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("The {0} form is not available")]
    MissingForm(&'static str),
}

pub struct DashboardClient {
    api: Arc<dyn AdminApi>,
    meeting_id: u64,
    add_attendee_mode: AddAttendeeMode,
    state: Mutex<PageState>,
    status_requests: RequestSequencer,
    attendee_requests: RequestSequencer,
    classifier: ErrorClassifier,
}

impl DashboardClient {
    pub fn new(api: Arc<dyn AdminApi>, meeting_id: u64, add_attendee_mode: AddAttendeeMode) -> Self {
        Self {
            api,
            meeting_id,
            add_attendee_mode,
            state: Mutex::new(PageState::new(meeting_id)),
            status_requests: RequestSequencer::new(),
            attendee_requests: RequestSequencer::new(),
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn meeting_id(&self) -> u64 {
        self.meeting_id
    }

    pub fn base_url(&self) -> String {
        self.api.base_url()
    }

    fn lock_state(&self) -> MutexGuard<'_, PageState> {
        // The state stays consistent even if a holder panicked mid-update.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current page.
    pub fn view(&self) -> DashboardView {
        view::render(&self.lock_state())
    }

    /// Log level for a failed request.
    pub fn classify(&self, error: &ApiError) -> LogLevel {
        self.classifier.classify_api_error(error)
    }

    // =========================================================================
    // Polling
    // =========================================================================

    /// Seed the forms the way the server page renders them, then poll once.
    pub async fn bootstrap(&self) -> BootstrapReport {
        let minutes = match self.api.minutes(self.meeting_id).await {
            Ok(entries) => {
                self.seed_minutes(&entries);
                Ok(())
            }
            Err(e) => {
                log::warn!("Could not load existing minutes: {}", e);
                Err(e)
            }
        };
        if let Err(e) = self.fetch_attachments().await {
            log::warn!("Could not load attachments: {}", e);
        }

        let refresh = self.refresh().await;
        let mut guard = self.lock_state();
        let state = &mut *guard;
        match &state.status {
            Some(MeetingStatus::Ended) => state.status_form = None,
            Some(MeetingStatus::Active { .. }) => {
                state.status_form = Some(StatusForm::end(self.meeting_id))
            }
            Some(MeetingStatus::NotStarted) | None => {}
        }
        drop(guard);
        BootstrapReport { minutes, refresh }
    }

    /// The newest minutes entry becomes the edit target of the minutes form.
    fn seed_minutes(&self, entries: &[MinutesEntry]) {
        if let Some(latest) = entries.iter().max_by_key(|entry| entry.id) {
            let mut state = self.lock_state();
            state.minutes_form.action = paths::minutes(self.meeting_id, Some(latest.id));
            state
                .minutes_form
                .set_field(MINUTES_FIELD, latest.notes.clone());
        }
    }

    /// Poll status and attendees and re-render both regions.
    ///
    /// The two reads are independent; a failure in one does not block the
    /// other. Responses overtaken by a newer request are dropped.
    pub async fn refresh(&self) -> RefreshReport {
        let status_token = self.status_requests.issue();
        let attendee_token = self.attendee_requests.issue();

        let (status, attendees) = tokio::join!(
            self.api.meeting_state(self.meeting_id),
            self.api.attendees(self.meeting_id)
        );

        let report = RefreshReport {
            status: self.apply_status_response(status_token, status),
            attendees: self.apply_attendee_response(attendee_token, attendees),
        };
        if report.is_success() {
            self.lock_state().last_refresh = Some(Local::now().format("%H:%M:%S").to_string());
        }
        report
    }

    fn apply_status_response(
        &self,
        token: RequestToken,
        response: Result<MeetingStatus, ApiError>,
    ) -> RegionOutcome {
        match response {
            Ok(polled) => {
                let mut state = self.lock_state();
                if !self.status_requests.is_current(token) {
                    log::debug!("Dropping stale status response");
                    return RegionOutcome::Stale;
                }
                state.apply_status(polled);
                RegionOutcome::Applied
            }
            Err(e) => {
                log::warn!("Status refresh error: {}", e);
                RegionOutcome::Failed(e)
            }
        }
    }

    fn apply_attendee_response(
        &self,
        token: RequestToken,
        response: Result<Vec<Attendee>, ApiError>,
    ) -> RegionOutcome {
        match response {
            Ok(attendees) => {
                let mut state = self.lock_state();
                if !self.attendee_requests.is_current(token) {
                    log::debug!("Dropping stale attendee response");
                    return RegionOutcome::Stale;
                }
                state.replace_attendees(attendees);
                RegionOutcome::Applied
            }
            Err(e) => {
                log::warn!("Attendees refresh error: {}", e);
                RegionOutcome::Failed(e)
            }
        }
    }

    pub async fn fetch_attachments(&self) -> Result<usize, ApiError> {
        let attachments = self.api.attachments(self.meeting_id).await?;
        let count = attachments.len();
        self.lock_state().attachments = attachments;
        Ok(count)
    }

    // =========================================================================
    // Forms
    // =========================================================================

    pub fn set_minutes_notes(&self, notes: impl Into<String>) {
        self.lock_state()
            .minutes_form
            .set_field(MINUTES_FIELD, notes.into());
    }

    pub fn set_attendee_username(&self, username: impl Into<String>) {
        self.lock_state()
            .attendee_form
            .set_field(ATTENDEE_FIELD, username.into());
    }

    /// Save the minutes. Success turns the form into an edit of the saved entry.
    pub async fn submit_minutes(&self) -> Result<ActionResponse, DashboardError> {
        let (action, fields) = {
            let mut state = self.lock_state();
            state
                .minutes_form
                .check_validity()
                .map_err(|missing| DashboardError::Validation { missing })?;
            (
                state.minutes_form.action.clone(),
                state.minutes_form.fields().to_vec(),
            )
        };

        let response = self
            .api
            .submit_form(&action, &fields)
            .await
            .map_err(|e| self.report_failure(e))?;

        if let (Some(meeting_id), Some(minutes_id)) = (response.meeting_id, response.minutes_id) {
            self.lock_state().minutes_form.action = paths::minutes(meeting_id, Some(minutes_id));
        }
        Ok(response)
    }

    /// Start or end the meeting, depending on the current form action.
    pub async fn submit_status_change(&self) -> Result<StatusChange, DashboardError> {
        let (action, fields, starting) = {
            let mut state = self.lock_state();
            let form = state
                .status_form
                .as_mut()
                .ok_or(DashboardError::MissingForm("meeting status"))?;
            form.form
                .check_validity()
                .map_err(|missing| DashboardError::Validation { missing })?;
            (
                form.form.action.clone(),
                form.form.fields().to_vec(),
                form.starts_meeting(),
            )
        };

        let response = self
            .api
            .submit_form(&action, &fields)
            .await
            .map_err(|e| self.report_failure(e))?;

        let mut state = self.lock_state();
        self.status_requests.issue();
        if starting {
            let meeting_id = response.meeting_id.unwrap_or(self.meeting_id);
            let code = response.meeting_code.clone();
            state.status_form = Some(StatusForm::end(meeting_id));
            state.status = Some(MeetingStatus::active(code.clone()));
            Ok(StatusChange::Started { code })
        } else {
            state.status_form = None;
            state.status = Some(MeetingStatus::Ended);
            Ok(StatusChange::Ended)
        }
    }

    /// Check an attendee in.
    pub async fn submit_add_attendee(&self) -> Result<ActionResponse, DashboardError> {
        let (action, fields, username) = {
            let mut state = self.lock_state();
            state
                .attendee_form
                .check_validity()
                .map_err(|missing| DashboardError::Validation { missing })?;
            (
                state.attendee_form.action.clone(),
                state.attendee_form.fields().to_vec(),
                state
                    .attendee_form
                    .field(ATTENDEE_FIELD)
                    .unwrap_or_default()
                    .to_string(),
            )
        };

        let response = self
            .api
            .submit_form(&action, &fields)
            .await
            .map_err(|e| self.report_failure(e))?;

        match self.add_attendee_mode {
            AddAttendeeMode::Refresh => {
                self.refresh().await;
            }
            AddAttendeeMode::Echo => {
                let mut state = self.lock_state();
                self.attendee_requests.issue();
                state.pending_attendees.push(username);
            }
        }
        Ok(response)
    }

    /// Remove one attendee. On failure the entry stays and an error banner is shown.
    pub async fn remove_attendee(&self, attendee_id: u64) -> Result<(), DashboardError> {
        match self.api.remove_attendee(self.meeting_id, attendee_id).await {
            Ok(()) => {
                let mut state = self.lock_state();
                self.attendee_requests.issue();
                state.remove_attendee(attendee_id);
                state.push_banner(Banner::success(messages::ATTENDEE_REMOVED));
                Ok(())
            }
            Err(e) => {
                log::warn!("Removal error: {}", e);
                self.lock_state()
                    .push_banner(Banner::error(messages::ATTENDEE_REMOVAL_FAILED));
                Err(DashboardError::Api(e))
            }
        }
    }

    /// Issue a new join code and show it.
    pub async fn reset_code(&self) -> Result<String, DashboardError> {
        let code = self
            .api
            .reset_code(self.meeting_id)
            .await
            .map_err(|e| self.report_failure(e))?;

        let mut state = self.lock_state();
        self.status_requests.issue();
        state.status = Some(MeetingStatus::active(Some(code.clone())));
        state.push_banner(Banner::success(format!("New meeting code: {}", code)));
        Ok(code)
    }

    // =========================================================================
    // Banners
    // =========================================================================

    pub fn dismiss_banner(&self, index: usize) -> bool {
        self.lock_state().dismiss_banner(index)
    }

    /// Dismiss the most recent banner.
    pub fn dismiss_latest_banner(&self) -> bool {
        let len = self.lock_state().banners.len();
        len.checked_sub(1)
            .is_some_and(|index| self.dismiss_banner(index))
    }

    pub fn clear_banners(&self) {
        self.lock_state().banners.clear();
    }

    /// Show the failure of a form submission and hand the error back.
    fn report_failure(&self, error: ApiError) -> DashboardError {
        let message = match (&error, error.server_message()) {
            (_, Some(message)) => message.to_string(),
            (ApiError::UnexpectedResponse(message), None) => message.clone(),
            _ => messages::NETWORK_ERROR.to_string(),
        };
        log::log!(
            log::Level::from(self.classify(&error)),
            "Form submission failed: {}",
            error
        );
        self.lock_state().push_banner(Banner::error(message));
        DashboardError::Api(error)
    }
}


#[cfg(test)]
mod ordering_tests {
    //! Interleaves two polls against a gated fake server.

    use super::*;
    use crate::api::types::{Attachment, MinutesEntry};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// The first status request blocks until released; later ones answer at once.
    struct GatedApi {
        calls: AtomicUsize,
        release_first: Notify,
    }

    #[async_trait::async_trait]
    impl AdminApi for GatedApi {
        fn base_url(&self) -> String {
            "http://records.test".to_string()
        }

        async fn meeting_state(&self, _meeting_id: u64) -> Result<MeetingStatus, ApiError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.release_first.notified().await;
                Ok(MeetingStatus::NotStarted)
            } else {
                Ok(MeetingStatus::Ended)
            }
        }

        async fn attendees(&self, _meeting_id: u64) -> Result<Vec<Attendee>, ApiError> {
            Ok(Vec::new())
        }

        async fn minutes(&self, _meeting_id: u64) -> Result<Vec<MinutesEntry>, ApiError> {
            Ok(Vec::new())
        }

        async fn attachments(&self, _meeting_id: u64) -> Result<Vec<Attachment>, ApiError> {
            Ok(Vec::new())
        }

        async fn submit_form(
            &self,
            _action: &str,
            _fields: &[(String, String)],
        ) -> Result<ActionResponse, ApiError> {
            Ok(ActionResponse::default())
        }

        async fn remove_attendee(&self, _meeting_id: u64, _attendee_id: u64) -> Result<(), ApiError> {
            Ok(())
        }

        async fn reset_code(&self, _meeting_id: u64) -> Result<String, ApiError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    /// A slow poll that finishes after a newer one must not overwrite it.
    async fn test_slow_poll_cannot_overwrite_newer_one() {
        let api = Arc::new(GatedApi {
            calls: AtomicUsize::new(0),
            release_first: Notify::new(),
        });
        let client = Arc::new(DashboardClient::new(
            api.clone(),
            4,
            AddAttendeeMode::Refresh,
        ));

        let slow = tokio::spawn({
            let client = client.clone();
            async move { client.refresh().await }
        });
        // Wait until the slow poll has issued its request.
        while api.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let fast = client.refresh().await;
        assert!(matches!(fast.status, RegionOutcome::Applied));

        api.release_first.notify_one();
        let slow = slow.await.unwrap();
        assert!(matches!(slow.status, RegionOutcome::Stale));
        assert_eq!(client.view().status.unwrap().text, "Ended");
    }
}
