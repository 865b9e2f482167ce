//! Session setup and initialization

use crate::api::AdminClient;
use crate::api::error::ApiError;
use crate::config::Config;
use crate::consts::cli_consts::refresh;
use crate::dashboard::{AddAttendeeMode, DashboardClient};
use crate::environment::Environment;
use crate::events::Event;
use crate::runtime::start_refresh_worker;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No meeting id given. Pass --meeting-id or run `meeting-dashboard configure`.")]
    MissingMeetingId,

    #[error("Invalid base URL '{0}': expected `local` or an http(s) URL")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Everything needed to talk to one meeting, with flags layered over the
/// config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub meeting_id: u64,
    pub environment: Environment,
    pub session_cookie: Option<String>,
    pub interval: Duration,
    pub add_attendee_mode: AddAttendeeMode,
}

/// Command-line overrides for [`SessionSettings::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub meeting_id: Option<u64>,
    pub base_url: Option<String>,
    pub interval_secs: Option<u64>,
    pub echo_attendees: bool,
}

impl SessionSettings {
    /// Flags win over the config file; the base URL falls back to
    /// `MEETING_DASHBOARD_ENVIRONMENT`.
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self, SetupError> {
        let meeting_id = overrides
            .meeting_id
            .or(config.meeting_id)
            .ok_or(SetupError::MissingMeetingId)?;

        let environment = match overrides.base_url.or_else(|| config.base_url.clone()) {
            Some(url) => url
                .parse::<Environment>()
                .map_err(|_| SetupError::InvalidBaseUrl(url))?,
            None => Environment::from_env(),
        };

        let interval = overrides
            .interval_secs
            .or(config.refresh_interval_secs)
            .map(refresh::clamp_interval)
            .unwrap_or_else(refresh::refresh_interval);

        let add_attendee_mode = if overrides.echo_attendees || config.echo_added_attendees {
            AddAttendeeMode::Echo
        } else {
            AddAttendeeMode::Refresh
        };

        Ok(Self {
            meeting_id,
            environment,
            session_cookie: config.session_cookie.clone(),
            interval,
            add_attendee_mode,
        })
    }
}

/// Build the shared dashboard client over a live HTTP connection.
pub fn build_client(settings: &SessionSettings) -> Result<Arc<DashboardClient>, SetupError> {
    let api = AdminClient::new(
        settings.environment.clone(),
        settings.session_cookie.as_deref(),
    )?;
    Ok(Arc::new(DashboardClient::new(
        Arc::new(api),
        settings.meeting_id,
        settings.add_attendee_mode,
    )))
}

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for worker and UI events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender into the same stream, for events raised outside the worker
    pub event_sender: mpsc::Sender<Event>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    pub client: Arc<DashboardClient>,
    pub interval: Duration,
}

/// Sets up a watch session
///
/// Builds the dashboard client, creates the shutdown channel and starts the
/// refresh worker. Mode-specific handling is left to the caller.
pub async fn setup_session(settings: SessionSettings) -> Result<SessionData, SetupError> {
    let client = build_client(&settings)?;

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let (event_receiver, join_handles, event_sender) = start_refresh_worker(
        client.clone(),
        shutdown_sender.subscribe(),
        settings.interval,
    )
    .await;

    Ok(SessionData {
        event_receiver,
        event_sender,
        join_handles,
        shutdown_sender,
        client,
        interval: settings.interval,
    })
}
