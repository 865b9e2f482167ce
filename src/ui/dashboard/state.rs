//! Dashboard state management
//!
//! Contains the terminal dashboard state and the actions a key press can
//! request.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::dashboard::DashboardView;
use crate::events::Event as WorkerEvent;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Text being typed into one of the dashboard forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Minutes(String),
    Attendee(String),
}

impl InputMode {
    pub fn buffer(&self) -> &str {
        match self {
            InputMode::Minutes(text) | InputMode::Attendee(text) => text,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self {
            InputMode::Minutes(text) | InputMode::Attendee(text) => text,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InputMode::Minutes(_) => "MEETING MINUTES",
            InputMode::Attendee(_) => "ADD ATTENDEE",
        }
    }
}

/// Work requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    Refresh,
    SubmitStatusChange,
    SubmitMinutes(String),
    SubmitAttendee(String),
    RemoveAttendee(u64),
    ResetCode,
    DismissBanner,
    ClearBanners,
}

#[derive(Debug)]
pub struct DashboardState {
    pub meeting_id: u64,
    pub base_url: String,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    pub refresh_interval_secs: u64,
    /// Latest page snapshot.
    pub view: DashboardView,
    /// Index into `view.attendees`.
    pub selected_attendee: usize,
    pub input: Option<InputMode>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    pub with_background_color: bool,
    /// When a new `last_refresh` stamp was first seen; drives the countdown.
    pub refreshed_at: Option<Instant>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(
        view: DashboardView,
        base_url: String,
        start_time: Instant,
        ui_config: &UIConfig,
    ) -> Self {
        Self {
            meeting_id: view.meeting_id,
            base_url,
            start_time,
            refresh_interval_secs: ui_config.refresh_interval_secs,
            view,
            selected_attendee: 0,
            input: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            refreshed_at: None,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Fraction of the refresh interval elapsed, in percent.
    pub fn refresh_progress(&self) -> u16 {
        let Some(at) = self.refreshed_at else {
            return 0;
        };
        if self.refresh_interval_secs == 0 {
            return 100;
        }
        let elapsed = at.elapsed().as_secs();
        ((elapsed * 100) / self.refresh_interval_secs).min(100) as u16
    }

    /// Server id of the highlighted attendee, if it has one yet.
    pub fn selected_attendee_id(&self) -> Option<u64> {
        self.view
            .attendees
            .get(self.selected_attendee)
            .and_then(|entry| entry.id)
    }
}
