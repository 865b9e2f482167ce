//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::UI_POLL_INTERVAL_MS;
use crate::dashboard::client::StatusChange;
use crate::dashboard::{DashboardClient, DashboardError};
use crate::events::{Event as WorkerEvent, EventType, Source};
use crate::logging::LogLevel;
use crate::ui::dashboard::{DashboardState, UiAction, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::core::EventSender;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub refresh_interval_secs: u64,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_interval_secs: u64) -> Self {
        Self {
            with_background_color,
            refresh_interval_secs,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    client: Arc<DashboardClient>,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from the refresh worker and from spawned actions.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Feeds results of key-triggered actions into the same stream.
    event_sender: EventSender,

    /// Broadcasts shutdown signal to the worker.
    shutdown_sender: broadcast::Sender<()>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        client: Arc<DashboardClient>,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        event_sender: mpsc::Sender<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            client,
            current_screen: Screen::Splash,
            event_receiver,
            event_sender: EventSender::new(event_sender),
            shutdown_sender,
            ui_config,
        }
    }

    fn open_dashboard(&mut self) {
        let state = DashboardState::new(
            self.client.view(),
            self.client.base_url(),
            self.start_time,
            &self.ui_config,
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Run an action without blocking the draw loop.
    fn dispatch(&self, action: UiAction) {
        let client = self.client.clone();
        let events = self.event_sender.clone();
        match action {
            UiAction::Quit => {}
            UiAction::DismissBanner => {
                client.dismiss_latest_banner();
            }
            UiAction::ClearBanners => client.clear_banners(),
            action => {
                tokio::spawn(async move {
                    if let Some(event) = perform(&client, action).await {
                        events.send_event(event).await;
                    }
                });
            }
        }
    }
}

fn failure_event(client: &DashboardClient, source: Source, error: DashboardError) -> WorkerEvent {
    let log_level = match &error {
        DashboardError::Api(e) => client.classify(e),
        DashboardError::Validation { .. } | DashboardError::MissingForm(_) => LogLevel::Warn,
    };
    WorkerEvent::error(source, error.to_string(), log_level)
}

/// Perform a network-bound action and describe its outcome.
async fn perform(client: &DashboardClient, action: UiAction) -> Option<WorkerEvent> {
    let event = match action {
        UiAction::Refresh => {
            let report = client.refresh().await;
            let (event_type, log_level, msg) = if report.is_success() {
                (EventType::Refresh, LogLevel::Info, "Manual refresh complete")
            } else {
                (EventType::Error, LogLevel::Warn, "Manual refresh incomplete")
            };
            WorkerEvent::new(Source::Refresher, msg.to_string(), event_type, log_level)
        }
        UiAction::SubmitStatusChange => match client.submit_status_change().await {
            Ok(StatusChange::Started { code }) => WorkerEvent::success(
                Source::Status,
                match code {
                    Some(code) => format!("Meeting started, code {}", code),
                    None => "Meeting started".to_string(),
                },
            ),
            Ok(StatusChange::Ended) => WorkerEvent::success(Source::Status, "Meeting ended"),
            Err(e) => failure_event(client, Source::Status, e),
        },
        UiAction::SubmitMinutes(notes) => {
            client.set_minutes_notes(notes);
            match client.submit_minutes().await {
                Ok(response) => WorkerEvent::success(Source::Minutes, response.message),
                Err(e) => failure_event(client, Source::Minutes, e),
            }
        }
        UiAction::SubmitAttendee(username) => {
            client.set_attendee_username(username);
            match client.submit_add_attendee().await {
                Ok(response) => WorkerEvent::success(Source::Attendees, response.message),
                Err(e) => failure_event(client, Source::Attendees, e),
            }
        }
        UiAction::RemoveAttendee(attendee_id) => match client.remove_attendee(attendee_id).await {
            Ok(()) => WorkerEvent::success(
                Source::Attendees,
                format!("Removed attendee {}", attendee_id),
            ),
            Err(e) => failure_event(client, Source::Attendees, e),
        },
        UiAction::ResetCode => match client.reset_code().await {
            Ok(code) => WorkerEvent::success(Source::Code, format!("New meeting code {}", code)),
            Err(e) => failure_event(client, Source::Code, e),
        },
        UiAction::Quit | UiAction::DismissBanner | UiAction::ClearBanners => return None,
    };
    Some(event)
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);
    let mut shutdown_receiver = app.shutdown_sender.subscribe();

    // UI event loop
    loop {
        if shutdown_receiver.try_recv().is_ok() {
            return Ok(());
        }

        // Events stay buffered in the channel while the splash is shown
        if let Screen::Dashboard(state) = &mut app.current_screen {
            while let Ok(event) = app.event_receiver.try_recv() {
                state.add_event(event);
            }
            state.update(app.client.view());
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.open_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(UI_POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let action = match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            Some(UiAction::Quit)
                        } else {
                            // Any other key skips the splash screen
                            app.open_dashboard();
                            None
                        }
                    }
                    Screen::Dashboard(state) => state.handle_key(key.code),
                };

                match action {
                    Some(UiAction::Quit) => {
                        // Send shutdown signal to the worker
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    Some(action) => app.dispatch(action),
                    None => {}
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
