//! Periodic refresh of the status and attendee regions

use super::core::EventSender;
use crate::dashboard::{DashboardClient, RefreshReport, RegionOutcome};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Drives [`DashboardClient::refresh`] on a fixed timer.
///
/// The first tick fires immediately and bootstraps the page instead of a
/// plain refresh.
pub struct RefreshWorker {
    client: Arc<DashboardClient>,
    event_sender: EventSender,
    interval: Duration,
    bootstrapped: bool,
}

impl RefreshWorker {
    pub fn new(
        client: Arc<DashboardClient>,
        event_sender: mpsc::Sender<Event>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            event_sender: EventSender::new(event_sender),
            interval,
            bootstrapped: false,
        }
    }

    /// Start the worker
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> Vec<JoinHandle<()>> {
        self.event_sender
            .send_refresh_event(
                format!(
                    "Watching meeting {} every {}s",
                    self.client.meeting_id(),
                    self.interval.as_secs()
                ),
                EventType::Refresh,
                LogLevel::Info,
            )
            .await;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = ticker.tick() => self.cycle().await,
                }
            }
        });
        vec![handle]
    }

    /// One poll of both regions, reported as events.
    async fn cycle(&mut self) {
        self.event_sender
            .send_refresh_event(
                "Refreshing status and attendees".to_string(),
                EventType::Refresh,
                LogLevel::Debug,
            )
            .await;

        let report = if self.bootstrapped {
            self.client.refresh().await
        } else {
            self.bootstrapped = true;
            let bootstrap = self.client.bootstrap().await;
            if let Err(e) = &bootstrap.minutes {
                self.event_sender
                    .send_refresh_event(
                        format!("Could not load existing minutes: {}", e),
                        EventType::Error,
                        LogLevel::Warn,
                    )
                    .await;
            }
            bootstrap.refresh
        };
        self.report(report).await;
    }

    async fn report(&self, report: RefreshReport) {
        let view = self.client.view();

        let status_text = view
            .status
            .map(|status| status.text)
            .unwrap_or_else(|| "unknown".to_string());
        self.report_region("status", report.status, format!("Status: {}", status_text))
            .await;

        let attendee_count = view.attendees.len();
        self.report_region(
            "attendees",
            report.attendees,
            format!("{} attendee(s) checked in", attendee_count),
        )
        .await;
    }

    async fn report_region(&self, region: &str, outcome: RegionOutcome, applied_msg: String) {
        match outcome {
            RegionOutcome::Applied => {
                self.event_sender
                    .send_refresh_event(applied_msg, EventType::Success, LogLevel::Info)
                    .await;
            }
            RegionOutcome::Stale => {
                self.event_sender
                    .send_refresh_event(
                        format!("Dropped stale {} response", region),
                        EventType::Stale,
                        LogLevel::Debug,
                    )
                    .await;
            }
            RegionOutcome::Failed(e) => {
                let log_level = self.client.classify(&e);
                self.event_sender
                    .send_refresh_event(
                        format!("Failed to refresh {}: {}", region, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
            }
        }
    }
}
