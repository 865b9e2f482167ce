//! Runtime for coordinating the refresh worker

use crate::dashboard::DashboardClient;
use crate::events::Event;
use crate::workers::RefreshWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Start the refresh worker for one meeting.
///
/// Returns the event stream the UI consumes, the worker handles and a sender
/// the UI uses to report its own events into the same stream.
pub async fn start_refresh_worker(
    client: Arc<DashboardClient>,
    shutdown: broadcast::Receiver<()>,
    interval: Duration,
) -> (mpsc::Receiver<Event>, Vec<JoinHandle<()>>, mpsc::Sender<Event>) {
    let (event_sender, event_receiver) =
        mpsc::channel::<Event>(crate::consts::cli_consts::EVENT_QUEUE_SIZE);

    let worker = RefreshWorker::new(client, event_sender.clone(), interval);
    let join_handles = worker.run(shutdown).await;
    (event_receiver, join_handles, event_sender)
}
