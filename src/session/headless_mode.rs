//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::dashboard::DashboardView;
use crate::logging::init_console_logger;
use std::error::Error;

/// Runs the dashboard in headless mode
///
/// Events are printed as they arrive and the page is printed again whenever
/// a refresh changed it. Ctrl+C shuts the worker down.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    init_console_logger();
    print_session_starting(
        "headless",
        session.client.meeting_id(),
        &session.client.base_url(),
    );

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut last_view: Option<DashboardView> = None;

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                let view = session.client.view();
                if last_view.as_ref() != Some(&view) {
                    print!("{}", view);
                    last_view = Some(view);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
