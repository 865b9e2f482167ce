//! One-shot dashboard commands.
//!
//! Each command bootstraps or refreshes the page, performs one action and
//! prints the outcome.

use crate::api::error::ApiError;
use crate::api::paths;
use crate::config::Config;
use crate::consts::cli_consts::messages;
use crate::dashboard::client::StatusChange;
use crate::dashboard::{BannerKind, DashboardClient, DashboardError, RegionOutcome};
use crate::environment::Environment;
use crate::pretty::{
    handle_cmd_error, print_cmd_error, print_cmd_info, print_cmd_success,
    print_friendly_error_header,
};
use std::error::Error;
use std::path::Path;

/// Whether the start or the end form should be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTarget {
    Start,
    End,
}

fn report_error(client: &DashboardClient, error: &DashboardError) {
    if let DashboardError::Api(ApiError::Reqwest(_)) = error {
        print_friendly_error_header(&client.base_url());
    }
    // Server-side failures were already turned into banners
    for banner in client
        .view()
        .banners
        .iter()
        .filter(|banner| banner.kind == BannerKind::Error)
    {
        print_cmd_error!("Server response", "{}", banner.message);
    }
}

/// Poll once, failing if either region could not be read.
async fn refresh_once(client: &DashboardClient) -> Result<(), Box<dyn Error>> {
    let report = client.refresh().await;
    if let Some(error) = [report.status, report.attendees]
        .into_iter()
        .find_map(|outcome| match outcome {
            RegionOutcome::Failed(e) => Some(e),
            _ => None,
        })
    {
        let error = DashboardError::Api(error);
        report_error(client, &error);
        return Err(handle_cmd_error!(error, "Failed to refresh the dashboard.").into());
    }
    Ok(())
}

/// Print the status line and the attendee list.
pub async fn show_status(client: &DashboardClient) -> Result<(), Box<dyn Error>> {
    refresh_once(client).await?;
    print!("{}", client.view());
    Ok(())
}

/// Print one attendee per line as `id<TAB>username`.
pub async fn show_attendees(client: &DashboardClient) -> Result<(), Box<dyn Error>> {
    refresh_once(client).await?;
    for entry in client.view().attendees {
        let id = entry.id.map(|id| id.to_string()).unwrap_or_default();
        println!("{}\t{}", id, entry.username);
    }
    Ok(())
}

pub async fn show_attachments(client: &DashboardClient) -> Result<(), Box<dyn Error>> {
    let count = client
        .fetch_attachments()
        .await
        .map_err(|e| handle_cmd_error!(e, "Failed to list attachments."))?;
    println!("Attachments ({}):", count);
    for attachment in client.view().attachments {
        println!("  {} ({})", attachment.filename, attachment.path);
    }
    Ok(())
}

/// Start or end the meeting. The current status decides which form exists.
pub async fn change_status(
    client: &DashboardClient,
    target: StatusTarget,
) -> Result<(), Box<dyn Error>> {
    let report = client.bootstrap().await;
    if let RegionOutcome::Failed(e) = report.refresh.status {
        let error = DashboardError::Api(e);
        report_error(client, &error);
        return Err(handle_cmd_error!(error, "Failed to read the meeting status.").into());
    }
    let view = client.view();
    let starts = view
        .status_form
        .as_ref()
        .map(|form| form.form.action.contains(paths::START_ACTION_MARKER));
    match (target, starts) {
        (_, None) => return Err("The meeting has already ended.".into()),
        (StatusTarget::Start, Some(false)) => return Err("The meeting is already active.".into()),
        (StatusTarget::End, Some(true)) => return Err("The meeting has not started yet.".into()),
        _ => {}
    }

    match client.submit_status_change().await {
        Ok(StatusChange::Started { code }) => {
            print_cmd_success!(
                "Meeting started.",
                "Meeting code: {}",
                code.as_deref().unwrap_or("(not returned)")
            );
            Ok(())
        }
        Ok(StatusChange::Ended) => {
            print_cmd_success!("Meeting ended.", "Meeting {}", client.meeting_id());
            Ok(())
        }
        Err(e) => {
            report_error(client, &e);
            Err(handle_cmd_error!(e, "Failed to change the meeting status.").into())
        }
    }
}

/// Save the minutes, editing the latest entry when one exists.
pub async fn save_minutes(client: &DashboardClient, notes: &str) -> Result<(), Box<dyn Error>> {
    // Without the existing entry the save would create a second one
    if let Err(e) = client.bootstrap().await.minutes {
        let error = DashboardError::Api(e);
        report_error(client, &error);
        return Err(handle_cmd_error!(error, "Failed to read the existing minutes.").into());
    }
    client.set_minutes_notes(notes);
    match client.submit_minutes().await {
        Ok(response) => {
            print_cmd_success!(
                "Minutes saved.",
                "{} (next save goes to {})",
                response.message,
                client.view().minutes_form.action
            );
            Ok(())
        }
        Err(e) => {
            report_error(client, &e);
            Err(handle_cmd_error!(e, "Failed to save the minutes.").into())
        }
    }
}

pub async fn add_attendee(client: &DashboardClient, username: &str) -> Result<(), Box<dyn Error>> {
    client.set_attendee_username(username);
    match client.submit_add_attendee().await {
        Ok(response) => {
            print_cmd_success!("Attendee added.", "{}", response.message);
            print!("{}", client.view());
            Ok(())
        }
        Err(e) => {
            report_error(client, &e);
            Err(handle_cmd_error!(e, "Failed to add the attendee.").into())
        }
    }
}

pub async fn remove_attendee(
    client: &DashboardClient,
    attendee_id: u64,
) -> Result<(), Box<dyn Error>> {
    match client.remove_attendee(attendee_id).await {
        Ok(()) => {
            let title = messages::ATTENDEE_REMOVED;
            print_cmd_success!(title, "Attendee {}", attendee_id);
            Ok(())
        }
        Err(e) => {
            report_error(client, &e);
            Err(handle_cmd_error!(e, "Failed to remove the attendee.").into())
        }
    }
}

pub async fn reset_code(client: &DashboardClient) -> Result<(), Box<dyn Error>> {
    match client.reset_code().await {
        Ok(code) => {
            print_cmd_success!("Meeting code reset.", "New meeting code: {}", code);
            Ok(())
        }
        Err(e) => {
            report_error(client, &e);
            Err(handle_cmd_error!(e, "Failed to reset the meeting code.").into())
        }
    }
}

/// Values accepted by `configure`; `None` keeps what the file already has.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub meeting_id: Option<u64>,
    pub base_url: Option<String>,
    pub session_cookie: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub echo_added_attendees: Option<bool>,
}

/// Merge `update` into the config file at `config_path`.
pub fn configure(config_path: &Path, update: ConfigUpdate) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::load_or_default(config_path)
        .map_err(|e| handle_cmd_error!(e, "Failed to read the existing config."))?;

    config.meeting_id = update.meeting_id.or(config.meeting_id);
    if config.meeting_id.is_none() {
        return Err("A meeting id is required: pass --meeting-id.".into());
    }
    if let Some(base_url) = update.base_url {
        if base_url.parse::<Environment>().is_err() {
            return Err(format!("Invalid base URL: {}", base_url).into());
        }
        config.base_url = Some(base_url);
    }
    if let Some(cookie) = update.session_cookie {
        config.session_cookie = Some(cookie);
    }
    if let Some(secs) = update.refresh_interval_secs {
        config.refresh_interval_secs = Some(secs);
    }
    if let Some(echo) = update.echo_added_attendees {
        config.echo_added_attendees = echo;
    }

    config
        .save(config_path)
        .map_err(|e| handle_cmd_error!(e, "Failed to save config."))?;
    print_cmd_info!(
        "Configuration saved.",
        "Meeting {} at {}",
        config.meeting_id.unwrap_or_default(),
        config.base_url.as_deref().unwrap_or("the default server")
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::api::types::{ActionResponse, MeetingStatus, MinutesEntry};
    use crate::dashboard::AddAttendeeMode;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn client_with(mock: MockAdminApi) -> DashboardClient {
        DashboardClient::new(Arc::new(mock), 6, AddAttendeeMode::Refresh)
    }

    fn expect_bootstrap(mock: &mut MockAdminApi, status: &'static str) {
        mock.expect_minutes().returning(|_| Ok(vec![]));
        mock.expect_attachments().returning(|_| Ok(vec![]));
        mock.expect_meeting_state()
            .returning(move |_| Ok(MeetingStatus::from_payload(status)));
        mock.expect_attendees().returning(|_| Ok(vec![]));
    }

    #[tokio::test]
    async fn test_start_refused_when_already_active() {
        let mut mock = MockAdminApi::new();
        expect_bootstrap(&mut mock, "Active");
        mock.expect_submit_form().never();
        let client = client_with(mock);

        let result = change_status(&client, StatusTarget::Start).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "The meeting is already active."
        );
    }

    #[tokio::test]
    async fn test_end_submits_end_form() {
        let mut mock = MockAdminApi::new();
        expect_bootstrap(&mut mock, "Active");
        mock.expect_submit_form()
            .withf(|action, _| action == "/admin/end/6/")
            .times(1)
            .returning(|_, _| {
                Ok(ActionResponse {
                    message: "Meeting ended.".to_string(),
                    ..Default::default()
                })
            });
        let client = client_with(mock);

        change_status(&client, StatusTarget::End).await.unwrap();
        assert!(client.view().status_form.is_none());
    }

    #[tokio::test]
    async fn test_ended_meeting_has_no_status_form() {
        let mut mock = MockAdminApi::new();
        expect_bootstrap(&mut mock, "Ended");
        let client = client_with(mock);

        let result = change_status(&client, StatusTarget::End).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "The meeting has already ended."
        );
    }

    #[tokio::test]
    async fn test_status_read_failure_is_reported_before_submitting() {
        let mut mock = MockAdminApi::new();
        mock.expect_minutes().returning(|_| Ok(vec![]));
        mock.expect_attachments().returning(|_| Ok(vec![]));
        mock.expect_meeting_state().returning(|_| {
            Err(ApiError::Http {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
        });
        mock.expect_attendees().returning(|_| Ok(vec![]));
        mock.expect_submit_form().never();
        let client = client_with(mock);

        let message = change_status(&client, StatusTarget::End)
            .await
            .unwrap_err()
            .to_string();
        assert_ne!(message, "The meeting has not started yet.");
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn test_minutes_not_saved_when_existing_entries_unreadable() {
        let mut mock = MockAdminApi::new();
        mock.expect_minutes().returning(|_| {
            Err(ApiError::Http {
                status: 500,
                message: "down".to_string(),
            })
        });
        mock.expect_attachments().returning(|_| Ok(vec![]));
        mock.expect_meeting_state()
            .returning(|_| Ok(MeetingStatus::from_payload("Active")));
        mock.expect_attendees().returning(|_| Ok(vec![]));
        mock.expect_submit_form().never();
        let client = client_with(mock);

        let result = save_minutes(&client, "Quorum reached.").await;
        assert!(result.unwrap_err().to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_minutes_edit_latest_entry() {
        let mut mock = MockAdminApi::new();
        mock.expect_minutes().returning(|_| {
            Ok(vec![MinutesEntry {
                id: 4,
                notes: "Draft".to_string(),
                username_by: "host".to_string(),
            }])
        });
        mock.expect_attachments().returning(|_| Ok(vec![]));
        mock.expect_meeting_state()
            .returning(|_| Ok(MeetingStatus::from_payload("Active")));
        mock.expect_attendees().returning(|_| Ok(vec![]));
        mock.expect_submit_form()
            .withf(|action, _| action == "/admin/minutes/6/4")
            .times(1)
            .returning(|_, _| {
                Ok(ActionResponse {
                    message: "Meeting minutes saved successfully.".to_string(),
                    meeting_id: Some(6),
                    minutes_id: Some(4),
                    ..Default::default()
                })
            });
        let client = client_with(mock);

        save_minutes(&client, "Final").await.unwrap();
    }

    #[test]
    fn test_configure_merges_into_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut existing = Config::new(3, Some("http://localhost:5000".to_string()));
        existing.session_cookie = Some("session=old".to_string());
        existing.save(&path).unwrap();

        let saved = configure(
            &path,
            ConfigUpdate {
                refresh_interval_secs: Some(30),
                echo_added_attendees: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(saved.meeting_id, Some(3));
        assert_eq!(saved.session_cookie.as_deref(), Some("session=old"));
        assert_eq!(saved.refresh_interval_secs, Some(30));
        assert!(saved.echo_added_attendees);
        assert_eq!(Config::load_from_file(&path).unwrap(), saved);
    }

    #[test]
    fn test_configure_requires_meeting_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(configure(&path, ConfigUpdate::default()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_configure_rejects_bad_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let update = ConfigUpdate {
            meeting_id: Some(1),
            base_url: Some("records.example".to_string()),
            ..Default::default()
        };
        assert!(configure(&path, update).is_err());
    }
}
