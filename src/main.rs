mod api;
mod commands;
mod config;
mod consts;
mod dashboard;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod pretty;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::commands::{ConfigUpdate, StatusTarget};
use crate::config::{Config, get_config_path};
use crate::logging::init_console_logger;
use crate::session::messages::print_missing_session_warning;
use crate::session::{
    Overrides, SessionSettings, build_client, run_headless_mode, run_tui_mode, setup_session,
};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Admin dashboard for a meeting-records server
struct Args {
    /// Meeting to operate on; overrides the config file
    #[arg(long, global = true, value_name = "MEETING_ID")]
    meeting_id: Option<u64>,

    /// Server base URL (`local` or an http(s) URL); overrides the config file
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Watch the meeting dashboard, refreshing status and attendees on a timer
    Watch {
        /// Print events to the console instead of running the terminal UI
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Refresh period in seconds
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        /// Show added attendees immediately instead of re-polling the list
        #[arg(long, default_value_t = false)]
        echo_attendees: bool,

        /// Disable the dashboard background color
        #[arg(long, default_value_t = false)]
        no_background_color: bool,
    },
    #[command(flatten)]
    Action(ActionCommand),
    /// Save the meeting id, server and session to the config file
    Configure {
        /// Raw `Cookie` header of a logged-in admin session
        #[arg(long, value_name = "COOKIE")]
        session_cookie: Option<String>,

        /// Default refresh period in seconds
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        /// Default for `watch --echo-attendees`
        #[arg(long)]
        echo_attendees: Option<bool>,
    },
    /// Delete the config file
    ClearConfig,
}

/// One-shot commands against the configured meeting
#[derive(Subcommand)]
enum ActionCommand {
    /// Print the meeting status and attendees once
    Status,
    /// Print the attendee list once
    Attendees,
    /// List the meeting's attachments
    Attachments,
    /// Start the meeting
    Start,
    /// End the meeting
    End,
    /// Save the meeting minutes
    Minutes {
        #[arg(long, value_name = "TEXT")]
        notes: String,
    },
    /// Check an attendee into the meeting
    AddAttendee {
        #[arg(long, value_name = "USERNAME")]
        username: String,
    },
    /// Remove an attendee from the meeting
    RemoveAttendee {
        #[arg(long, value_name = "ATTENDEE_ID")]
        attendee_id: u64,
    },
    /// Issue a new meeting code
    ResetCode,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;

    match args.command {
        Command::Configure {
            session_cookie,
            interval,
            echo_attendees,
        } => {
            commands::configure(
                &config_path,
                ConfigUpdate {
                    meeting_id: args.meeting_id,
                    base_url: args.base_url,
                    session_cookie,
                    refresh_interval_secs: interval,
                    echo_added_attendees: echo_attendees,
                },
            )?;
            Ok(())
        }
        Command::ClearConfig => {
            println!("Clearing dashboard configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
        Command::Watch {
            headless,
            interval,
            echo_attendees,
            no_background_color,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let settings = SessionSettings::resolve(
                &config,
                Overrides {
                    meeting_id: args.meeting_id,
                    base_url: args.base_url,
                    interval_secs: interval,
                    echo_attendees,
                },
            )?;
            if settings.session_cookie.is_none() {
                print_missing_session_warning();
            }
            let session = setup_session(settings).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, !no_background_color).await
            }
        }
        Command::Action(action) => {
            init_console_logger();
            let config = Config::load_or_default(&config_path)?;
            let settings = SessionSettings::resolve(
                &config,
                Overrides {
                    meeting_id: args.meeting_id,
                    base_url: args.base_url,
                    ..Default::default()
                },
            )?;
            let client = build_client(&settings)?;
            match action {
                ActionCommand::Status => commands::show_status(&client).await,
                ActionCommand::Attendees => commands::show_attendees(&client).await,
                ActionCommand::Attachments => commands::show_attachments(&client).await,
                ActionCommand::Start => commands::change_status(&client, StatusTarget::Start).await,
                ActionCommand::End => commands::change_status(&client, StatusTarget::End).await,
                ActionCommand::Minutes { notes } => commands::save_minutes(&client, &notes).await,
                ActionCommand::AddAttendee { username } => {
                    commands::add_attendee(&client, &username).await
                }
                ActionCommand::RemoveAttendee { attendee_id } => {
                    commands::remove_attendee(&client, attendee_id).await
                }
                ActionCommand::ResetCode => commands::reset_code(&client).await,
            }
        }
    }
}
