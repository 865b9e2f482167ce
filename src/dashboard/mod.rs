//! Meeting dashboard core
//!
//! The page model, its pure render functions and the client that keeps it in
//! sync with the server.

pub mod client;
pub mod forms;
pub mod sequencer;
pub mod state;
pub mod view;

pub use client::{AddAttendeeMode, DashboardClient, DashboardError, RefreshReport, RegionOutcome};
pub use state::{Banner, BannerKind, PageState};
pub use view::DashboardView;
