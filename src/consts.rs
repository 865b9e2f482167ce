pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! All tunables for polling, HTTP and the terminal UI, grouped by
    //! functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between workers and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Status and attendee polling
    pub mod refresh {
        use std::time::Duration;

        /// Period of the status/attendee poll (seconds)
        pub const REFRESH_INTERVAL_SECS: u64 = 60;

        /// Lower bound accepted for a user-supplied interval (seconds)
        pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

        /// Helper function to get the default refresh interval
        pub const fn refresh_interval() -> Duration {
            Duration::from_secs(REFRESH_INTERVAL_SECS)
        }

        /// Clamp a requested interval to the supported minimum.
        pub fn clamp_interval(secs: u64) -> Duration {
            Duration::from_secs(secs.max(MIN_REFRESH_INTERVAL_SECS))
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        /// TCP connect timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // USER-FACING MESSAGES
    // =============================================================================

    pub mod messages {
        /// Banner shown when a mutation never got a usable response.
        pub const NETWORK_ERROR: &str = "Network error or server unreachable.";

        pub const ATTENDEE_REMOVED: &str = "Attendee removed successfully.";

        pub const ATTENDEE_REMOVAL_FAILED: &str = "An error occurred during removal.";
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// How long a key poll waits before redrawing (milliseconds)
    pub const UI_POLL_INTERVAL_MS: u64 = 100;
}
