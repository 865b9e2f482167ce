//! Meeting-records Admin Client
//!
//! A reqwest client for the read API and the admin form actions of the
//! meeting-records server.

use crate::api::AdminApi;
use crate::api::error::ApiError;
use crate::api::paths;
use crate::api::types::{ActionResponse, Attachment, Attendee, MeetingStatus, MinutesEntry};
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("meeting-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AdminClient {
    client: Client,
    environment: Environment,
}

impl AdminClient {
    /// Creates a client for `environment`, optionally replaying an existing
    /// admin session through its `Cookie` header.
    pub fn new(environment: Environment, session_cookie: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    /// Resolves a relative path against the base URL. Absolute URLs pass
    /// through, since form actions are server-designated.
    fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            self.environment.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {} ({} fields)", url, fields.len());
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .form(fields)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request_no_response(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }

    /// Reads the join code from the `/admin/show-code?code=...` URL the reset
    /// endpoint redirects to.
    fn code_from_url(url: &reqwest::Url) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|code| !code.is_empty())
    }
}

#[async_trait::async_trait]
impl AdminApi for AdminClient {
    fn base_url(&self) -> String {
        self.environment.base_url()
    }

    async fn meeting_state(&self, meeting_id: u64) -> Result<MeetingStatus, ApiError> {
        let payload: String = self.get_request(&paths::meeting_state(meeting_id)).await?;
        Ok(MeetingStatus::from_payload(&payload))
    }

    async fn attendees(&self, meeting_id: u64) -> Result<Vec<Attendee>, ApiError> {
        self.get_request(&paths::attendees(meeting_id)).await
    }

    async fn minutes(&self, meeting_id: u64) -> Result<Vec<MinutesEntry>, ApiError> {
        self.get_request(&paths::notes(meeting_id)).await
    }

    async fn attachments(&self, meeting_id: u64) -> Result<Vec<Attachment>, ApiError> {
        self.get_request(&paths::attachments(meeting_id)).await
    }

    async fn submit_form(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<ActionResponse, ApiError> {
        self.post_form(action, fields).await
    }

    async fn remove_attendee(&self, meeting_id: u64, attendee_id: u64) -> Result<(), ApiError> {
        self.post_request_no_response(&paths::remove_attendee(meeting_id, attendee_id))
            .await
    }

    async fn reset_code(&self, meeting_id: u64) -> Result<String, ApiError> {
        let url = self.build_url(&paths::reset_code(meeting_id));
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;

        // An inactive meeting renders an error page with 200 instead of redirecting.
        Self::code_from_url(response.url()).ok_or_else(|| {
            ApiError::UnexpectedResponse("This meeting is not active.".to_string())
        })
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live server to run.
mod live_server_tests {
    use crate::api::AdminApi;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live meeting-records server.
    /// Should read the state of an existing meeting.
    async fn test_meeting_state() {
        let client = super::AdminClient::new(Environment::Local, None).unwrap();
        match client.meeting_state(1).await {
            Ok(status) => println!("Meeting status: {}", status),
            Err(e) => panic!("Failed to get meeting state: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live meeting-records server.
    /// Should list attendees of an existing meeting.
    async fn test_attendees() {
        let client = super::AdminClient::new(Environment::Local, None).unwrap();
        match client.attendees(1).await {
            Ok(attendees) => println!("Got {} attendees", attendees.len()),
            Err(e) => panic!("Failed to get attendees: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AdminClient {
        AdminClient::new(
            Environment::Custom {
                base_url: "http://records.test/".to_string(),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_build_url_joins_relative_paths() {
        let client = client();
        assert_eq!(
            client.build_url("/api/event/state/4"),
            "http://records.test/api/event/state/4"
        );
        assert_eq!(
            client.build_url("admin/minutes/4/"),
            "http://records.test/admin/minutes/4/"
        );
    }

    #[test]
    fn test_build_url_keeps_absolute_actions() {
        assert_eq!(
            client().build_url("https://other.test/admin/end/4/"),
            "https://other.test/admin/end/4/"
        );
    }

    #[test]
    fn test_code_from_redirect_url() {
        let url = reqwest::Url::parse("http://records.test/admin/show-code?code=Qw3rTy78").unwrap();
        assert_eq!(AdminClient::code_from_url(&url), Some("Qw3rTy78".to_string()));

        let error_page = reqwest::Url::parse("http://records.test/admin/reset-code/4").unwrap();
        assert_eq!(AdminClient::code_from_url(&error_page), None);
    }

    #[test]
    fn test_invalid_cookie_is_rejected() {
        let result = AdminClient::new(Environment::Local, Some("session=\nabc"));
        assert!(matches!(result, Err(ApiError::InvalidCookie(_))));
    }

    #[tokio::test]
    /// An unreachable server surfaces as a transport error, never a panic.
    async fn test_unreachable_server_is_reqwest_error() {
        let client = AdminClient::new(
            Environment::Custom {
                base_url: "http://127.0.0.1:9".to_string(),
            },
            None,
        )
        .unwrap();
        let result = client.attendees(1).await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}
