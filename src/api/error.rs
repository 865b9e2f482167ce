//! Error handling for the admin API module

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a body that is not the expected JSON.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server rejected the request and explained why.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The server rejected the request without a JSON message (login
    /// redirects, error pages, proxies).
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The configured session cookie cannot be sent as a header.
    #[error("Invalid session cookie: {0}")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),

    /// A 2xx response that lacked what the operation needed.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        Self::from_status_and_body(status, &body)
    }

    /// Uses the JSON `message` when the body has one, the raw text otherwise.
    fn from_status_and_body(status: u16, body: &str) -> ApiError {
        match serde_json::from_str::<MessageBody>(body) {
            Ok(parsed) => ApiError::Http {
                status,
                message: parsed.message,
            },
            Err(_) => ApiError::Status {
                status,
                body: body.trim().to_string(),
            },
        }
    }

    /// The message a server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
