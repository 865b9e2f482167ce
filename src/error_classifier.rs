use crate::api::error::ApiError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Log level for a failed request.
    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Critical: the session is missing or lacks admin rights
            ApiError::Http { status, .. } | ApiError::Status { status, .. }
                if *status == 401 || *status == 403 =>
            {
                LogLevel::Error
            }
            ApiError::InvalidCookie(_) => LogLevel::Error,

            // Temporary server issues
            ApiError::Http { status, .. } | ApiError::Status { status, .. }
                if (500..=599).contains(status) =>
            {
                LogLevel::Warn
            }

            // Rejected input; the server message is shown to the user anyway
            ApiError::Http { .. } => LogLevel::Info,
            ApiError::UnexpectedResponse(_) => LogLevel::Info,

            // Network and malformed responses
            ApiError::Status { .. } | ApiError::Reqwest(_) | ApiError::Decode(_) => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_http_statuses() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_api_error(&http(403)), LogLevel::Error);
        assert_eq!(classifier.classify_api_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_api_error(&http(502)), LogLevel::Warn);
        assert_eq!(classifier.classify_api_error(&http(400)), LogLevel::Info);

        let forbidden_page = ApiError::Status {
            status: 403,
            body: "<h1>Forbidden</h1>".to_string(),
        };
        assert_eq!(classifier.classify_api_error(&forbidden_page), LogLevel::Error);
    }

    #[test]
    fn test_classify_decode_error() {
        let decode = serde_json::from_str::<u64>("<html>").unwrap_err();
        assert_eq!(
            ErrorClassifier::default().classify_api_error(&ApiError::Decode(decode)),
            LogLevel::Warn
        );
    }
}
