use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The meeting-records server the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Development server on the local machine.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { base_url: String },
}

impl Environment {
    /// Returns the base URL of the server, without a trailing slash.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom { base_url } => base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `MEETING_DASHBOARD_ENVIRONMENT`, falling back to [`Environment::Local`].
    pub fn from_env() -> Self {
        std::env::var("MEETING_DASHBOARD_ENVIRONMENT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Environment::Custom {
                    base_url: trimmed.trim_end_matches('/').to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "https://records.example.org/".parse::<Environment>(),
            Ok(Environment::Custom {
                base_url: "https://records.example.org".to_string()
            })
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        let env = Environment::Custom {
            base_url: "http://10.0.0.2:8080//".to_string(),
        };
        assert_eq!(env.base_url(), "http://10.0.0.2:8080");
        assert_eq!(Environment::Local.base_url(), "http://localhost:5000");
    }
}
