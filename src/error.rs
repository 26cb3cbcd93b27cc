//! Error types for weather-mcp
//!
//! Upstream failures are classified once, in the HTTP client, and carried
//! up to the tool boundary where they become structured error payloads.

use thiserror::Error;

/// Failure talking to an Open-Meteo endpoint
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, connect, timeout, reset)
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The body could not be read or decoded as the expected JSON
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Stable tag used in tool error payloads
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport { .. } => "upstream_transport",
            UpstreamError::Status { .. } => "upstream_status",
            UpstreamError::Decode { .. } => "upstream_decode",
        }
    }
}

/// Failure of a tool operation, reported to the host as a structured result
#[derive(Error, Debug)]
pub enum ToolError {
    /// The place name or query was empty
    #[error("location query must not be empty")]
    EmptyQuery,

    /// An explicitly requested place name had no geocoding match
    #[error("location not found: {name}")]
    LocationNotFound { name: String },

    /// The `LOCATION` environment variable had no geocoding match
    #[error("LOCATION environment variable not resolvable: {name}")]
    EnvironmentLocationNotFound { name: String },

    /// A coordinate environment variable is not a number
    #[error("invalid {variable} environment value: {value}")]
    InvalidEnvironment {
        variable: &'static str,
        value: String,
    },

    /// Weather or geocoding endpoint failure
    #[error("weather service error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ToolError {
    /// Stable tag used in tool error payloads
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::EmptyQuery => "empty_query",
            ToolError::LocationNotFound { .. } => "location_not_found",
            ToolError::EnvironmentLocationNotFound { .. } => "environment_location_not_found",
            ToolError::InvalidEnvironment { .. } => "invalid_environment",
            ToolError::Upstream(e) => e.kind(),
        }
    }

    /// Message for the tool caller.
    ///
    /// `operation` prefixes upstream failures, e.g. "Failed to fetch weather data".
    #[must_use]
    pub fn user_message(&self, operation: &str) -> String {
        match self {
            ToolError::EmptyQuery => "Location query must not be empty.".to_string(),
            ToolError::LocationNotFound { name } => {
                format!("Location '{name}' could not be found.")
            }
            ToolError::EnvironmentLocationNotFound { name } => {
                format!("Environment variable LOCATION '{name}' could not be found.")
            }
            ToolError::InvalidEnvironment { variable, value } => {
                format!("Environment variable {variable} is not a valid number: '{value}'.")
            }
            ToolError::Upstream(e) => format!("{operation}: {e}"),
        }
    }
}

/// Invalid settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {message}")]
    Invalid { message: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new validation error
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = UpstreamError::Status {
            endpoint: "forecast",
            status: 500,
        };
        assert_eq!(err.to_string(), "forecast returned HTTP 500");
        assert_eq!(err.kind(), "upstream_status");
    }

    #[test]
    fn test_upstream_error_conversion() {
        let err: ToolError = UpstreamError::Status {
            endpoint: "geocoding",
            status: 503,
        }
        .into();
        assert!(matches!(err, ToolError::Upstream(_)));
        assert_eq!(err.kind(), "upstream_status");
        assert_eq!(
            err.user_message("Location search failed"),
            "Location search failed: geocoding returned HTTP 503"
        );
    }

    #[test]
    fn test_user_messages_name_the_location() {
        let err = ToolError::LocationNotFound {
            name: "Atlantis".to_string(),
        };
        assert!(err.user_message("unused").contains("'Atlantis'"));

        let err = ToolError::EnvironmentLocationNotFound {
            name: "Atlantis".to_string(),
        };
        let message = err.user_message("unused");
        assert!(message.contains("LOCATION"));
        assert!(message.contains("'Atlantis'"));
    }

    #[test]
    fn test_invalid_environment_message() {
        let err = ToolError::InvalidEnvironment {
            variable: "LATITUDE",
            value: "north".to_string(),
        };
        assert_eq!(err.kind(), "invalid_environment");
        assert!(err.user_message("unused").contains("LATITUDE"));
    }

    #[test]
    fn test_config_error_creation() {
        let err = ConfigError::invalid("bad url");
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("bad url"));
    }
}
