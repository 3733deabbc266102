//! Error types and handling for the forecast aggregation service

use std::fmt;

use thiserror::Error;

/// Upstream provider that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Forecast,
    Marine,
}

impl Upstream {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Upstream::Geocoding => "geocoding",
            Upstream::Forecast => "forecast",
            Upstream::Marine => "marine",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the aggregation core
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Geocoding returned no candidates for a single-match lookup
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// An outbound call exceeded its timeout budget
    #[error("{upstream} API timed out")]
    UpstreamTimeout { upstream: Upstream },

    /// An outbound call failed for a network or status reason
    #[error("{upstream} API unavailable: {message}")]
    UpstreamUnavailable { upstream: Upstream, message: String },

    /// A field the normalizer requires was absent or unparsable
    #[error("Malformed {upstream} response: {message}")]
    MalformedUpstreamResponse { upstream: Upstream, message: String },

    /// The inbound request itself was unusable
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ForecastError {
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    #[must_use]
    pub fn timeout(upstream: Upstream) -> Self {
        Self::UpstreamTimeout { upstream }
    }

    pub fn unavailable<S: Into<String>>(upstream: Upstream, message: S) -> Self {
        Self::UpstreamUnavailable {
            upstream,
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(upstream: Upstream, message: S) -> Self {
        Self::MalformedUpstreamResponse {
            upstream,
            message: message.into(),
        }
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify a transport-level reqwest failure for the given upstream.
    #[must_use]
    pub fn from_transport(upstream: Upstream, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(upstream)
        } else {
            Self::unavailable(upstream, err.to_string())
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::NotFound { query } => format!("City not found: {query}"),
            ForecastError::UpstreamTimeout { .. } => {
                "The weather service took too long to respond.".to_string()
            }
            ForecastError::UpstreamUnavailable { upstream, message } => {
                format!("Error communicating with the {upstream} service: {message}")
            }
            ForecastError::MalformedUpstreamResponse { upstream, message } => {
                format!("Error processing data received from the {upstream} service: {message}")
            }
            ForecastError::InvalidRequest { message } => format!("Invalid input: {message}"),
            ForecastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
