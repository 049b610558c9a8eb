//! # Geo Error Types
//!
//! Error classification for the Nominatim and Overpass adapters.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Geo Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Caller         │  │   Provider      │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidRequest │  │  Upstream       │  │  InvalidUrl             │ │
//! │  │  NoResults      │  │  Timeout        │  │                         │ │
//! │  │                 │  │  Transport      │  │                         │ │
//! │  │                 │  │  Decode         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │      → 400 / 404           → 502                  → startup failure    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for geo operations.
pub type GeoResult<T> = Result<T, GeoError>;

/// Longest slice of a provider error body kept for logs.
const MAX_ERROR_BODY: usize = 512;

/// Geo adapter error type.
#[derive(Debug, Error)]
pub enum GeoError {
    // =========================================================================
    // Caller Errors
    // =========================================================================
    /// The request could not be shaped (empty address, bad area).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered but found nothing.
    #[error("No results for '{0}'")]
    NoResults(String),

    // =========================================================================
    // Provider Errors
    // =========================================================================
    /// Non-2xx response.
    #[error("Provider returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request exceeded the configured timeout.
    #[error("Provider request timed out")]
    Timeout,

    /// Connection refused, DNS failure, TLS failure.
    #[error("Provider unreachable: {0}")]
    Transport(String),

    /// 2xx response whose body was not what we expected.
    #[error("Unexpected provider response: {0}")]
    Decode(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configured base URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl GeoError {
    /// Builds an `Upstream` error, truncating long bodies.
    pub fn upstream(status: u16, body: &str) -> Self {
        let body: String = body.chars().take(MAX_ERROR_BODY).collect();
        GeoError::Upstream { status, body }
    }

    /// Whether the failure is the provider's fault rather than the caller's.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            GeoError::Upstream { .. }
                | GeoError::Timeout
                | GeoError::Transport(_)
                | GeoError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for GeoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeoError::Timeout
        } else if err.is_decode() {
            GeoError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GeoError::upstream(status.as_u16(), &err.to_string())
        } else {
            GeoError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for GeoError {
    fn from(err: url::ParseError) -> Self {
        GeoError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_body_is_truncated() {
        let body = "x".repeat(2000);
        match GeoError::upstream(503, &body) {
            GeoError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(GeoError::Timeout.is_provider_failure());
        assert!(GeoError::upstream(500, "boom").is_provider_failure());
        assert!(!GeoError::NoResults("nowhere".into()).is_provider_failure());
        assert!(!GeoError::InvalidRequest("empty".into()).is_provider_failure());
    }
}
