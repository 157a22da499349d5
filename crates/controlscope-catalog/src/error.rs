//! Error types for the catalog subsystem.

use std::time::Duration;
use thiserror::Error;

/// A catalog source failed to produce records.
///
/// Fetch failures are recovered inside the record store by switching to the
/// fallback source; they only reach callers wrapped in a [`LoadError`].
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The endpoint did not answer within the configured timeout
    #[error("{url} timed out after {after:?}")]
    Timeout {
        /// Requested URL
        url: String,
        /// Configured timeout
        after: Duration,
    },

    /// The document is not valid JSON
    #[error("{origin} returned malformed JSON: {source}")]
    Json {
        /// Source name or URL
        origin: String,
        /// JSON parse error
        #[source]
        source: serde_json::Error,
    },

    /// The document is JSON but not shaped like a catalog
    #[error("{origin} returned an unexpected document: {reason}")]
    Shape {
        /// Source name or URL
        origin: String,
        /// What was wrong with the document
        reason: String,
    },

    /// The source is not available at all
    #[error("{origin} is unavailable: {reason}")]
    Unavailable {
        /// Source name
        origin: String,
        /// Why the source cannot be used
        reason: String,
    },

    /// Every configured endpoint failed
    #[error("all {attempts} catalog endpoints failed; last error: {last}")]
    Exhausted {
        /// Number of endpoints tried
        attempts: usize,
        /// Failure of the final endpoint
        last: Box<FetchError>,
    },
}

/// Terminal load failure: neither the primary nor the fallback source
/// produced a record set.
#[derive(Error, Debug)]
#[error("failed to load the control catalog: {primary}; fallback also failed: {fallback}")]
pub struct LoadError {
    /// Failure of the primary (remote) source
    pub primary: FetchError,
    /// Failure of the fallback source
    pub fallback: FetchError,
}

/// Result type for catalog source operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_mentions_both_failures() {
        let err = LoadError {
            primary: FetchError::Status {
                url: "https://example.test/controls".to_string(),
                status: 503,
            },
            fallback: FetchError::Shape {
                origin: "embedded catalog".to_string(),
                reason: "missing `controls` array".to_string(),
            },
        };

        let message = err.to_string();
        assert!(message.contains("HTTP 503"));
        assert!(message.contains("missing `controls` array"));
    }

    #[test]
    fn test_exhausted_wraps_last_error() {
        let err = FetchError::Exhausted {
            attempts: 3,
            last: Box::new(FetchError::Timeout {
                url: "https://example.test/controls".to_string(),
                after: Duration::from_secs(30),
            }),
        };
        assert!(err.to_string().starts_with("all 3 catalog endpoints failed"));
        assert!(err.to_string().contains("timed out"));
    }
}
