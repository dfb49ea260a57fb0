//! Error types for search client operations

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the search client and its lifecycle operations.
///
/// No error is suppressed or retried anywhere in this crate; every failure
/// is returned to the immediate caller. A failed search never yields a
/// subset of hits.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing node address or empty index name, detected before any I/O
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Index existence check or index creation failed; the client is
    /// unusable and must be discarded
    #[error("Construction error: {0}")]
    Construction(String),

    /// Underlying HTTP call failed; the transport's message is preserved
    /// verbatim
    #[error("Transport error: {0}")]
    Transport(String),

    /// The engine reported the search response as invalid; carries the
    /// engine's diagnostics
    #[error("Query error: {0}")]
    Query(String),
}

impl Error {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Construction(_) => "CONSTRUCTION_ERROR",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Query(_) => "QUERY_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::Configuration("test".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            Error::Query("test".to_string()).error_code(),
            "QUERY_ERROR"
        );
    }

    #[test]
    fn test_transport_message_preserved() {
        let err = Error::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }
}
