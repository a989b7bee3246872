//! Global error types for the Bexio client.
//!
//! Every failure the client can report is unified into a single
//! `BexioError` enum with conversions from the underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using BexioError.
pub type BexioResult<T> = Result<T, BexioError>;

/// Unified error type covering all error categories.
#[derive(Error, Debug)]
pub enum BexioError {
    // -- Request building --
    /// An operation was invoked without a client.
    #[error("nil client")]
    NilClient,

    /// `execute` was invoked without a request.
    #[error("nil request")]
    NilRequest,

    /// The client has no API token configured.
    #[error("missing API token")]
    MissingToken,

    /// The HTTP method, URL, or a header value was rejected while building the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // -- Execution --
    /// The default transport failed (connection refused, timeout, TLS, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The request context was cancelled before the transport returned.
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline passed before the transport returned.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    // -- Configuration --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Errors raised by custom transports.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<toml::de::Error> for BexioError {
    fn from(e: toml::de::Error) -> Self {
        BexioError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for BexioError {
    fn from(e: toml::ser::Error) -> Self {
        BexioError::Serialization(e.to_string())
    }
}

impl BexioError {
    /// Whether this error came from the transport rather than from the client itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, BexioError::Transport(_) | BexioError::Other(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(BexioError::NilClient.to_string(), "nil client");
        assert_eq!(BexioError::NilRequest.to_string(), "nil request");
        assert_eq!(BexioError::MissingToken.to_string(), "missing API token");
        let err = BexioError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_other_is_transparent() {
        let err = BexioError::from(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.is_transport());
        assert!(!BexioError::MissingToken.is_transport());
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: BexioError = toml::from_str::<toml::Value>("not = [valid").unwrap_err().into();
        assert!(matches!(err, BexioError::Config(_)));
    }
}
