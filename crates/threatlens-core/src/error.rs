//! Scan error types.

use thiserror::Error;

/// Errors that end a scan request.
///
/// The `Display` output of every variant is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Provider credential is missing.
    #[error("{0}")]
    Configuration(String),

    /// Input is neither an IPv4 address nor a file hash.
    #[error("{0}")]
    Validation(String),

    /// Provider returned an error status or an unusable body.
    #[error("{0}")]
    Provider(String),

    /// Transport-level failure (timeout, DNS, connection refused).
    #[error("{0}")]
    Network(String),
}

impl ScanError {
    /// Returns a stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Configuration(_) => "configuration_error",
            ScanError::Validation(_) => "validation_error",
            ScanError::Provider(_) => "provider_error",
            ScanError::Network(_) => "network_error",
        }
    }
}

/// Errors from the HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Could not reach the remote host.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
