//! Error types for session storage.

use booking_gateway_core::GatewayError;
use thiserror::Error;

/// Result type alias for token store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage-layer faults. "No session" is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("Session storage I/O failed: {0}")]
    Io(String),

    /// The stored document could not be decoded.
    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
