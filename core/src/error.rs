//! Error types for gateway operations.

use crate::booking::FlowError;
use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Every way a gateway operation can fail.
///
/// The UI layer matches on this to decide what to do next: redirect to the
/// login screen ([`requires_login`](Self::requires_login)), or show the
/// [`user_message`](Self::user_message) in an alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    // ═══════════════════════════════════════════════════════════
    // Authentication
    // ═══════════════════════════════════════════════════════════

    /// No access token is stored locally. No request was sent.
    #[error("Authentication required")]
    AuthRequired,

    /// The server rejected the stored token (401/403). The session has been cleared.
    #[error("Session expired")]
    AuthExpired,

    // ═══════════════════════════════════════════════════════════
    // Transport
    // ═══════════════════════════════════════════════════════════

    /// The request produced no response (connection refused, DNS, timeout).
    #[error("Network unavailable: {reason}")]
    NetworkUnavailable {
        /// Transport-level detail
        reason: String,
    },

    /// The server answered with a non-2xx status.
    #[error("Server error (status {status_code}): {message}")]
    ServerError {
        /// HTTP status code
        status_code: u16,
        /// The body's `message` field, or a generic fallback
        message: String,
    },

    /// The server answered 2xx but reported failure (`isSuccess: false`).
    #[error("Request rejected: {message}")]
    Rejected {
        /// Server-provided explanation
        message: String,
    },

    /// A 2xx body did not have the shape an operation needs.
    #[error("Unexpected response: {reason}")]
    UnexpectedResponse {
        /// What was missing or malformed
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Client-side and business rules
    // ═══════════════════════════════════════════════════════════

    /// A form value failed a local check. Never reaches the network.
    #[error("Invalid {field}: {reason}")]
    ValidationError {
        /// Name of the offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The user still has an unpaid ticket and cannot book another.
    #[error("Pending payment: {message}")]
    PendingPaymentExists {
        /// Server-provided explanation
        message: String,
    },

    /// A booking flow step was requested out of order.
    #[error(transparent)]
    Flow(#[from] FlowError),

    // ═══════════════════════════════════════════════════════════
    // Local infrastructure
    // ═══════════════════════════════════════════════════════════

    /// The on-device token store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be used (e.g. unparsable base URL).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GatewayError {
    /// Shorthand for a [`GatewayError::ValidationError`].
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` if retrying the same call could succeed.
    ///
    /// Only failures to get a usable answer from the server qualify. Auth
    /// failures are terminal since the token is known to be missing or invalid.
    /// Local failures and business-rule answers would just repeat.
    ///
    /// # Examples
    ///
    /// ```
    /// # use booking_gateway_core::GatewayError;
    /// assert!(!GatewayError::AuthExpired.is_transient());
    /// assert!(GatewayError::NetworkUnavailable { reason: "timeout".into() }.is_transient());
    /// ```
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        !matches!(
            self,
            Self::AuthRequired
                | Self::AuthExpired
                | Self::Rejected { .. }
                | Self::ValidationError { .. }
                | Self::PendingPaymentExists { .. }
                | Self::Flow(_)
                | Self::Storage(_)
                | Self::InvalidConfig(_)
        )
    }

    /// Returns `true` if the UI should navigate to the login screen.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::AuthExpired)
    }

    /// Human-readable text for the alert the UI shows on failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => "Please log in to continue.".to_string(),
            Self::AuthExpired => "Your session has expired. Please log in again.".to_string(),
            Self::NetworkUnavailable { .. } => {
                "Cannot reach the server. Check your connection and try again.".to_string()
            }
            Self::ServerError { message, .. }
            | Self::Rejected { message }
            | Self::PendingPaymentExists { message } => message.clone(),
            Self::UnexpectedResponse { .. } => {
                "The server sent an unexpected response. Please try again later.".to_string()
            }
            Self::ValidationError { reason, .. } => reason.clone(),
            Self::Flow(_) => "Please wait for the current booking to finish.".to_string(),
            Self::Storage(_) | Self::InvalidConfig(_) => {
                "Something went wrong on this device. Please restart the app.".to_string()
            }
        }
    }
}
