//! Session, credentials and user-scoped flags.

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// Login form input. Lives only as long as the login request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Local checks run before any login request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the email is blank or lacks `@`, or the
    /// password is empty.
    pub fn validate(&self) -> Result<()> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(GatewayError::validation("email", "Email is required"));
        }
        if !email.contains('@') {
            return Err(GatewayError::validation("email", "Email is not valid"));
        }
        if self.password.is_empty() {
            return Err(GatewayError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The locally persisted token pair identifying the logged-in user.
///
/// At most one session exists per device. It is written on login (and on
/// registrations that return a token) and removed on logout or when the
/// server rejects the access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token attached to authenticated requests.
    pub access_token: String,
    /// Refresh token issued alongside the access token.
    pub refresh_token: String,
    /// Email the user logged in with.
    pub user_email: String,
}

impl Session {
    /// Create a session.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            user_email: user_email.into(),
        }
    }

    /// A session without an access token cannot authorize anything.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user_email", &self.user_email)
            .finish()
    }
}

/// Small user-scoped flags persisted next to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFlags {
    /// Set once the user has completed their profile after registering.
    #[serde(default)]
    pub profile_updated: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn session_uses_camel_case_keys() {
        let session = Session::new("T1", "R1", "a@b.com");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "accessToken": "T1",
                "refreshToken": "R1",
                "userEmail": "a@b.com",
            })
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let session = Session::new("secret-access", "secret-refresh", "a@b.com");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret"));

        let credentials = Credentials::new("a@b.com", "hunter2");
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[test]
    fn blank_access_token_is_not_usable() {
        assert!(!Session::new("  ", "R1", "a@b.com").is_usable());
        assert!(Session::new("T1", "", "a@b.com").is_usable());
    }

    #[test]
    fn credentials_validation() {
        assert!(Credentials::new("a@b.com", "secret1").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "secret1").validate(),
            Err(GatewayError::ValidationError { field: "email", .. })
        ));
        assert!(matches!(
            Credentials::new("not-an-email", "secret1").validate(),
            Err(GatewayError::ValidationError { field: "email", .. })
        ));
        assert!(matches!(
            Credentials::new("a@b.com", "").validate(),
            Err(GatewayError::ValidationError { field: "password", .. })
        ));
    }
}
