//! Gateway configuration.
//!
//! Values come from the application (or the environment through
//! [`GatewayConfig::from_env`]), never from constants buried in services.

use booking_gateway_core::{GatewayError, Result};
use booking_gateway_runtime::RetryPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Per-request timeout when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Backend paths, relative to the base URL.
///
/// `{id}` in a template is replaced with the entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `POST` email and password, returns tokens.
    pub login: String,
    /// `POST` multipart registration form.
    pub register: String,
    /// `POST` email for a reset link.
    pub forgot_password: String,
    /// `GET` the logged-in user's profile.
    pub current_user: String,
    /// `GET` one workshop (template).
    pub workshop: String,
    /// `GET` one master (template).
    pub master: String,
    /// `POST` tickets for a workshop.
    pub create_register_attend: String,
    /// `GET` whether an unpaid ticket exists.
    pub check_pending: String,
    /// `POST` start payment for a ticket group.
    pub create_payment: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/api/Account/login".to_string(),
            register: "/api/Account/register".to_string(),
            forgot_password: "/api/Account/forgot-password".to_string(),
            current_user: "/api/Account/current-user".to_string(),
            workshop: "/api/Workshop/{id}".to_string(),
            master: "/api/Master/{id}".to_string(),
            create_register_attend: "/api/RegisterAttend/create".to_string(),
            check_pending: "/api/Order/check-pending".to_string(),
            create_payment: "/api/Payment/create".to_string(),
        }
    }
}

impl Endpoints {
    /// Fill `{id}` in a path template.
    #[must_use]
    pub fn with_id(template: &str, id: &str) -> String {
        template.replace("{id}", id)
    }
}

/// Everything the gateway needs to talk to the backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Scheme and host of the backend, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Timeout for a single request.
    ///
    /// Default: 15 seconds
    pub timeout: Duration,

    /// Retry policy for transient failures.
    ///
    /// Default: 3 attempts, 1 second apart
    pub retry: RetryPolicy,

    /// Backend paths.
    pub endpoints: Endpoints,

    /// Where the file token store keeps the session.
    pub session_file: PathBuf,
}

impl GatewayConfig {
    /// Create configuration for `base_url` with defaults for everything else.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BOOKING_API_BASE_URL` | `http://localhost:5000` |
    /// | `BOOKING_API_TIMEOUT_SECS` | `15` |
    /// | `BOOKING_RETRY_ATTEMPTS` | `3` |
    /// | `BOOKING_RETRY_DELAY_MS` | `1000` |
    /// | `BOOKING_SESSION_FILE` | `booking-session.json` |
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let retry = RetryPolicy::builder()
            .max_attempts(
                env::var("BOOKING_RETRY_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.retry.max_attempts),
            )
            .delay(
                env::var("BOOKING_RETRY_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map_or(defaults.retry.delay, Duration::from_millis),
            )
            .build();

        Self {
            base_url: env::var("BOOKING_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env::var("BOOKING_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.timeout, Duration::from_secs),
            retry,
            endpoints: defaults.endpoints,
            session_file: env::var("BOOKING_SESSION_FILE")
                .map_or(defaults.session_file, PathBuf::from),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the backend paths.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// The base URL without a trailing slash, after checking it parses.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the base URL is empty, unparsable, or not
    /// `http`/`https`.
    pub fn validated_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(GatewayError::InvalidConfig(
                "base URL is not set".to_string(),
            ));
        }
        let url = reqwest::Url::parse(trimmed)
            .map_err(|e| GatewayError::InvalidConfig(format!("base URL `{trimmed}`: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidConfig(format!(
                "base URL `{trimmed}` must use http or https"
            )));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            endpoints: Endpoints::default(),
            session_file: PathBuf::from("booking-session.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_app() {
        let config = GatewayConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.endpoints.check_pending, "/api/Order/check-pending");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = GatewayConfig::new("https://api.example.com/");
        assert_eq!(
            config.validated_base_url(),
            Ok("https://api.example.com".to_string())
        );
    }

    #[test]
    fn unusable_base_urls_are_rejected() {
        for base in ["", "   ", "not a url", "ftp://files.example.com"] {
            assert!(
                matches!(
                    GatewayConfig::new(base).validated_base_url(),
                    Err(GatewayError::InvalidConfig(_))
                ),
                "{base:?}"
            );
        }
    }

    #[test]
    fn id_templates_are_filled() {
        assert_eq!(Endpoints::with_id("/api/Workshop/{id}", "W1"), "/api/Workshop/W1");
    }
}
