//! Account operations: login, registration, password reset, profile.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::{
    Credentials, GatewayError, Registration, Result, Session, UserFlags, UserProfile,
};
use booking_gateway_runtime::with_retry;
use serde_json::json;

use crate::executor::{ApiRequest, FilePart, MultipartBody};
use crate::gateway::BookingGateway;
use crate::response;

/// What a successful registration produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The backend returned tokens; the user is now logged in.
    SignedIn(Session),
    /// The account exists; the user still has to log in.
    Registered,
}

/// Account operations.
#[derive(Debug)]
pub struct AccountService<'a, S> {
    gateway: &'a BookingGateway<S>,
}

impl<'a, S: TokenStore> AccountService<'a, S> {
    pub(crate) const fn new(gateway: &'a BookingGateway<S>) -> Self {
        Self { gateway }
    }

    /// Log in and store the returned session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for a blank or malformed email or empty password
    /// - `ServerError` when the backend refuses the credentials
    /// - `UnexpectedResponse` when no access token comes back
    /// - `NetworkUnavailable` / `Storage` as usual
    pub async fn login(&self, credentials: Credentials) -> Result<Session> {
        credentials.validate()?;
        let email = credentials.email.trim().to_string();

        let request = ApiRequest::post(&self.gateway.endpoints().login).json(json!({
            "email": email,
            "password": credentials.password,
        }));

        let body = self.gateway.executor().execute_public(&request).await?;
        let body = response::ensure_success(body, "Login failed")?;
        let session = session_from(&body, &email).ok_or_else(|| GatewayError::UnexpectedResponse {
            reason: "login response has no accessToken".to_string(),
        })?;

        self.gateway.store().save(&session).await?;
        tracing::info!(user = %session.user_email, "Logged in");
        Ok(session)
    }

    /// Create an account.
    ///
    /// When the backend answers with tokens the session is stored straight
    /// away and the user does not need to log in separately.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the form fails local checks (nothing is sent)
    /// - `ServerError` / `Rejected` when the backend refuses the registration
    /// - `NetworkUnavailable` / `Storage` as usual
    pub async fn register(&self, registration: Registration) -> Result<RegisterOutcome> {
        registration.validate()?;

        let mut form = MultipartBody::new();
        for (name, value) in registration.form_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = &registration.image {
            form = form.file(FilePart {
                field: "Image".to_string(),
                file_name: image.file_name.clone(),
                mime_type: image.mime_type.clone(),
                bytes: image.bytes.clone(),
            });
        }

        let request = ApiRequest::post(&self.gateway.endpoints().register).multipart(form);
        let body = self.gateway.executor().execute_public(&request).await?;
        let body = response::ensure_success(body, "Registration failed")?;

        let email = registration.email.trim();
        match session_from(&body, email) {
            Some(session) => {
                self.gateway.store().save(&session).await?;
                tracing::info!(user = %email, "Registered and logged in");
                Ok(RegisterOutcome::SignedIn(session))
            }
            None => {
                tracing::info!(user = %email, "Registered");
                Ok(RegisterOutcome::Registered)
            }
        }
    }

    /// Ask the backend to email a password reset link.
    ///
    /// Returns the backend's confirmation message, if it sent one.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for a blank or malformed email
    /// - `ServerError` / `Rejected` when the backend refuses
    /// - `NetworkUnavailable`
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>> {
        let email = email.trim();
        if email.is_empty() {
            return Err(GatewayError::validation("email", "Email is required"));
        }
        if !email.contains('@') {
            return Err(GatewayError::validation("email", "Email is not valid"));
        }

        let request =
            ApiRequest::post(&self.gateway.endpoints().forgot_password).json(json!({ "email": email }));
        let body = self.gateway.executor().execute_public(&request).await?;
        let body = response::ensure_success(body, "Could not send the reset email")?;
        Ok(response::message(&body))
    }

    /// Fetch the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Any executor error after retries, or `UnexpectedResponse` if the
    /// payload does not look like a profile.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let request = ApiRequest::get(&self.gateway.endpoints().current_user);
        let executor = self.gateway.executor();
        let body = with_retry(self.gateway.retry_policy(), || executor.execute(&request)).await?;
        response::decode(&body, "current user")
    }

    /// Forget the session on this device.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be cleared.
    pub async fn logout(&self) -> Result<()> {
        self.gateway.store().clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Whether the user has completed their profile.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    pub async fn profile_updated(&self) -> Result<bool> {
        Ok(self.gateway.store().flags().await?.profile_updated)
    }

    /// Remember that the user has completed their profile.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be written.
    pub async fn mark_profile_updated(&self) -> Result<()> {
        let mut flags: UserFlags = self.gateway.store().flags().await?;
        flags.profile_updated = true;
        self.gateway.store().set_flags(flags).await?;
        Ok(())
    }
}

/// Build a session from a token response.
fn session_from(body: &serde_json::Value, email: &str) -> Option<Session> {
    let access_token = response::string_field(body, &["accessToken", "token"])?;
    let refresh_token = response::string_field(body, &["refreshToken"]).unwrap_or_default();
    Some(Session::new(access_token, refresh_token, email))
}
