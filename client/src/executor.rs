//! Authenticated request executor.
//!
//! Every backend call goes through [`RequestExecutor`]. It attaches the
//! bearer token, applies the timeout, and turns each outcome into either the
//! parsed body or a [`GatewayError`]:
//!
//! | Outcome | Result |
//! |---|---|
//! | no stored session | `AuthRequired` (nothing sent) |
//! | 401 / 403 | store cleared, `AuthExpired` |
//! | no response | `NetworkUnavailable` |
//! | other non-2xx | `ServerError { status_code, message }` |
//! | 2xx | body as `serde_json::Value` |
//!
//! Navigation is not the executor's business: callers see `AuthExpired` and
//! decide where to send the user.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::{GatewayError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::config::GatewayConfig;

/// One file in a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// A multipart body that can be rebuilt for every attempt.
///
/// `reqwest::multipart::Form` is consumed when sent, so the executor keeps
/// the parts and builds a fresh form each time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    text: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartBody {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.push((name.into(), value.into()));
        self
    }

    /// Add a file.
    #[must_use]
    pub fn file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    /// Text fields in insertion order.
    #[must_use]
    pub fn text_fields(&self) -> &[(String, String)] {
        &self.text
    }

    fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in &self.text {
            form = form.text(name.clone(), value.clone());
        }
        for file in &self.files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| GatewayError::validation("image", format!("Unsupported file type: {e}")))?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json`.
    Json(Value),
    /// `multipart/form-data`.
    Multipart(MultipartBody),
}

/// Description of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// Optional body.
    pub body: Option<RequestBody>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// A request without body, query or extra headers.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = Some(RequestBody::Multipart(body));
        self
    }

    /// Add a query pair.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Executes [`ApiRequest`]s against the backend.
///
/// Clones share the HTTP connection pool and the token store handle.
#[derive(Debug, Clone)]
pub struct RequestExecutor<S> {
    http: Client,
    base_url: String,
    timeout: Duration,
    store: S,
}

impl<S: TokenStore> RequestExecutor<S> {
    /// Build an executor from configuration and the injected token store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the base URL is unusable or the HTTP client
    /// cannot be built.
    pub fn new(config: &GatewayConfig, store: S) -> Result<Self> {
        let base_url = config.validated_base_url()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
            store,
        })
    }

    /// The injected token store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send an authenticated request.
    ///
    /// # Errors
    ///
    /// - `AuthRequired` if no session is stored (nothing is sent)
    /// - `AuthExpired` on 401/403, after clearing the store
    /// - `NetworkUnavailable` if no response arrived
    /// - `ServerError` for any other non-2xx status
    /// - `Storage` if the token store failed, including a failed clear after
    ///   a 401/403 (the rejected token may still be stored)
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        let Some(session) = self.store.load().await? else {
            tracing::debug!(path = %request.path, "No session, request not sent");
            return Err(GatewayError::AuthRequired);
        };

        let (status, body) = self.send(request, Some(&session.access_token)).await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(
                path = %request.path,
                status = status.as_u16(),
                "Token rejected, clearing session"
            );
            if let Err(e) = self.store.clear().await {
                tracing::error!(error = %e, "Failed to clear rejected session");
                return Err(e.into());
            }
            return Err(GatewayError::AuthExpired);
        }

        classify(status, &body)
    }

    /// Send a request without a bearer token (login, register, password reset).
    ///
    /// A 401/403 here means the submitted credentials were wrong, so it is
    /// reported as an ordinary `ServerError` and the store is not touched.
    ///
    /// # Errors
    ///
    /// - `NetworkUnavailable` if no response arrived
    /// - `ServerError` for any non-2xx status
    pub async fn execute_public(&self, request: &ApiRequest) -> Result<Value> {
        let (status, body) = self.send(request, None).await?;
        classify(status, &body)
    }

    async fn send(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), url.as_str());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Multipart(body)) => builder.multipart(body.to_form()?),
            None => builder,
        };

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, path = %request.path, error = %e, "No response");
            GatewayError::NetworkUnavailable {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::NetworkUnavailable {
                reason: e.to_string(),
            })?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis(),
            "Request completed"
        );

        Ok((status, body))
    }
}

/// Map a status and raw body to the parsed body or a `ServerError`.
fn classify(status: StatusCode, body: &str) -> Result<Value> {
    if status.is_success() {
        return Ok(parse_body(body));
    }

    let message = server_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    Err(GatewayError::ServerError {
        status_code: status.as_u16(),
        message,
    })
}

/// Empty bodies become `Null`; non-JSON bodies are kept as a string.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// The `message` field of an error body, if there is one.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "Message"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string)
}
