//! HTTP access to the account backend and the request handlers built on it.
//!
//! [`ApiClient`] owns request setup: base URL joining, cookie-backed sessions,
//! the timeout policy, a per-request `X-Request-Id`, and sanitized error bodies.
//! Handlers in [`handlers`] decide what each status code means. Nothing here
//! logs request bodies; they carry passwords, codes and tokens.

mod errors;
pub mod handlers;
pub mod types;

pub use errors::AppError;
pub use handlers::{Handlers, LoginOutcome};

use crate::{config::AppConfig, validation::sanitize_user_agent};
use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use ulid::Ulid;

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub struct ApiClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl ApiClient {
    /// Builds a client with a cookie store so the backend session cookie
    /// follows every call.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let user_agent = sanitize_user_agent(&config.user_agent);
        let http = Client::builder()
            .user_agent(user_agent.as_str())
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            user_agent,
        })
    }

    /// Sanitized user-agent string, also reported in login payloads.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sends a request without a body.
    ///
    /// # Errors
    /// Returns `AppError::Timeout` or `AppError::Network` when no response arrives.
    pub async fn send(&self, method: Method, path: &str) -> Result<Response, AppError> {
        self.request::<()>(method, path, &[], None).await
    }

    /// Sends a request with query parameters and no body.
    ///
    /// # Errors
    /// Returns `AppError::Timeout` or `AppError::Network` when no response arrives.
    pub async fn send_query(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, AppError> {
        self.request::<()>(method, path, query, None).await
    }

    /// Sends a JSON body.
    ///
    /// # Errors
    /// Returns `AppError::Timeout` or `AppError::Network` when no response arrives.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, AppError> {
        self.request(method, path, &[], Some(body)).await
    }

    #[instrument(skip(self, query, body), fields(request_id = tracing::field::Empty))]
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Response, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let request_id = Ulid::new().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut builder = self
            .http
            .request(method, url.as_str())
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_request_error)?;
        debug!(status = response.status().as_u16(), "api response");

        Ok(response)
    }
}

/// Decodes a successful JSON body.
///
/// # Errors
/// Returns `AppError::Parse` if the body is not the expected JSON.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json::<T>()
        .await
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Turns a non-success response into `AppError::Http` with a sanitized body.
pub async fn error_from(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: sanitize_body(&body),
    }
}

/// Joins a base URL and a path with exactly one slash between them.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps send failures into timeout, request-building or network errors.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Prefers a JSON `message`/`error` field, then trims and truncates.
fn sanitize_body(body: &str) -> String {
    let extracted = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
    });
    let text = extracted.as_deref().unwrap_or(body).trim();

    if text.is_empty() {
        "Request failed.".to_string()
    } else {
        text.chars().take(MAX_ERROR_CHARS).collect()
    }
}
