//! HTTP client for the Tickerlens backend.
//!
//! Shared by the history and company search collaborators: owns the
//! `reqwest::Client`, joins endpoint paths onto the configured base URL and
//! maps non-success responses onto `ApiError`.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::types::company::ApiMessage;
use crate::types::errors::{ApiError, AppError};
use crate::types::session::AccessToken;
use crate::types::settings::ApiSettings;

const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Backend client speaking the `/api/search/*` JSON endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl BackendClient {
    /// Builds a client for the given API settings and history page size.
    pub fn new(settings: &ApiSettings, page_size: u32) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.effective_timeout_secs()))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api/search/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str, token: &AccessToken) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(token.expose())
    }

    pub(crate) fn post(&self, path: &str, token: &AccessToken) -> RequestBuilder {
        self.http.post(self.url(path)).bearer_auth(token.expose())
    }

    pub(crate) fn delete(&self, path: &str, token: &AccessToken) -> RequestBuilder {
        self.http.delete(self.url(path)).bearer_auth(token.expose())
    }

    /// Sends the request and decodes a success body, or maps the failure.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Passes success responses through and turns the rest into `ApiError`.
    pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(status = status.as_u16(), %message, "backend request failed");
        Err(map_status(status, message))
    }
}

/// Pulls the backend's `{"message": ...}` out of an error body.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| FALLBACK_ERROR_MESSAGE.to_string())
}

fn map_status(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(message),
        other => ApiError::Server {
            status: other.as_u16(),
            message,
        },
    }
}
