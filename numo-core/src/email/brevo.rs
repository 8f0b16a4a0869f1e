//! Brevo transactional email provider
//!
//! Talks to the v3 REST API: `POST /v3/smtp/email` to send and
//! `GET /v3/account` to verify the API key.

use super::provider::{EmailProvider, EmailProviderError};
use crate::domain::{EmailRequest, SendResult};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::Deserialize;

pub const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com";

const API_KEY_HEADER: &str = "api-key";

/// Brevo REST API provider
pub struct BrevoEmailProvider {
    http_client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailResponse {
    message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

impl BrevoEmailProvider {
    /// Create a provider for the given API key and base URL.
    ///
    /// No request timeout is configured; the client's defaults apply.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, EmailProviderError> {
        let http_client = Client::builder()
            .user_agent(concat!("numo-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EmailProviderError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Human-readable message for a non-2xx response.
///
/// Prefers the `message` field of a JSON error body, otherwise falls back to
/// `HTTP <status>: <reason>`.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}

#[async_trait]
impl EmailProvider for BrevoEmailProvider {
    async fn send(&self, request: &EmailRequest) -> Result<SendResult, EmailProviderError> {
        if request.to.is_empty() {
            return Err(EmailProviderError::InvalidConfiguration(
                "No recipients specified".to_string(),
            ));
        }

        let response = self
            .http_client
            .post(self.endpoint("/v3/smtp/email"))
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| EmailProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailProviderError::Api(error_message(status, &body)));
        }

        // The message was accepted even if the body is not what we expect.
        match response.json::<SendEmailResponse>().await {
            Ok(body) => Ok(SendResult::success(body.message_id)),
            Err(e) => {
                tracing::warn!("Accepted by Brevo but response body unreadable: {}", e);
                Ok(SendResult::success(None))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), EmailProviderError> {
        let response = self
            .http_client
            .get(self.endpoint("/v3/account"))
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| EmailProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(EmailProviderError::HealthCheckFailed(status.as_u16()))
        }
    }

    fn provider_name(&self) -> &'static str {
        "brevo"
    }
}
