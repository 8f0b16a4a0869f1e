//! Email provider trait and error types

use crate::domain::{EmailRequest, SendResult};
use async_trait::async_trait;
use thiserror::Error;

/// Email provider error types
///
/// `Api` and `Transport` display the bare upstream message so callers see
/// exactly what the provider or the network layer reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailProviderError {
    #[error("Email service not configured: missing API key")]
    NotConfigured,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Rate limit exceeded: maximum {max_requests} emails per {window_secs} seconds")]
    RateLimited { max_requests: u64, window_secs: u64 },

    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Transport(String),

    #[error("API health check failed: {0}")]
    HealthCheckFailed(u16),

    #[error("Email service unreachable: {0}")]
    Unreachable(String),
}

/// Trait for email providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send a transactional email
    async fn send(&self, request: &EmailRequest) -> Result<SendResult, EmailProviderError>;

    /// Confirm the credential is accepted and the service is reachable
    async fn test_connection(&self) -> Result<(), EmailProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
