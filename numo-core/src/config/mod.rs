//! Configuration management for NUMO Core
//!
//! Values are read once at startup. Missing or malformed email settings only
//! produce warnings: the dispatcher still starts and reports the problem on
//! the first send that needs the setting.

use crate::email::DEFAULT_BREVO_API_URL;
use crate::error::{AppError, Result};
use std::env;
use std::fmt;
use validator::ValidateEmail;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Email dispatch configuration
    pub email: EmailConfig,
    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Clone)]
pub struct EmailConfig {
    /// Provider API key; `None` leaves the dispatcher unconfigured
    pub api_key: Option<String>,
    /// Provider base URL (e.g., https://api.brevo.com)
    pub api_base_url: String,
    pub sender_email: String,
    pub sender_name: String,
    /// Recipient of order and contact form notifications
    pub admin_email: String,
    /// Product name used in subjects and footers
    pub app_name: String,
    /// Public URL for links in emails (e.g., https://numo-oracle.com)
    pub app_base_url: String,
    pub rate_limit: EmailRateLimitConfig,
}

/// Fixed-window send quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailRateLimitConfig {
    /// Maximum send attempts per window
    pub max_requests: u64,
    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for EmailRateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 300,
            window_secs: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" for structured logs, anything else for human-readable output
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BREVO_API_URL.to_string(),
            sender_email: "noreply@numo-oracle.com".to_string(),
            sender_name: "NUMO Oracle".to_string(),
            admin_email: String::new(),
            app_name: "NUMO Oracle".to_string(),
            app_base_url: "http://localhost:3000".to_string(),
            rate_limit: EmailRateLimitConfig::default(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url)
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("admin_email", &self.admin_email)
            .field("app_name", &self.app_name)
            .field("app_base_url", &self.app_base_url)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Problems that will make some sends fail later
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.api_key.is_none() {
            warnings.push("BREVO_API_KEY is not set; all emails will fail".to_string());
        }
        if !self.admin_email.validate_email() {
            warnings.push(format!(
                "ADMIN_NOTIFICATION_EMAIL {:?} is not a valid email address; admin notifications will fail",
                self.admin_email
            ));
        }
        if !self.sender_email.validate_email() {
            warnings.push(format!(
                "BREVO_SENDER_EMAIL {:?} is not a valid email address",
                self.sender_email
            ));
        }
        if url::Url::parse(&self.app_base_url).is_err() {
            warnings.push(format!(
                "PUBLIC_APP_URL {:?} is not an absolute URL; links in emails may break",
                self.app_base_url
            ));
        }

        warnings
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Does not log; callers report [`EmailConfig::warnings`] once logging
    /// is up.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EmailConfig::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let rate_limit = EmailRateLimitConfig {
            max_requests: parse_or(
                get("EMAIL_RATE_LIMIT_MAX_REQUESTS"),
                "EMAIL_RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit.max_requests,
            )?,
            window_secs: parse_or(
                get("EMAIL_RATE_LIMIT_WINDOW_SECS"),
                "EMAIL_RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit.window_secs,
            )?,
        };
        if rate_limit.max_requests == 0 {
            return Err(AppError::Config(
                "EMAIL_RATE_LIMIT_MAX_REQUESTS must be positive".to_string(),
            ));
        }
        if rate_limit.window_secs == 0 {
            return Err(AppError::Config(
                "EMAIL_RATE_LIMIT_WINDOW_SECS must be positive".to_string(),
            ));
        }

        let email = EmailConfig {
            api_key: get("BREVO_API_KEY"),
            api_base_url: get("BREVO_API_URL").unwrap_or(defaults.api_base_url),
            sender_email: get("BREVO_SENDER_EMAIL").unwrap_or(defaults.sender_email),
            sender_name: get("BREVO_SENDER_NAME").unwrap_or(defaults.sender_name),
            admin_email: get("ADMIN_NOTIFICATION_EMAIL").unwrap_or(defaults.admin_email),
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            app_base_url: get("PUBLIC_APP_URL").unwrap_or(defaults.app_base_url),
            rate_limit,
        };

        Ok(Self {
            email,
            telemetry: TelemetryConfig {
                log_format: get("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            },
        })
    }
}

fn parse_or(value: Option<String>, key: &str, default: u64) -> Result<u64> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid {}: {:?}", key, raw))),
        None => Ok(default),
    }
}
