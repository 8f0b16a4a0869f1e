//! Transactional email dispatch
//!
//! [`EmailDispatcher`] renders a template, enforces the send quota and
//! forwards the message to the configured [`EmailProvider`]. Every public
//! operation returns a [`SendResult`] or [`HealthCheckResult`]; expected
//! failures (missing key, quota, provider or network errors) never escape
//! as `Err` or panics.
//!
//! The quota is process-local. Running several instances behind a load
//! balancer multiplies the effective quota by the instance count.

use crate::config::EmailConfig;
use crate::domain::{
    ContactFormData, ContactFormOutcome, EmailAddress, EmailRequest, HealthCheckResult,
    OrderDetails, SendResult, Sender,
};
use crate::email::templates::messages::{self, Branding};
use crate::email::{
    BrevoEmailProvider, Clock, EmailProvider, EmailProviderError, EmailTemplate,
    FixedWindowLimiter, RateWindow, RenderedEmail, SystemClock,
};
use crate::telemetry::metrics;
use chrono::Datelike;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, warn};
use validator::ValidateEmail;

/// Metric label for requests built by the caller rather than a template
const CUSTOM_TEMPLATE: &str = "custom";

/// Sends transactional email on behalf of the application.
///
/// Create one per process and share it behind an `Arc`.
pub struct EmailDispatcher {
    provider: Option<Arc<dyn EmailProvider>>,
    sender: Sender,
    admin_email: String,
    app_name: String,
    app_base_url: String,
    limiter: FixedWindowLimiter,
    clock: Arc<dyn Clock>,
}

impl EmailDispatcher {
    /// Build a dispatcher backed by the Brevo API and the system clock.
    ///
    /// A missing API key (or an HTTP client that fails to build) still
    /// yields a dispatcher; every send then fails with a configuration error.
    pub fn from_config(config: &EmailConfig) -> Self {
        let provider = config.api_key.as_deref().and_then(|key| {
            match BrevoEmailProvider::new(key, config.api_base_url.as_str()) {
                Ok(provider) => Some(Arc::new(provider) as Arc<dyn EmailProvider>),
                Err(e) => {
                    error!(error = %e, "Failed to create email provider");
                    None
                }
            }
        });

        Self::with_provider(config, provider, Arc::new(SystemClock))
    }

    /// Build a dispatcher with an explicit provider and clock
    pub fn with_provider(
        config: &EmailConfig,
        provider: Option<Arc<dyn EmailProvider>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        if provider.is_none() {
            warn!("Email provider not configured; all sends will fail");
        }
        if !config.admin_email.validate_email() {
            warn!(
                admin_email = %config.admin_email,
                "Admin notification address is invalid; admin notifications will fail"
            );
        }

        Self {
            provider,
            sender: Sender::new(config.sender_name.as_str(), config.sender_email.as_str()),
            admin_email: config.admin_email.clone(),
            app_name: config.app_name.clone(),
            app_base_url: config.app_base_url.trim_end_matches('/').to_string(),
            limiter: FixedWindowLimiter::new(
                config.rate_limit.max_requests,
                config.rate_limit.window_secs,
                clock.clone(),
            ),
            clock,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Current quota window, as last updated by a send
    pub fn rate_window(&self) -> RateWindow {
        self.limiter.snapshot()
    }

    /// Start a fresh quota window now
    pub fn reset_rate_window(&self) {
        self.limiter.reset();
    }

    /// Send a fully formed message
    pub async fn send_transactional_email(&self, request: &EmailRequest) -> SendResult {
        self.dispatch(CUSTOM_TEMPLATE, request).await
    }

    pub async fn send_welcome_email(&self, to: &str, name: &str) -> SendResult {
        let rendered = messages::welcome(&self.branding(), name);
        self.send_rendered(
            EmailTemplate::Welcome,
            EmailAddress::with_name(to, name),
            rendered,
        )
        .await
    }

    /// Send a password reset link. The token is embedded as-is; validity
    /// and expiry belong to the caller.
    pub async fn send_password_reset_email(
        &self,
        to: &str,
        name: &str,
        reset_token: &str,
    ) -> SendResult {
        let reset_url = self.reset_url(reset_token);
        let rendered = messages::password_reset(&self.branding(), name, &reset_url);
        self.send_rendered(
            EmailTemplate::PasswordReset,
            EmailAddress::with_name(to, name),
            rendered,
        )
        .await
    }

    pub async fn send_order_confirmation_email(
        &self,
        customer_email: &str,
        customer_name: &str,
        order: &OrderDetails,
    ) -> SendResult {
        let rendered = messages::order_confirmation(&self.branding(), customer_name, order);
        self.send_rendered(
            EmailTemplate::OrderConfirmation,
            EmailAddress::with_name(customer_email, customer_name),
            rendered,
        )
        .await
    }

    /// Notify the shop admin of a new order.
    ///
    /// Fails without a network call when the admin address is invalid.
    pub async fn send_order_notification_email(&self, order: &OrderDetails) -> SendResult {
        let template = EmailTemplate::OrderNotification;
        if !self.admin_email.validate_email() {
            return self.fail(
                template.tag(),
                EmailProviderError::InvalidConfiguration(format!(
                    "Invalid admin notification email: {:?}",
                    self.admin_email
                )),
            );
        }

        let rendered = messages::order_notification(&self.branding(), order);
        self.send_rendered(template, EmailAddress::new(self.admin_email.as_str()), rendered)
            .await
    }

    /// Notify the admin and confirm receipt to the sender of a contact form.
    ///
    /// Succeeds only when both emails were accepted. When both fail, the
    /// admin error is reported.
    pub async fn send_contact_form_notification(&self, form: &ContactFormData) -> SendResult {
        self.send_contact_form_notification_detailed(form)
            .await
            .aggregate()
    }

    /// Same as [`send_contact_form_notification`](Self::send_contact_form_notification)
    /// but keeps both outcomes.
    #[instrument(skip_all, fields(contact_email = %form.email))]
    pub async fn send_contact_form_notification_detailed(
        &self,
        form: &ContactFormData,
    ) -> ContactFormOutcome {
        let branding = self.branding();
        let admin_email = messages::contact_notification(&branding, form, self.clock.now());
        let user_email = messages::contact_confirmation(&branding, form);

        let (admin, user) = tokio::join!(
            self.send_rendered(
                EmailTemplate::ContactNotification,
                EmailAddress::new(self.admin_email.as_str()),
                admin_email,
            ),
            self.send_rendered(
                EmailTemplate::ContactConfirmation,
                EmailAddress::with_name(form.email.as_str(), form.name.as_str()),
                user_email,
            ),
        );

        info!(
            admin_success = admin.success,
            user_success = user.success,
            "Contact form emails processed"
        );

        ContactFormOutcome { admin, user }
    }

    /// Check the credential against the provider. Does not touch the quota.
    #[instrument(skip_all)]
    pub async fn health_check(&self) -> HealthCheckResult {
        let result = match &self.provider {
            Some(provider) => provider.test_connection().await,
            None => Err(EmailProviderError::NotConfigured),
        };

        match result {
            Ok(()) => {
                metrics::record_health_check("success");
                HealthCheckResult::healthy()
            }
            Err(e) => {
                warn!(error = %e, "Email provider health check failed");
                metrics::record_health_check("failure");
                HealthCheckResult::unhealthy(e.to_string())
            }
        }
    }

    async fn send_rendered(
        &self,
        template: EmailTemplate,
        to: EmailAddress,
        rendered: RenderedEmail,
    ) -> SendResult {
        let request = EmailRequest::new(
            self.sender.clone(),
            to,
            rendered.subject,
            rendered.html_body,
            rendered.text_body,
        )
        .with_tags([template.tag()]);

        self.dispatch(template.tag(), &request).await
    }

    #[instrument(skip_all, fields(template = template, recipients = request.to.len()))]
    async fn dispatch(&self, template: &'static str, request: &EmailRequest) -> SendResult {
        match self.try_dispatch(template, request).await {
            Ok(result) => {
                info!(message_id = ?result.message_id, "Email sent");
                metrics::record_send(template, "success");
                result
            }
            Err(e) => self.fail(template, e),
        }
    }

    async fn try_dispatch(
        &self,
        template: &'static str,
        request: &EmailRequest,
    ) -> Result<SendResult, EmailProviderError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(EmailProviderError::NotConfigured)?;

        // Rejected before any network call, so it must not use quota
        if request.to.is_empty() {
            return Err(EmailProviderError::InvalidConfiguration(
                "No recipients specified".to_string(),
            ));
        }

        self.limiter.check()?;

        let started = Instant::now();
        let result = provider.send(request).await;
        self.limiter.record_attempt();
        metrics::record_send_duration(template, started.elapsed());

        result
    }

    fn fail(&self, template: &'static str, err: EmailProviderError) -> SendResult {
        match &err {
            EmailProviderError::RateLimited { .. } => {
                warn!(template, error = %err, "Email rejected by rate limit");
                metrics::record_rate_limited();
            }
            EmailProviderError::NotConfigured | EmailProviderError::InvalidConfiguration(_) => {
                warn!(template, error = %err, "Email not sent");
            }
            _ => {
                error!(template, error = %err, "Email send failed");
            }
        }
        metrics::record_send(template, outcome_label(&err));

        SendResult::failure(err.to_string())
    }

    fn branding(&self) -> Branding {
        Branding {
            app_name: self.app_name.clone(),
            app_url: self.app_base_url.clone(),
            year: self.clock.now().year(),
        }
    }

    fn reset_url(&self, token: &str) -> String {
        match url::Url::parse(&format!("{}/reset-password", self.app_base_url)) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("token", token);
                url.to_string()
            }
            Err(_) => {
                let token: String =
                    url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
                format!("{}/reset-password?token={}", self.app_base_url, token)
            }
        }
    }
}

fn outcome_label(err: &EmailProviderError) -> &'static str {
    match err {
        EmailProviderError::NotConfigured | EmailProviderError::InvalidConfiguration(_) => {
            "not_configured"
        }
        EmailProviderError::RateLimited { .. } => "rate_limited",
        EmailProviderError::Api(_) => "provider_error",
        EmailProviderError::Transport(_) | EmailProviderError::Unreachable(_) => {
            "transport_error"
        }
        EmailProviderError::HealthCheckFailed(_) => "provider_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailRateLimitConfig;
    use crate::domain::{Customer, OrderItem, ShippingAddress};
    use crate::email::provider::MockEmailProvider;
    use crate::email::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use mockall::predicate::*;
    use pretty_assertions::assert_eq;

    fn test_config() -> EmailConfig {
        EmailConfig {
            api_key: Some("test-key".to_string()),
            admin_email: "admin@numo-oracle.com".to_string(),
            app_base_url: "https://numo-oracle.com".to_string(),
            ..EmailConfig::default()
        }
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
        ))
    }

    fn dispatcher(
        config: &EmailConfig,
        mock: MockEmailProvider,
        clock: Arc<ManualClock>,
    ) -> EmailDispatcher {
        let provider: Arc<dyn EmailProvider> = Arc::new(mock);
        EmailDispatcher::with_provider(config, Some(provider), clock)
    }

    fn accept_all(mock: &mut MockEmailProvider, times: usize) {
        mock.expect_send()
            .times(times)
            .returning(|_| Ok(SendResult::success(Some("msg-1".to_string()))));
    }

    fn sample_order() -> OrderDetails {
        OrderDetails {
            order_number: "NUMO-1042".to_string(),
            order_id: "ord_8f2c".to_string(),
            customer: Customer {
                name: "Luna Vale".to_string(),
                email: "luna@example.com".to_string(),
                phone: None,
            },
            shipping_address: ShippingAddress {
                street: "12 Starlight Ave".to_string(),
                city: "Sedona".to_string(),
                state: "AZ".to_string(),
                zip: "86336".to_string(),
                country: "US".to_string(),
            },
            items: vec![OrderItem {
                name: "Oracle Card Deck".to_string(),
                quantity: 1,
                unit_price: 29.99,
                description: None,
            }],
            total_amount: 29.99,
            notes: None,
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 14, 8, 55, 0).unwrap(),
        }
    }

    fn contact_form() -> ContactFormData {
        ContactFormData {
            name: "Orion".to_string(),
            email: "orion@example.com".to_string(),
            subject: Some("Wholesale".to_string()),
            message: "Do you ship to Canada?".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_dispatcher_fails_without_counting() {
        let config = EmailConfig::default();
        let dispatcher = EmailDispatcher::with_provider(&config, None, clock());

        assert!(!dispatcher.is_configured());
        let result = dispatcher.send_welcome_email("a@example.com", "Ada").await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("not configured"));
        assert_eq!(dispatcher.rate_window().request_count, 0);
    }

    #[tokio::test]
    async fn test_from_config_without_key_is_unconfigured() {
        let dispatcher = EmailDispatcher::from_config(&EmailConfig::default());
        assert!(!dispatcher.is_configured());
    }

    #[tokio::test]
    async fn test_from_config_with_key_is_configured() {
        let dispatcher = EmailDispatcher::from_config(&test_config());
        assert!(dispatcher.is_configured());
    }

    #[tokio::test]
    async fn test_welcome_email_returns_message_id() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .withf(|req: &EmailRequest| {
                req.to.len() == 1
                    && req.to[0].email == "ada@example.com"
                    && req.subject.contains("Ada")
                    && req.tags == vec!["welcome".to_string()]
                    && req.sender.email == "noreply@numo-oracle.com"
            })
            .times(1)
            .returning(|_| Ok(SendResult::success(Some("X".to_string()))));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_welcome_email("ada@example.com", "Ada").await;

        assert_eq!(result, SendResult::success(Some("X".to_string())));
        assert_eq!(dispatcher.rate_window().request_count, 1);
    }

    #[tokio::test]
    async fn test_provider_error_message_is_surfaced() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(EmailProviderError::Api("Invalid email address".to_string())));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_welcome_email("bad", "Ada").await;

        assert_eq!(result, SendResult::failure("Invalid email address"));
        // Failed network attempts still count
        assert_eq!(dispatcher.rate_window().request_count, 1);
    }

    #[tokio::test]
    async fn test_transport_error_message_is_surfaced() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(EmailProviderError::Transport("Network error".to_string())));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_welcome_email("ada@example.com", "Ada").await;

        assert_eq!(result, SendResult::failure("Network error"));
        assert_eq!(dispatcher.rate_window().request_count, 1);
    }

    #[tokio::test]
    async fn test_quota_rejects_without_network_call() {
        let mut config = test_config();
        config.rate_limit = EmailRateLimitConfig {
            max_requests: 3,
            window_secs: 86_400,
        };
        let mut mock = MockEmailProvider::new();
        accept_all(&mut mock, 3);

        let dispatcher = dispatcher(&config, mock, clock());
        for _ in 0..3 {
            assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        }

        let rejected = dispatcher.send_welcome_email("a@example.com", "A").await;
        assert!(!rejected.success);
        assert!(rejected.error.unwrap().starts_with("Rate limit exceeded"));
        assert_eq!(dispatcher.rate_window().request_count, 3);
    }

    #[tokio::test]
    async fn test_default_quota_is_300_per_day() {
        let mut mock = MockEmailProvider::new();
        accept_all(&mut mock, 300);

        let dispatcher = dispatcher(&test_config(), mock, clock());
        for _ in 0..300 {
            assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        }
        assert!(!dispatcher.send_welcome_email("a@example.com", "A").await.success);
    }

    #[tokio::test]
    async fn test_window_resets_after_time_advance() {
        let mut config = test_config();
        config.rate_limit.max_requests = 2;
        let clock = clock();
        let mut mock = MockEmailProvider::new();
        accept_all(&mut mock, 3);

        let dispatcher = dispatcher(&config, mock, clock.clone());
        assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        assert!(!dispatcher.send_welcome_email("a@example.com", "A").await.success);

        clock.advance(Duration::hours(24) + Duration::seconds(1));

        assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        let window = dispatcher.rate_window();
        assert_eq!(window.request_count, 1);
        assert_eq!(window.window_start, clock.now());
    }

    #[tokio::test]
    async fn test_reset_rate_window_hook() {
        let mut config = test_config();
        config.rate_limit.max_requests = 1;
        let mut mock = MockEmailProvider::new();
        accept_all(&mut mock, 2);

        let dispatcher = dispatcher(&config, mock, clock());
        assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        assert!(!dispatcher.send_welcome_email("a@example.com", "A").await.success);

        dispatcher.reset_rate_window();
        assert_eq!(dispatcher.rate_window().request_count, 0);
        assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
    }

    #[tokio::test]
    async fn test_password_reset_embeds_encoded_token() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .withf(|req: &EmailRequest| {
                req.text_content
                    .contains("https://numo-oracle.com/reset-password?token=a%2Bb%2Fc")
                    && req.tags == vec!["password-reset".to_string()]
            })
            .times(1)
            .returning(|_| Ok(SendResult::success(None)));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher
            .send_password_reset_email("ada@example.com", "Ada", "a+b/c")
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_order_confirmation_goes_to_customer() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .withf(|req: &EmailRequest| {
                req.to[0].email == "luna@example.com"
                    && req.subject.contains("NUMO-1042")
                    && req.html_content.contains("Oracle Card Deck")
                    && req.html_content.contains("$29.99")
                    && req.text_content.contains("Oracle Card Deck")
            })
            .times(1)
            .returning(|_| Ok(SendResult::success(Some("m".to_string()))));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher
            .send_order_confirmation_email("luna@example.com", "Luna", &sample_order())
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_order_notification_targets_admin() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .withf(|req: &EmailRequest| {
                req.to.len() == 1
                    && req.to[0].email == "admin@numo-oracle.com"
                    && req.subject.contains("NUMO-1042")
                    && req.subject.contains("$29.99")
            })
            .times(1)
            .returning(|_| Ok(SendResult::success(None)));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        assert!(dispatcher.send_order_notification_email(&sample_order()).await.success);
    }

    #[tokio::test]
    async fn test_order_notification_with_invalid_admin_skips_network() {
        let mut config = test_config();
        config.admin_email = "not-an-email".to_string();
        let mut mock = MockEmailProvider::new();
        mock.expect_send().never();

        let dispatcher = dispatcher(&config, mock, clock());
        let result = dispatcher.send_order_notification_email(&sample_order()).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid configuration"));
        assert_eq!(dispatcher.rate_window().request_count, 0);
    }

    #[tokio::test]
    async fn test_contact_form_sends_two_emails() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .with(function(|req: &EmailRequest| req.to[0].email == "admin@numo-oracle.com"))
            .times(1)
            .returning(|_| Ok(SendResult::success(Some("admin-1".to_string()))));
        mock.expect_send()
            .with(function(|req: &EmailRequest| req.to[0].email == "orion@example.com"))
            .times(1)
            .returning(|_| Ok(SendResult::success(Some("user-1".to_string()))));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_contact_form_notification(&contact_form()).await;

        assert_eq!(result, SendResult::success(None));
        assert_eq!(dispatcher.rate_window().request_count, 2);
    }

    #[tokio::test]
    async fn test_contact_form_partial_failure() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .with(function(|req: &EmailRequest| req.to[0].email == "admin@numo-oracle.com"))
            .times(1)
            .returning(|_| Err(EmailProviderError::Api("Admin mailbox full".to_string())));
        mock.expect_send()
            .with(function(|req: &EmailRequest| req.to[0].email == "orion@example.com"))
            .times(1)
            .returning(|_| Ok(SendResult::success(Some("user-1".to_string()))));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let outcome = dispatcher
            .send_contact_form_notification_detailed(&contact_form())
            .await;

        assert!(!outcome.admin.success);
        assert!(outcome.user.success);
        assert_eq!(outcome.user.message_id.as_deref(), Some("user-1"));
        assert_eq!(outcome.aggregate(), SendResult::failure("Admin mailbox full"));
    }

    #[tokio::test]
    async fn test_contact_form_both_fail_reports_admin_error() {
        let mut mock = MockEmailProvider::new();
        mock.expect_send().times(2).returning(|req| {
            if req.to[0].email == "admin@numo-oracle.com" {
                Err(EmailProviderError::Api("admin failed".to_string()))
            } else {
                Err(EmailProviderError::Api("user failed".to_string()))
            }
        });

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_contact_form_notification(&contact_form()).await;
        assert_eq!(result, SendResult::failure("admin failed"));
    }

    #[tokio::test]
    async fn test_send_transactional_email_passes_request_through() {
        let request = EmailRequest::new(
            Sender::new("NUMO Oracle", "noreply@numo-oracle.com"),
            EmailAddress::new("ada@example.com"),
            "Hello",
            "<p>Hello</p>",
            "Hello",
        );
        let expected = request.clone();

        let mut mock = MockEmailProvider::new();
        mock.expect_send()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(SendResult::success(Some("raw".to_string()))));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_transactional_email(&request).await;
        assert_eq!(result.message_id.as_deref(), Some("raw"));
    }

    #[tokio::test]
    async fn test_empty_recipients_rejected_without_using_quota() {
        let mut request = EmailRequest::new(
            Sender::new("NUMO Oracle", "noreply@numo-oracle.com"),
            EmailAddress::new("ada@example.com"),
            "Hello",
            "<p>Hello</p>",
            "Hello",
        );
        request.to.clear();

        let mut mock = MockEmailProvider::new();
        mock.expect_send().never();

        let dispatcher = dispatcher(&test_config(), mock, clock());
        let result = dispatcher.send_transactional_email(&request).await;

        assert_eq!(
            result,
            SendResult::failure("Invalid configuration: No recipients specified")
        );
        assert_eq!(dispatcher.rate_window().request_count, 0);
    }

    #[tokio::test]
    async fn test_health_check_ignores_quota() {
        let mut config = test_config();
        config.rate_limit.max_requests = 1;
        let mut mock = MockEmailProvider::new();
        accept_all(&mut mock, 1);
        mock.expect_test_connection()
            .times(1)
            .returning(|| Err(EmailProviderError::HealthCheckFailed(401)));

        let dispatcher = dispatcher(&config, mock, clock());
        assert!(dispatcher.send_welcome_email("a@example.com", "A").await.success);
        assert!(!dispatcher.send_welcome_email("a@example.com", "A").await.success);

        let health = dispatcher.health_check().await;
        assert!(!health.success);
        assert_eq!(health.error.as_deref(), Some("API health check failed: 401"));
        assert_eq!(dispatcher.rate_window().request_count, 1);
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mut mock = MockEmailProvider::new();
        mock.expect_test_connection().times(1).returning(|| Ok(()));

        let dispatcher = dispatcher(&test_config(), mock, clock());
        assert_eq!(dispatcher.health_check().await, HealthCheckResult::healthy());
    }

    #[tokio::test]
    async fn test_health_check_unconfigured() {
        let dispatcher = EmailDispatcher::with_provider(&test_config(), None, clock());
        let health = dispatcher.health_check().await;
        assert!(!health.success);
        assert!(health.error.unwrap().contains("not configured"));
    }

    #[test]
    fn test_reset_url_falls_back_for_relative_base() {
        let mut config = test_config();
        config.app_base_url = "numo-oracle".to_string();
        let dispatcher = EmailDispatcher::with_provider(&config, None, clock());

        assert_eq!(
            dispatcher.reset_url("a b"),
            "numo-oracle/reset-password?token=a+b"
        );
    }

    #[test]
    fn test_reset_url_trims_trailing_slash() {
        let mut config = test_config();
        config.app_base_url = "https://numo-oracle.com/".to_string();
        let dispatcher = EmailDispatcher::with_provider(&config, None, clock());

        assert_eq!(
            dispatcher.reset_url("abc123"),
            "https://numo-oracle.com/reset-password?token=abc123"
        );
    }
}
