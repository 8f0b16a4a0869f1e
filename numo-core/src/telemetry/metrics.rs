//! Email metric definitions and recording helpers

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

pub const EMAIL_SEND_TOTAL: &str = "numo_email_send_total";
pub const EMAIL_SEND_DURATION_SECONDS: &str = "numo_email_send_duration_seconds";
pub const EMAIL_RATE_LIMITED_TOTAL: &str = "numo_email_rate_limited_total";
pub const EMAIL_HEALTH_CHECK_TOTAL: &str = "numo_email_health_check_total";

/// Register metric descriptions and emit initial zero values so exporters
/// include HELP/TYPE lines from startup (not just after first use).
pub fn describe_metrics() {
    describe_counter!(
        EMAIL_SEND_TOTAL,
        "Transactional email send attempts by template and outcome"
    );
    describe_histogram!(
        EMAIL_SEND_DURATION_SECONDS,
        "Email provider call duration in seconds"
    );
    describe_counter!(
        EMAIL_RATE_LIMITED_TOTAL,
        "Sends rejected by the fixed-window quota"
    );
    describe_counter!(
        EMAIL_HEALTH_CHECK_TOTAL,
        "Email provider health checks by outcome"
    );

    counter!(EMAIL_SEND_TOTAL, "template" => "welcome", "outcome" => "success").absolute(0);
    counter!(EMAIL_RATE_LIMITED_TOTAL).absolute(0);
    counter!(EMAIL_HEALTH_CHECK_TOTAL, "outcome" => "success").absolute(0);
}

/// Outcome label for a finished send
pub fn record_send(template: &'static str, outcome: &'static str) {
    counter!(EMAIL_SEND_TOTAL, "template" => template, "outcome" => outcome).increment(1);
}

pub fn record_send_duration(template: &'static str, elapsed: Duration) {
    histogram!(EMAIL_SEND_DURATION_SECONDS, "template" => template).record(elapsed.as_secs_f64());
}

pub fn record_rate_limited() {
    counter!(EMAIL_RATE_LIMITED_TOTAL).increment(1);
}

pub fn record_health_check(outcome: &'static str) {
    counter!(EMAIL_HEALTH_CHECK_TOTAL, "outcome" => outcome).increment(1);
}
