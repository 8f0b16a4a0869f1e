//! Contact form submission and its dual-send outcome

use super::email::SendResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactFormData {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
    pub phone: Option<String>,
}

impl ContactFormData {
    pub fn subject_or_default(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("General inquiry")
    }
}

/// Per-recipient result of a contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFormOutcome {
    pub admin: SendResult,
    pub user: SendResult,
}

impl ContactFormOutcome {
    /// Collapse into one result: success only if both sends succeeded.
    /// The admin error wins when both failed.
    pub fn aggregate(&self) -> SendResult {
        SendResult {
            success: self.admin.success && self.user.success,
            message_id: None,
            error: self.admin.error.clone().or_else(|| self.user.error.clone()),
        }
    }
}
