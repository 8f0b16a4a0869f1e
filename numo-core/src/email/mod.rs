//! Transactional email delivery
//!
//! - [`EmailProvider`]: the seam between dispatch logic and a vendor API
//! - [`BrevoEmailProvider`]: Brevo v3 REST implementation
//! - [`FixedWindowLimiter`]: process-local send quota
//! - [`templates`]: HTML + plain text renderers

pub mod brevo;
pub mod clock;
pub mod provider;
pub mod rate_limit;
pub mod templates;

pub use brevo::{BrevoEmailProvider, DEFAULT_BREVO_API_URL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::{EmailProvider, EmailProviderError};
pub use rate_limit::{FixedWindowLimiter, RateWindow};
pub use templates::{EmailTemplate, RenderedEmail, TemplateEngine};
