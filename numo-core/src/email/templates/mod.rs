//! Email template system
//!
//! Templates are static data with `{{variable}}` placeholders. Plain
//! variables are HTML-escaped in the HTML variant and inserted verbatim in
//! the subject and text variant. Fragments carry pre-rendered HTML and text
//! (item tables, note blocks) and are inserted as-is.
//!
//! Substitution is single pass: inserted values are never scanned for
//! further placeholders.

mod layouts;
pub mod messages;

use std::borrow::Cow;
use std::collections::HashMap;

/// Available email templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    Welcome,
    PasswordReset,
    OrderConfirmation,
    OrderNotification,
    ContactNotification,
    ContactConfirmation,
}

impl EmailTemplate {
    /// Get the subject line for this template
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to {{app_name}}, {{name}}!",
            Self::PasswordReset => "Reset your {{app_name}} password",
            Self::OrderConfirmation => "Order Confirmation #{{order_number}} - {{app_name}}",
            Self::OrderNotification => "New Order #{{order_number}} - {{total}}",
            Self::ContactNotification => "New Contact Form Submission: {{subject}} (from {{name}})",
            Self::ContactConfirmation => "We received your message, {{name}}",
        }
    }

    /// Get the HTML body template
    pub fn html_body(&self) -> &'static str {
        match self {
            Self::Welcome => layouts::WELCOME_HTML,
            Self::PasswordReset => layouts::PASSWORD_RESET_HTML,
            Self::OrderConfirmation => layouts::ORDER_CONFIRMATION_HTML,
            Self::OrderNotification => layouts::ORDER_NOTIFICATION_HTML,
            Self::ContactNotification => layouts::CONTACT_NOTIFICATION_HTML,
            Self::ContactConfirmation => layouts::CONTACT_CONFIRMATION_HTML,
        }
    }

    /// Get the plain text body template
    pub fn text_body(&self) -> &'static str {
        match self {
            Self::Welcome => layouts::WELCOME_TEXT,
            Self::PasswordReset => layouts::PASSWORD_RESET_TEXT,
            Self::OrderConfirmation => layouts::ORDER_CONFIRMATION_TEXT,
            Self::OrderNotification => layouts::ORDER_NOTIFICATION_TEXT,
            Self::ContactNotification => layouts::CONTACT_NOTIFICATION_TEXT,
            Self::ContactConfirmation => layouts::CONTACT_CONFIRMATION_TEXT,
        }
    }

    /// Provider tag used for delivery analytics
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::PasswordReset => "password-reset",
            Self::OrderConfirmation => "order-confirmation",
            Self::OrderNotification => "order-notification",
            Self::ContactNotification => "contact-form",
            Self::ContactConfirmation => "contact-confirmation",
        }
    }
}

#[derive(Debug, Clone)]
struct Fragment {
    html: String,
    text: String,
}

/// Template rendering engine with variable substitution
#[derive(Debug, Default)]
pub struct TemplateEngine {
    variables: HashMap<String, String>,
    fragments: HashMap<String, Fragment>,
}

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set multiple variables from an iterator
    pub fn set_all<I, K, V>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in iter {
            self.variables.insert(k.into(), v.into());
        }
        self
    }

    /// Set a pre-rendered fragment with separate HTML and text forms
    pub fn set_fragment(
        &mut self,
        key: impl Into<String>,
        html: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.fragments.insert(
            key.into(),
            Fragment {
                html: html.into(),
                text: text.into(),
            },
        );
        self
    }

    /// Render a template string as plain text
    pub fn render(&self, template: &str) -> String {
        substitute(template, |key| self.text_value(key))
    }

    /// Render a template string as HTML, escaping variable values
    pub fn render_html(&self, template: &str) -> String {
        substitute(template, |key| self.html_value(key))
    }

    /// Render a complete email template, wrapped in the shared layout
    pub fn render_template(&self, template: EmailTemplate) -> RenderedEmail {
        let subject = self.render(template.subject());

        let html_inner = self.render_html(template.html_body());
        let html_body = substitute(layouts::HTML_LAYOUT, |key| match key {
            "body" => Some(Cow::Borrowed(html_inner.as_str())),
            "title" => Some(Cow::Owned(escape_html(&subject))),
            _ => self.html_value(key),
        });

        let text_inner = self.render(template.text_body());
        let text_body = substitute(layouts::TEXT_LAYOUT, |key| match key {
            "body" => Some(Cow::Borrowed(text_inner.as_str())),
            _ => self.text_value(key),
        });

        RenderedEmail {
            subject,
            html_body,
            text_body,
        }
    }

    fn text_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.fragments
            .get(key)
            .map(|f| Cow::Borrowed(f.text.as_str()))
            .or_else(|| self.variables.get(key).map(|v| Cow::Borrowed(v.as_str())))
    }

    fn html_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.fragments
            .get(key)
            .map(|f| Cow::Borrowed(f.html.as_str()))
            .or_else(|| self.variables.get(key).map(|v| Cow::Owned(escape_html(v))))
    }
}

/// Rendered email with all variables substituted
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Replace each `{{key}}` in one pass; unknown keys are left untouched.
fn substitute<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Cow<'a, str>>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let placeholder = &rest[start..start + 2 + end + 2];
        match lookup(after_open[..end].trim()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(placeholder),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
