//! Per-message renderers: domain data in, [`RenderedEmail`] out

use super::{escape_html, EmailTemplate, RenderedEmail, TemplateEngine};
use crate::domain::{ContactFormData, OrderDetails, OrderItem};
use chrono::{DateTime, Utc};

/// Values shared by every template
#[derive(Debug, Clone)]
pub struct Branding {
    pub app_name: String,
    pub app_url: String,
    pub year: i32,
}

fn engine(branding: &Branding) -> TemplateEngine {
    let mut engine = TemplateEngine::new();
    engine
        .set("app_name", branding.app_name.as_str())
        .set("app_url", branding.app_url.as_str())
        .set("year", branding.year.to_string());
    engine
}

pub fn welcome(branding: &Branding, name: &str) -> RenderedEmail {
    let mut engine = engine(branding);
    engine.set("name", name);
    engine.render_template(EmailTemplate::Welcome)
}

pub fn password_reset(branding: &Branding, name: &str, reset_url: &str) -> RenderedEmail {
    let mut engine = engine(branding);
    engine.set("name", name).set("reset_url", reset_url);
    engine.render_template(EmailTemplate::PasswordReset)
}

/// Confirmation sent to the customer. Greets `customer_name`, which may
/// differ from the name stored on the order.
pub fn order_confirmation(
    branding: &Branding,
    customer_name: &str,
    order: &OrderDetails,
) -> RenderedEmail {
    let mut engine = order_engine(branding, order);
    engine.set("greeting_name", customer_name);
    engine.render_template(EmailTemplate::OrderConfirmation)
}

/// Notification sent to the shop admin
pub fn order_notification(branding: &Branding, order: &OrderDetails) -> RenderedEmail {
    let engine = order_engine(branding, order);
    engine.render_template(EmailTemplate::OrderNotification)
}

pub fn contact_notification(
    branding: &Branding,
    form: &ContactFormData,
    received_at: DateTime<Utc>,
) -> RenderedEmail {
    let mut engine = contact_engine(branding, form);
    engine
        .set("email", form.email.as_str())
        .set("phone", form.phone.as_deref().unwrap_or("Not provided"))
        .set("submitted_at", format_timestamp(received_at));
    engine.render_template(EmailTemplate::ContactNotification)
}

pub fn contact_confirmation(branding: &Branding, form: &ContactFormData) -> RenderedEmail {
    contact_engine(branding, form).render_template(EmailTemplate::ContactConfirmation)
}

fn contact_engine(branding: &Branding, form: &ContactFormData) -> TemplateEngine {
    let mut engine = engine(branding);
    engine
        .set("name", form.name.as_str())
        .set("subject", form.subject_or_default())
        .set_fragment("message", multiline_html(&form.message), form.message.as_str());
    engine
}

fn order_engine(branding: &Branding, order: &OrderDetails) -> TemplateEngine {
    let address = &order.shipping_address;
    let mut engine = engine(branding);
    engine
        .set_all([
            ("order_number", order.order_number.as_str()),
            ("order_id", order.order_id.as_str()),
            ("customer_name", order.customer.name.as_str()),
            ("customer_email", order.customer.email.as_str()),
            (
                "customer_phone",
                order.customer.phone.as_deref().unwrap_or("Not provided"),
            ),
            ("street", address.street.as_str()),
            ("city", address.city.as_str()),
            ("state", address.state.as_str()),
            ("zip", address.zip.as_str()),
            ("country", address.country.as_str()),
        ])
        .set("total", format_currency(order.total_amount))
        .set("submitted_at", format_timestamp(order.submitted_at))
        .set_fragment("items", item_rows_html(&order.items), item_lines_text(&order.items));

    match order.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(notes) => engine.set_fragment(
            "notes",
            format!(
                "            <div class=\"notes\"><strong>Order notes:</strong><br>{}</div>",
                multiline_html(notes)
            ),
            format!("\nORDER NOTES\n{}\n", notes),
        ),
        None => engine.set_fragment("notes", "", ""),
    };

    engine
}

fn item_rows_html(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| {
            let description = item
                .description
                .as_deref()
                .map(|d| format!("<div class=\"muted\">{}</div>", escape_html(d)))
                .unwrap_or_default();
            format!(
                "                <tr><td>{}{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                escape_html(&item.name),
                description,
                item.quantity,
                format_currency(item.unit_price),
                format_currency(item.line_total()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn item_lines_text(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| {
            let mut line = format!(
                "- {} x {} @ {} = {}",
                item.name,
                item.quantity,
                format_currency(item.unit_price),
                format_currency(item.line_total()),
            );
            if let Some(description) = &item.description {
                line.push_str("\n  ");
                line.push_str(description);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn multiline_html(text: &str) -> String {
    escape_html(text).replace("\r\n", "\n").replace('\n', "<br>\n")
}

/// US-dollar amount with thousands separators, e.g. `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y at %H:%M UTC").to_string()
}
