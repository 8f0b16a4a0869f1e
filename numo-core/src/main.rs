use anyhow::Result;
use clap::{Parser, Subcommand};
use numo_core::domain::{ContactFormData, OrderDetails, SendResult};
use numo_core::{config::Config, telemetry, AppError, EmailDispatcher};
use std::path::PathBuf;
use tracing::{info, warn};
use validator::Validate;

#[derive(Parser)]
#[command(name = "numo-mail")]
#[command(version)]
#[command(about = "Send NUMO Oracle transactional emails", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the provider accepts the configured API key
    Health,
    /// Send the welcome email
    Welcome {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Recipient display name
        #[arg(long)]
        name: String,
    },
    /// Send a password reset link
    PasswordReset {
        #[arg(long)]
        to: String,
        #[arg(long)]
        name: String,
        /// Reset token issued by the auth system
        #[arg(long)]
        token: String,
    },
    /// Send the customer confirmation and the admin notification for an order
    Order {
        /// Order JSON file
        #[arg(long)]
        file: PathBuf,
    },
    /// Forward a contact form submission and confirm receipt to the sender
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    telemetry::init(&config.telemetry);
    for warning in config.email.warnings() {
        warn!("{}", warning);
    }

    let cli = Cli::parse();
    let dispatcher = EmailDispatcher::from_config(&config.email);

    match cli.command {
        Command::Health => {
            let health = dispatcher.health_check().await;
            if !health.success {
                return Err(AppError::Delivery(health.error.unwrap_or_default()).into());
            }
            info!("Email provider is reachable");
        }
        Command::Welcome { to, name } => {
            report(dispatcher.send_welcome_email(&to, &name).await)?;
        }
        Command::PasswordReset { to, name, token } => {
            report(
                dispatcher
                    .send_password_reset_email(&to, &name, &token)
                    .await,
            )?;
        }
        Command::Order { file } => {
            let order = OrderDetails::from_json_file(&file)?;

            let (confirmation, notification) = tokio::join!(
                dispatcher.send_order_confirmation_email(
                    &order.customer.email,
                    &order.customer.name,
                    &order,
                ),
                dispatcher.send_order_notification_email(&order),
            );
            report(confirmation)?;
            report(notification)?;
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
            phone,
        } => {
            let form = ContactFormData {
                name,
                email,
                subject,
                message,
                phone,
            };
            form.validate().map_err(AppError::from)?;

            let outcome = dispatcher.send_contact_form_notification_detailed(&form).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            report(outcome.aggregate())?;
        }
    }

    Ok(())
}

fn report(result: SendResult) -> std::result::Result<(), AppError> {
    if result.success {
        info!(message_id = ?result.message_id, "Email accepted");
        Ok(())
    } else {
        Err(AppError::Delivery(result.error.unwrap_or_default()))
    }
}
