//! NUMO Core - transactional email dispatch
//!
//! This crate renders and sends the NUMO Oracle account, order and contact
//! form emails through the Brevo API, under a fixed-window daily quota.

pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use service::EmailDispatcher;
