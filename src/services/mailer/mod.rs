use async_trait::async_trait;
use thiserror::Error;

use crate::models::email::EmailDispatchRequest;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email service not configured")]
    NotConfigured,
    #[error("Invalid recipient address: {0:?}")]
    InvalidRecipient(String),
    #[error("email provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Resend API returned status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("email provider returned an invalid response: {0}")]
    InvalidResponse(String),
}

pub const WELCOME_SUBJECT: &str = "Welcome to Kolplay Early Access Waitlist! 🚀";

/// Sends the one-off welcome message. Implementations make a single attempt.
#[async_trait]
pub trait WelcomeMailer: Send + Sync {
    /// Returns the provider's message id.
    async fn send_welcome_email(&self, request: &EmailDispatchRequest) -> Result<String, MailError>;
}

mod mock_mailer;
mod resend_impl;
pub mod template;

#[allow(unused_imports)]
pub use mock_mailer::MockMailer;
pub use resend_impl::ResendMailer;
