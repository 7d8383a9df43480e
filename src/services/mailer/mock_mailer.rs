use crate::models::email::EmailDispatchRequest;
use crate::services::mailer::{MailError, WelcomeMailer};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock mailer that records sent emails for testing purposes.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MockMailer {
    pub sent_welcome_emails: Mutex<Vec<EmailDispatchRequest>>,
    pub fail_send: bool,
}

#[allow(dead_code)]
impl MockMailer {
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailDispatchRequest> {
        self.sent_welcome_emails
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl WelcomeMailer for MockMailer {
    async fn send_welcome_email(&self, request: &EmailDispatchRequest) -> Result<String, MailError> {
        self.sent_welcome_emails
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        if self.fail_send {
            return Err(MailError::Provider {
                status: 503,
                body: "mock failure".into(),
            });
        }
        Ok(format!("mock-{}", request.referral_code))
    }
}
