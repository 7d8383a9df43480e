use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::models::email::EmailDispatchRequest;
use crate::services::mailer::template::render_welcome_email;
use crate::services::mailer::{MailError, WelcomeMailer, WELCOME_SUBJECT};
use crate::utils::referral::referral_link;

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Clone)]
pub struct ResendMailer {
    api_key: Option<String>,
    api_url: String,
    from: String,
    referral_base_url: String,
    http: Client,
}

impl ResendMailer {
    pub fn new(http: &Client, config: &Config) -> Self {
        Self {
            api_key: config.email.api_key.clone(),
            api_url: config.email.api_url.clone(),
            from: config.email.from.clone(),
            referral_base_url: config.referral_base_url.clone(),
            http: http.clone(),
        }
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, MailError> {
        let api_key = self.api_key.as_deref().ok_or(MailError::NotConfigured)?;

        let payload = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html
        });

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body: ResendResponse = resp
            .json()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))?;
        Ok(body.id)
    }
}

#[async_trait]
impl WelcomeMailer for ResendMailer {
    async fn send_welcome_email(&self, request: &EmailDispatchRequest) -> Result<String, MailError> {
        let to = request.email.trim();
        if !to.contains('@') {
            return Err(MailError::InvalidRecipient(to.to_string()));
        }

        let link = referral_link(&self.referral_base_url, &request.referral_code);
        let html = render_welcome_email(
            &request.name,
            request.waitlist_position,
            &request.referral_code,
            &link,
        );

        info!(email = %to, "sending welcome email");
        let id = self.send(to, WELCOME_SUBJECT, &html).await?;
        info!(email = %to, email_id = %id, "welcome email sent");
        Ok(id)
    }
}
