use std::sync::Arc;

use tracing::{info, warn};

use crate::models::email::EmailDispatchRequest;
use crate::models::signup::SignupPayload;
use crate::models::submission::Resolution;
use crate::services::mailer::WelcomeMailer;
use crate::services::resolver::SubmissionResolver;

/// Resolver followed by a best-effort welcome email.
#[derive(Clone)]
pub struct WaitlistService {
    resolver: Arc<SubmissionResolver>,
    mailer: Arc<dyn WelcomeMailer>,
}

impl WaitlistService {
    pub fn new(resolver: Arc<SubmissionResolver>, mailer: Arc<dyn WelcomeMailer>) -> Self {
        Self { resolver, mailer }
    }

    pub fn resolver(&self) -> &SubmissionResolver {
        &self.resolver
    }

    pub fn mailer(&self) -> &dyn WelcomeMailer {
        self.mailer.as_ref()
    }

    /// The returned resolution is final before the email is attempted; a
    /// failed send is only logged. Returning members are not welcomed twice.
    pub async fn join(&self, payload: &SignupPayload) -> Resolution {
        let resolution = self.resolver.resolve(payload).await;
        if !resolution.result.success {
            return resolution;
        }
        if resolution.result.already_whitelisted {
            info!(email = %payload.email.trim(), "already on the waitlist; skipping welcome email");
            return resolution;
        }

        let request = EmailDispatchRequest::from_submission(payload, &resolution.result);
        match self.mailer.send_welcome_email(&request).await {
            Ok(email_id) => info!(email = %request.email, %email_id, "welcome email dispatched"),
            Err(err) => warn!(email = %request.email, error = %err, "failed to send welcome email"),
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, UpstreamTarget};
    use crate::models::submission::Disposition;
    use crate::services::mailer::MockMailer;
    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;

    fn service(upstream: Option<UpstreamTarget>, mailer: Arc<MockMailer>) -> WaitlistService {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.upstream = upstream;
        WaitlistService::new(
            Arc::new(SubmissionResolver::new(Client::new(), &config)),
            mailer,
        )
    }

    fn payload(email: &str) -> SignupPayload {
        SignupPayload {
            name: "Ada".into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn success_dispatches_welcome_email() {
        let mailer = Arc::new(MockMailer::default());
        let resolution = service(None, mailer.clone())
            .join(&payload("ada@example.com"))
            .await;

        assert!(resolution.result.success);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "ada@example.com");
        assert_eq!(sent[0].name, "Ada");
        assert_eq!(sent[0].referral_code, resolution.result.referral_code);
        assert_eq!(sent[0].waitlist_position, resolution.result.waitlist_position);
    }

    #[tokio::test]
    async fn mail_failure_leaves_result_untouched() {
        let mailer = Arc::new(MockMailer::failing());
        let service = service(None, mailer.clone());

        let resolution = service.join(&payload("ada@example.com")).await;

        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(resolution.disposition, Disposition::Synthesized);
        assert!(resolution.result.success);
        assert_eq!(resolution.result.error, None);
    }

    #[tokio::test]
    async fn invalid_signup_skips_email() {
        let mailer = Arc::new(MockMailer::default());
        let upstream = Some(UpstreamTarget::Backend {
            base_url: "http://127.0.0.1:9".into(),
        });

        let resolution = service(upstream, mailer.clone()).join(&payload("")).await;

        assert_eq!(resolution.disposition, Disposition::Invalid);
        assert!(!resolution.result.success);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn already_whitelisted_skips_email() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/whitelist");
                then.status(409).json_body(json!({
                    "message": "User already whitelisted",
                    "data": { "inviteCode": ["AB12CD"], "position": 5 }
                }));
            })
            .await;
        let mailer = Arc::new(MockMailer::default());
        let upstream = Some(UpstreamTarget::Backend {
            base_url: server.base_url(),
        });

        let resolution = service(upstream, mailer.clone())
            .join(&payload("ada@example.com"))
            .await;

        assert!(resolution.result.success);
        assert!(resolution.result.already_whitelisted);
        assert!(mailer.sent().is_empty());
    }
}
