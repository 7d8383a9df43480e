use crate::config::Config;
use crate::services::mailer::{ResendMailer, WelcomeMailer};
use crate::services::resolver::SubmissionResolver;
use crate::services::waitlist::WaitlistService;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub waitlist: WaitlistService,
}

impl AppState {
    pub fn new(config: Config, http: Client) -> Self {
        let mailer = Arc::new(ResendMailer::new(&http, &config)) as Arc<dyn WelcomeMailer>;
        Self::with_mailer(config, http, mailer)
    }

    pub fn with_mailer(config: Config, http: Client, mailer: Arc<dyn WelcomeMailer>) -> Self {
        let resolver = Arc::new(SubmissionResolver::new(http, &config));
        Self {
            config: Arc::new(config),
            waitlist: WaitlistService::new(resolver, mailer),
        }
    }
}
