use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Everything the signup wizard collects. Missing fields deserialize as empty
/// strings so that validation, not the extractor, decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub ai_experience: String,
    pub crypto_experience: String,
    pub copy_trading_interest: String,
    pub ml_trust: String,
    pub twitter_username: String,
    pub retweet_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
}

impl SignupPayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// The inviter's code, if one was given.
    pub fn referrer(&self) -> Option<&str> {
        self.referred_by
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}
