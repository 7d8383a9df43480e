use serde::{Deserialize, Serialize};

use super::{signup::SignupPayload, submission::SubmissionResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDispatchRequest {
    pub email: String,
    pub name: String,
    pub waitlist_position: u64,
    pub referral_code: String,
}

impl EmailDispatchRequest {
    pub fn from_submission(payload: &SignupPayload, result: &SubmissionResult) -> Self {
        Self {
            email: payload.email.trim().to_string(),
            name: payload.name.trim().to_string(),
            waitlist_position: result.waitlist_position,
            referral_code: result.referral_code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResponse {
    pub fn sent(email_id: String) -> Self {
        Self {
            success: true,
            email_id: Some(email_id),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            email_id: None,
            error: Some(error.into()),
        }
    }
}
