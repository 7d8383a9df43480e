use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::utils::referral::{generate_referral_code, synthetic_position};

pub const UNAVAILABLE_ERROR: &str = "Waitlist service unavailable";

/// What the submission endpoint hands back to the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    pub referral_code: String,
    pub waitlist_position: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub already_whitelisted: bool,
}

impl SubmissionResult {
    pub fn recorded(referral_code: String, waitlist_position: u64) -> Self {
        Self {
            success: true,
            referral_code,
            waitlist_position,
            message: None,
            error: None,
            debug: None,
            already_whitelisted: false,
        }
    }

    /// Success with placeholder code and position.
    pub fn synthesized(message: impl Into<String>, debug: Option<String>) -> Self {
        Self {
            message: Some(message.into()),
            debug,
            ..Self::recorded(generate_referral_code(), synthetic_position())
        }
    }

    /// A failure the user can act on. Code and position stay populated so the
    /// record keeps its shape.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            referral_code: generate_referral_code(),
            waitlist_position: synthetic_position(),
            error: Some(message.clone()),
            message: Some(message),
            debug: None,
            already_whitelisted: false,
        }
    }

    pub fn unavailable(message: impl Into<String>, debug: Option<String>) -> Self {
        Self {
            success: false,
            error: Some(UNAVAILABLE_ERROR.to_string()),
            message: Some(message.into()),
            debug,
            ..Self::recorded(generate_referral_code(), synthetic_position())
        }
    }
}

/// How a submission was settled; drives the HTTP status at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Upstream stored the signup (or already had it).
    Recorded,
    /// Upstream missing or broken; values are placeholders.
    Synthesized,
    /// Payload failed validation.
    Invalid,
    /// Backend refused the signup for a non-validation reason.
    Failed,
    /// Infrastructure failure reported in strict mode.
    Unavailable,
}

impl Disposition {
    pub fn status_code(self) -> StatusCode {
        match self {
            Disposition::Recorded | Disposition::Synthesized => StatusCode::OK,
            Disposition::Invalid => StatusCode::BAD_REQUEST,
            Disposition::Failed => StatusCode::BAD_GATEWAY,
            Disposition::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub disposition: Disposition,
    pub result: SubmissionResult,
}

impl Resolution {
    pub fn new(disposition: Disposition, result: SubmissionResult) -> Self {
        Self {
            disposition,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::referral::is_referral_code;
    use serde_json::json;

    #[test]
    fn recorded_result_omits_optional_fields() {
        let value = serde_json::to_value(SubmissionResult::recorded("KT11VP".into(), 2498)).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "referralCode": "KT11VP", "waitlistPosition": 2498 })
        );
    }

    #[test]
    fn synthesized_result_is_fully_populated() {
        let result = SubmissionResult::synthesized("mock", Some("why".into()));
        assert!(result.success);
        assert!(is_referral_code(&result.referral_code));
        assert!(result.waitlist_position >= 1000);
        assert_eq!(result.message.as_deref(), Some("mock"));
        assert_eq!(result.debug.as_deref(), Some("why"));
    }

    #[test]
    fn rejected_result_carries_message_verbatim() {
        let result = SubmissionResult::rejected("Email is required");
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("Email is required"));
        assert_eq!(result.error.as_deref(), Some("Email is required"));
    }

    #[test]
    fn already_whitelisted_is_serialized_only_when_set() {
        let mut result = SubmissionResult::recorded("KT11VP".into(), 1);
        result.already_whitelisted = true;
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["alreadyWhitelisted"], json!(true));
    }

    #[test]
    fn disposition_maps_to_status() {
        assert_eq!(Disposition::Recorded.status_code(), StatusCode::OK);
        assert_eq!(Disposition::Synthesized.status_code(), StatusCode::OK);
        assert_eq!(Disposition::Invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Disposition::Failed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            Disposition::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
