//! Turns a raw upstream reply into a [`Classification`].
//!
//! Both variants run the same ordered chain: HTML page, then undecodable body,
//! then whatever the decoded body or status code says. The first predicate
//! that matches wins.

use reqwest::StatusCode;
use serde::Deserialize;

pub const SHEETS_DEFAULT_FAILURE: &str = "Google Sheets submission failed";
pub const BACKEND_DEFAULT_INVALID: &str = "Invalid signup data";
pub const BACKEND_DEFAULT_FAILURE: &str = "Backend rejected the signup";

/// Referral data reported by the upstream. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamRecord {
    pub referral_code: Option<String>,
    pub waitlist_position: Option<u64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// An HTML page where JSON was expected, usually a broken deployment.
    Html,
    /// Body could not be decoded.
    Malformed(String),
    Accepted(UpstreamRecord),
    /// The email is already on the list; the record is the existing entry.
    AlreadyListed(UpstreamRecord),
    /// Rejected for a reason the user can fix.
    Invalid(String),
    Failed { status: StatusCode, message: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetsResponse {
    #[serde(default)]
    success: bool,
    referral_code: Option<String>,
    waitlist_position: Option<i64>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BackendResponse {
    message: Option<String>,
    data: Option<BackendData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendData {
    #[serde(default)]
    invite_code: Vec<String>,
    position: Option<i64>,
}

/// Only the start of the body counts: JSON never opens with `<`, while a
/// string inside a JSON body may well quote a tag.
pub fn looks_like_html(body: &str) -> bool {
    body.trim_start().starts_with('<')
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive(value: Option<i64>) -> Option<u64> {
    value.filter(|v| *v > 0).and_then(|v| u64::try_from(v).ok())
}

pub fn classify_sheets(status: StatusCode, body: &str) -> Classification {
    if looks_like_html(body) {
        return Classification::Html;
    }

    let decoded = match serde_json::from_str::<SheetsResponse>(body) {
        Ok(decoded) => decoded,
        Err(err) => return Classification::Malformed(err.to_string()),
    };

    if !status.is_success() || !decoded.success {
        return Classification::Failed {
            status,
            message: non_empty(decoded.error).unwrap_or_else(|| SHEETS_DEFAULT_FAILURE.into()),
        };
    }

    Classification::Accepted(UpstreamRecord {
        referral_code: non_empty(decoded.referral_code),
        waitlist_position: positive(decoded.waitlist_position),
        message: None,
    })
}

pub fn classify_backend(status: StatusCode, body: &str) -> Classification {
    if looks_like_html(body) {
        return Classification::Html;
    }

    let decoded = match serde_json::from_str::<BackendResponse>(body) {
        Ok(decoded) => decoded,
        Err(err) => return Classification::Malformed(err.to_string()),
    };

    let message = non_empty(decoded.message);

    match status {
        StatusCode::OK | StatusCode::CREATED => {
            Classification::Accepted(backend_record(decoded.data, message))
        }
        StatusCode::CONFLICT => {
            Classification::AlreadyListed(backend_record(decoded.data, message))
        }
        StatusCode::BAD_REQUEST => Classification::Invalid(
            message.unwrap_or_else(|| BACKEND_DEFAULT_INVALID.into()),
        ),
        _ => Classification::Failed {
            status,
            message: message.unwrap_or_else(|| BACKEND_DEFAULT_FAILURE.into()),
        },
    }
}

fn backend_record(data: Option<BackendData>, message: Option<String>) -> UpstreamRecord {
    let Some(data) = data else {
        return UpstreamRecord {
            message,
            ..Default::default()
        };
    };

    UpstreamRecord {
        referral_code: data
            .invite_code
            .iter()
            .map(|code| code.trim())
            .find(|code| !code.is_empty())
            .map(str::to_string),
        waitlist_position: positive(data.position),
        message,
    }
}
