use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::config::UpstreamTarget;
use crate::models::signup::SignupPayload;

pub mod classify;

pub use classify::{classify_backend, classify_sheets, Classification, UpstreamRecord};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Status and body exactly as received; decoding happens in [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Serialize)]
struct BackendRequest<'a> {
    user: &'a SignupPayload,
}

/// Issues the single outbound call for `target`. Redirects are followed,
/// which script deployments rely on.
pub async fn submit(
    http: &Client,
    target: &UpstreamTarget,
    payload: &SignupPayload,
) -> Result<RawResponse, UpstreamError> {
    let request = http
        .post(target.endpoint())
        .header(reqwest::header::ACCEPT, "application/json");

    let request = match target {
        UpstreamTarget::Sheets { .. } => request.json(payload),
        UpstreamTarget::Backend { .. } => request.json(&BackendRequest { user: payload }),
    };

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    Ok(RawResponse { status, body })
}

impl RawResponse {
    pub fn classify(&self, target: &UpstreamTarget) -> Classification {
        match target {
            UpstreamTarget::Sheets { .. } => classify_sheets(self.status, &self.body),
            UpstreamTarget::Backend { .. } => classify_backend(self.status, &self.body),
        }
    }
}
