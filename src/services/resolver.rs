use reqwest::Client;
use tracing::{error, info, warn};

use crate::config::{Config, FallbackMode, UpstreamTarget};
use crate::models::signup::SignupPayload;
use crate::models::submission::{Disposition, Resolution, SubmissionResult};
use crate::services::upstream::{self, Classification, UpstreamRecord};
use crate::utils::referral::{generate_referral_code, synthetic_position};

pub const NOT_CONFIGURED_MESSAGE: &str = "Development mode - waitlist upstream not configured";
pub const ALREADY_LISTED_MESSAGE: &str = "You're already on the waitlist!";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to join the waitlist. Please try again later.";

/// Infrastructure problems that never reach the user as-is in degraded mode.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Degradation {
    Html,
    Malformed,
    Failure(String),
}

impl Degradation {
    fn mock_message(&self) -> &'static str {
        match self {
            Degradation::Html => "Upstream deployment issue - using mock data",
            Degradation::Malformed => "JSON parsing failed - using mock data",
            Degradation::Failure(_) => "Error occurred - using mock data",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Degradation::Html => "Upstream returned an HTML page",
            Degradation::Malformed => "Upstream response was not valid JSON",
            Degradation::Failure(_) => "Upstream request failed",
        }
    }

    fn debug(&self) -> String {
        match self {
            Degradation::Html => "Received HTML response instead of JSON".to_string(),
            Degradation::Malformed => "Could not parse response as JSON".to_string(),
            Degradation::Failure(reason) => reason.clone(),
        }
    }
}

/// Persists a signup through the configured upstream and always comes back
/// with a fully populated [`SubmissionResult`].
#[derive(Debug, Clone)]
pub struct SubmissionResolver {
    http: Client,
    upstream: Option<UpstreamTarget>,
    mode: FallbackMode,
}

impl SubmissionResolver {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            upstream: config.upstream.clone(),
            mode: config.fallback_mode,
        }
    }

    pub async fn resolve(&self, payload: &SignupPayload) -> Resolution {
        let Some(target) = &self.upstream else {
            warn!("waitlist upstream not configured; returning mock data");
            return Resolution::new(
                Disposition::Synthesized,
                SubmissionResult::synthesized(NOT_CONFIGURED_MESSAGE, None),
            );
        };

        if let UpstreamTarget::Backend { .. } = target {
            if let Err(err) = payload.validate() {
                info!(reason = %err, "signup rejected before upstream call");
                return Resolution::new(Disposition::Invalid, SubmissionResult::rejected(err.to_string()));
            }
        }

        let email = payload.email.trim();
        info!(upstream = target.kind(), %email, referred_by = ?payload.referrer(), "submitting signup");

        let response = match upstream::submit(&self.http, target, payload).await {
            Ok(response) => response,
            Err(err) => {
                error!(upstream = target.kind(), %email, error = %err, "upstream submission failed");
                return self.degrade(Degradation::Failure(err.to_string()));
            }
        };

        info!(upstream = target.kind(), status = %response.status, "upstream responded");

        self.settle(target, response.classify(target))
    }

    /// A body that never became a [`SignupPayload`] takes the same fallback
    /// as a failed upstream call.
    pub fn unreadable_request(&self, reason: &str) -> Resolution {
        warn!(%reason, "unreadable signup body");
        self.degrade(Degradation::Failure(reason.to_string()))
    }

    fn settle(&self, target: &UpstreamTarget, classification: Classification) -> Resolution {
        match classification {
            Classification::Html => {
                warn!(upstream = target.kind(), "received HTML instead of JSON; check the deployment");
                self.degrade(Degradation::Html)
            }
            Classification::Malformed(reason) => {
                warn!(upstream = target.kind(), %reason, "could not decode upstream response");
                self.degrade(Degradation::Malformed)
            }
            Classification::Accepted(record) => {
                Resolution::new(Disposition::Recorded, fill_missing(record))
            }
            Classification::AlreadyListed(record) => {
                let message = record
                    .message
                    .clone()
                    .unwrap_or_else(|| ALREADY_LISTED_MESSAGE.to_string());
                let mut result = fill_missing(record);
                result.already_whitelisted = true;
                result.message = Some(message);
                Resolution::new(Disposition::Recorded, result)
            }
            Classification::Invalid(message) => {
                info!(upstream = target.kind(), %message, "upstream rejected signup");
                Resolution::new(Disposition::Invalid, SubmissionResult::rejected(message))
            }
            Classification::Failed { status, message } => match target {
                UpstreamTarget::Sheets { .. } => {
                    warn!(%status, %message, "spreadsheet script reported failure");
                    self.degrade(Degradation::Failure(message))
                }
                UpstreamTarget::Backend { .. } => {
                    warn!(%status, %message, "backend refused signup");
                    Resolution::new(
                        Disposition::Failed,
                        SubmissionResult::rejected(GENERIC_FAILURE_MESSAGE),
                    )
                }
            },
        }
    }

    fn degrade(&self, degradation: Degradation) -> Resolution {
        match self.mode {
            FallbackMode::Degraded => Resolution::new(
                Disposition::Synthesized,
                SubmissionResult::synthesized(degradation.mock_message(), Some(degradation.debug())),
            ),
            FallbackMode::Strict => Resolution::new(
                Disposition::Unavailable,
                SubmissionResult::unavailable(degradation.summary(), Some(degradation.debug())),
            ),
        }
    }
}

/// Upstream values where present, synthesized ones per missing field.
fn fill_missing(record: UpstreamRecord) -> SubmissionResult {
    SubmissionResult::recorded(
        record.referral_code.unwrap_or_else(generate_referral_code),
        record.waitlist_position.unwrap_or_else(synthetic_position),
    )
}
