use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_EMAIL_FROM: &str = "Kolplay <welcome@kolplay.xyz>";
pub const DEFAULT_REFERRAL_BASE_URL: &str = "https://www.kolplay.xyz";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Path appended to `WAITLIST_BACKEND_URL`.
pub const BACKEND_WHITELIST_PATH: &str = "/api/v1/whitelist";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set when WAITLIST_UPSTREAM={1}")]
    MissingUpstreamUrl(&'static str, &'static str),
    #[error("unsupported WAITLIST_UPSTREAM: {0} (expected 'sheets', 'backend' or 'none')")]
    UnknownUpstream(String),
    #[error("unsupported FALLBACK_MODE: {0} (expected 'degraded' or 'strict')")]
    UnknownFallbackMode(String),
    #[error("UPSTREAM_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error("BIND_ADDR is not a socket address: {0:?}")]
    InvalidBindAddr(String),
}

/// Where signups are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamTarget {
    /// Spreadsheet-backed script endpoint; the payload is posted as-is.
    Sheets { url: String },
    /// REST backend; the payload is wrapped under `user`.
    Backend { base_url: String },
}

impl UpstreamTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamTarget::Sheets { .. } => "sheets",
            UpstreamTarget::Backend { .. } => "backend",
        }
    }

    pub fn endpoint(&self) -> String {
        match self {
            UpstreamTarget::Sheets { url } => url.clone(),
            UpstreamTarget::Backend { base_url } => {
                format!("{}{}", base_url.trim_end_matches('/'), BACKEND_WHITELIST_PATH)
            }
        }
    }
}

/// How infrastructure failures (bad deployment, transport error, unreadable
/// body) surface to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// Mask behind a synthesized success.
    #[default]
    Degraded,
    /// Report as unavailable.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub upstream: Option<UpstreamTarget>,
    pub fallback_mode: FallbackMode,
    pub email: EmailSettings,
    pub referral_base_url: String,
    pub upstream_timeout: Duration,
    pub frontend_origin: Option<String>,
    pub bind_addr: SocketAddr,
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let sheets_url = var("GOOGLE_APP_SCRIPT");
        let backend_url = var("WAITLIST_BACKEND_URL");

        let upstream = match var("WAITLIST_UPSTREAM").map(|v| v.to_ascii_lowercase()) {
            None => match (backend_url, sheets_url) {
                (Some(base_url), _) => Some(UpstreamTarget::Backend { base_url }),
                (None, Some(url)) => Some(UpstreamTarget::Sheets { url }),
                (None, None) => None,
            },
            Some(kind) => match kind.as_str() {
                "sheets" => Some(UpstreamTarget::Sheets {
                    url: sheets_url
                        .ok_or(ConfigError::MissingUpstreamUrl("GOOGLE_APP_SCRIPT", "sheets"))?,
                }),
                "backend" => Some(UpstreamTarget::Backend {
                    base_url: backend_url.ok_or(ConfigError::MissingUpstreamUrl(
                        "WAITLIST_BACKEND_URL",
                        "backend",
                    ))?,
                }),
                "none" => None,
                _ => return Err(ConfigError::UnknownUpstream(kind)),
            },
        };

        let fallback_mode = match var("FALLBACK_MODE").map(|v| v.to_ascii_lowercase()) {
            None => FallbackMode::default(),
            Some(mode) => match mode.as_str() {
                "degraded" => FallbackMode::Degraded,
                "strict" => FallbackMode::Strict,
                _ => return Err(ConfigError::UnknownFallbackMode(mode)),
            },
        };

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        Ok(Config {
            upstream,
            fallback_mode,
            email: EmailSettings {
                api_key: var("RESEND_API_KEY"),
                api_url: var("RESEND_API_URL").unwrap_or_else(|| DEFAULT_RESEND_API_URL.into()),
                from: var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.into()),
            },
            referral_base_url: var("REFERRAL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REFERRAL_BASE_URL.into()),
            upstream_timeout,
            frontend_origin: var("FRONTEND_ORIGIN"),
            bind_addr,
            json_logs: var("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }
}
