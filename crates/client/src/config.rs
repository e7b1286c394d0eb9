//! Client configuration

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Environment variable naming the API base URL.
pub const BASE_URL_ENV: &str = "FITDESK_API_URL";

/// Environment variable enabling per-request latency logging.
pub const HTTP_DEBUG_ENV: &str = "FITDESK_HTTP_DEBUG";

/// Base URL used when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Fixed request timeout. A request that exceeds it surfaces as a network
/// failure, not an HTTP one.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute base URL, always ending in exactly one `/`.
    pub base_url: String,
    pub timeout: Duration,
    /// Log method, URL, status, and elapsed time per request at debug level.
    pub log_latency: bool,
}

impl ClientConfig {
    /// Resolve configuration from the process environment. Resolution is
    /// idempotent: the same environment always yields the same values.
    pub fn from_env() -> Self {
        let base_url = resolve_base_url(env::var(BASE_URL_ENV).ok().as_deref());
        let log_latency = env::var(HTTP_DEBUG_ENV)
            .map(|raw| raw == "1" || raw.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
            log_latency,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: REQUEST_TIMEOUT,
            log_latency: false,
        }
    }
}

/// Resolve the base URL from an optional environment value, falling back to
/// [`DEFAULT_BASE_URL`] (with a warning) when it is unset or unusable.
pub(crate) fn resolve_base_url(raw: Option<&str>) -> String {
    match raw {
        Some(raw) if !raw.trim().is_empty() => match normalize_base_url(raw) {
            Ok(url) => url,
            Err(err) => {
                warn!(%err, "invalid {BASE_URL_ENV}, falling back to {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_owned()
            }
        },
        _ => {
            warn!("{BASE_URL_ENV} is not set, falling back to {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_owned()
        }
    }
}

/// Validate an absolute base URL and normalize it to end in exactly one `/`.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed: Url = trimmed
        .parse()
        .map_err(|err| ApiError::Configuration(format!("invalid base URL {trimmed:?}: {err}")))?;
    if !parsed.has_host() {
        return Err(ApiError::Configuration(format!(
            "base URL {trimmed:?} has no host"
        )));
    }
    Ok(format!("{trimmed}/"))
}
