//! Client error types

use reqwest::StatusCode;

/// Failure kinds surfaced by the Fitdesk API client.
///
/// `Network` and `Http` are distinct on purpose: callers can tell "the
/// server was unreachable" apart from "the server answered and rejected the
/// request".
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No HTTP response was received (DNS/connect failures, timeouts).
    #[error("request failed before a response was received: {0}")]
    Network(#[from] reqwest::Error),

    /// The server returned a failure status and no special handling applied.
    #[error("server returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The session could not be renewed; treat the user as logged out.
    #[error("session expired and could not be renewed")]
    AuthExpired,

    /// The backend signaled that the account no longer exists.
    #[error("account no longer exists")]
    AccountDeleted,

    /// Invalid construction input.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A request or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Build the pass-through error for a non-2xx response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        Self::Http {
            status: status.as_u16(),
            body,
        }
    }

    /// HTTP status of the failure, when the server produced one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller should treat the user as logged out.
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired | Self::AccountDeleted)
    }
}
