//! Auth endpoint wire types and operations

use fitdesk_core::{Session, UserRole};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Where login lives, relative to the base URL.
pub const LOGIN_PATH: &str = "auth/login/";

/// Where the token-refresh endpoint lives, relative to the base URL.
pub const REFRESH_PATH: &str = "token/refresh/";

/// `code` value the backend puts in a refresh rejection when the account
/// behind the token no longer exists.
pub const ACCOUNT_DELETED_CODE: &str = "user_not_found";

/// The request to log into the backend.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Result of logging in: both tokens plus the identity markers that make up
/// the stored session.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user_id: u64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    #[serde(default)]
    pub member_id: Option<String>,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            access_token: resp.access,
            refresh_token: resp.refresh,
            user_id: resp.user_id,
            username: resp.username,
            display_name: resp.display_name,
            role: UserRole::parse(&resp.role),
            member_id: resp.member_id,
        }
    }
}

/// Body sent to the refresh endpoint; the refresh token is the credential.
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// True when a refresh rejection carries the account-deleted signal.
pub(crate) fn is_account_deleted(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|body| {
            body.get("code")
                .and_then(|code| code.as_str())
                .map(|code| code == ACCOUNT_DELETED_CODE)
        })
        .unwrap_or(false)
}

impl ApiClient {
    /// Log in and persist the returned session.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        let response = self
            .request(Method::POST, LOGIN_PATH)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ApiError::from_status(status, body));
        }

        let body = response.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&body)?;
        let session = Session::from(parsed);
        self.store().store(&session);
        debug!(username = %session.username, role = session.role.as_str(), "logged in");
        Ok(session)
    }

    /// Log out locally by clearing the session store. Expiry paths share the
    /// same store-level clear, so every logout looks identical to callers.
    pub fn logout(&self) {
        self.store().clear();
        debug!("session cleared");
    }
}
