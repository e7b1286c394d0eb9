//! Session model: credentials plus the identity markers stored next to them

use serde::{Deserialize, Serialize};

/// Role marker stored with the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Trainer,
    Member,
}

impl UserRole {
    /// Parse a role string from the backend. Unknown values fall back to
    /// `Member`, which shares the default login view.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "trainer" => Self::Trainer,
            _ => Self::Member,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Trainer => "trainer",
            Self::Member => "member",
        }
    }
}

/// Which login view a signed-out user should land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginView {
    Admin,
    Default,
}

impl LoginView {
    /// Choose the login view for a role. Only admins get the admin view;
    /// everyone else (including anonymous users) gets the default one.
    pub const fn for_role(role: Option<UserRole>) -> Self {
        match role {
            Some(UserRole::Admin) => Self::Admin,
            _ => Self::Default,
        }
    }
}

/// A complete user session as written at login.
///
/// All fields are persisted and cleared together; a present session is what
/// "authenticated" means, there is no separate flag to drift out of sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived bearer credential sent with each authenticated request.
    pub access_token: String,
    /// Longer-lived credential exchanged for a new access token.
    pub refresh_token: String,
    pub user_id: u64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    /// Role-specific membership identifier; absent for staff roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
}
