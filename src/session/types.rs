// src/session/types.rs — Session data and auth payloads

use serde::{Deserialize, Serialize};

pub const DEFAULT_GRADE: &str = "12";
pub const DEFAULT_ROLE: &str = "student";

fn default_grade() -> String {
    DEFAULT_GRADE.into()
}

fn default_role() -> String {
    DEFAULT_ROLE.into()
}

/// Profile of the logged-in user, as returned by the server and persisted
/// under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_grade")]
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// The authenticated identity plus its bearer token. Both halves always
/// travel together.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Body of a successful login or registration: the user fields flattened
/// next to the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

impl AuthResponse {
    /// Validate once at the boundary: a response without a usable token is
    /// not a session.
    pub fn into_session(self) -> Option<Session> {
        let token = self.token.trim().to_string();
        if token.is_empty() || self.user.id.is_empty() {
            return None;
        }
        Some(Session {
            user: self.user,
            token,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            email: identifier.into(),
            password: secret.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub grade: String,
    pub role: String,
}

impl RegisterRequest {
    /// New student registration; `grade` falls back to [`DEFAULT_GRADE`].
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        secret: impl Into<String>,
        grade: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: identifier.into(),
            password: secret.into(),
            grade: grade.unwrap_or_else(default_grade),
            role: default_role(),
        }
    }
}
