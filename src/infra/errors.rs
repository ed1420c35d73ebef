// src/infra/errors.rs — Error types for studydesk

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    // Session errors (surfaced to the user, never retried)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Session expired or rejected by the server. Log in again.")]
    Unauthorized,

    #[error("Not logged in. Run `studydesk login` first.")]
    NotAuthenticated,

    // Network errors
    #[error("Request failed{}: {message}", status_suffix(.status))]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    // Durable storage
    #[error("Storage read failed: {0}")]
    StorageRead(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Record '{id}' already exists in {kind}")]
    DuplicateRecord { kind: String, id: String },

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl StudyError {
    pub const DEFAULT_AUTH_MESSAGE: &'static str = "Invalid credentials";

    /// Build an authentication error, falling back to the generic message
    /// when the server supplied none.
    pub fn authentication(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_AUTH_MESSAGE.to_string());
        StudyError::Authentication { message }
    }

    /// Whether the user has to log in (again) before retrying.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            StudyError::Authentication { .. }
                | StudyError::Unauthorized
                | StudyError::NotAuthenticated
        )
    }
}

impl From<reqwest::Error> for StudyError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            "server unreachable".to_string()
        } else {
            e.to_string()
        };
        StudyError::Network {
            status: e.status().map(|s| s.as_u16()),
            message,
        }
    }
}
