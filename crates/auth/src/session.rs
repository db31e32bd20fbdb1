use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted sign-in: the bearer token the backend issued plus its
/// validity window.
///
/// The token itself is opaque here; verifying it is the backend's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every API request.
    pub token: String,

    /// Display name of the signed-in user, when the backend returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp. `None` means the session lasts until sign-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            user: None,
            issued_at,
            expires_at: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        validate_session(self, now).is_ok()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    #[error("session token is empty")]
    EmptyToken,

    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate a session against `now`.
pub fn validate_session(session: &Session, now: DateTime<Utc>) -> Result<(), SessionValidationError> {
    if session.token.trim().is_empty() {
        return Err(SessionValidationError::EmptyToken);
    }
    if let Some(expires_at) = session.expires_at {
        if expires_at <= session.issued_at {
            return Err(SessionValidationError::InvalidTimeWindow);
        }
    }
    if now < session.issued_at {
        return Err(SessionValidationError::NotYetValid);
    }
    match session.expires_at {
        Some(expires_at) if now >= expires_at => Err(SessionValidationError::Expired),
        _ => Ok(()),
    }
}
