use thiserror::Error;

use crate::types::{ApiError, CurrentUserResponse};

/// Failures of the authentication collaborator. A rejected login is not an
/// error; it resolves to `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl AuthError {
    /// Builds an `Http` error, taking the message from the backend's error
    /// envelope when the body is one.
    pub fn from_response(status: u16, body: &str) -> Self {
        AuthError::Http {
            status,
            message: ApiError::from_body(body).message().to_string(),
        }
    }
}

/// Interprets the login endpoint's reply: 2xx carries the signed-in user,
/// 401 and 403 mean the credentials were rejected, anything else fails.
pub fn login_outcome(status: u16, body: &str) -> Result<Option<CurrentUserResponse>, AuthError> {
    match status {
        200..=299 => serde_json::from_str(body)
            .map(Some)
            .map_err(|e| AuthError::Parse(e.to_string())),
        401 | 403 => Ok(None),
        _ => Err(AuthError::from_response(status, body)),
    }
}
