use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by [`crate::AuthGate::auth_fetch`]. Authentication failures
/// are never errors; they come back as ordinary responses.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("invalid header: {0}")]
    Header(String),
    #[error("invalid body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Why a logout did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutError {
    /// The CSRF cookie was absent; nothing was sent.
    #[error("csrf cookie is missing")]
    MissingCsrf,
    /// The request could not complete or returned a non-auth error status.
    #[error("logout request failed")]
    RequestFailed,
    /// The auth service answered 401 or 403.
    #[error("logout was rejected as unauthorized")]
    Unauthorized,
}

impl LogoutError {
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::MissingCsrf => "missing_csrf",
            Self::RequestFailed => "request_failed",
            Self::Unauthorized => "unauthorized",
        }
    }
}

pub type LogoutOutcome = Result<(), LogoutError>;
