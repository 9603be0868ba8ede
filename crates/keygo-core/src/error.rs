// ── Core error types ──
//
// Errors surfaced by the session layer. API failures are wrapped as-is so
// callers can still branch on the HTTP status of a `ResponseError`.

use keygo_api::StatusCode;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors (wrapped unchanged) ───────────────────────────────
    #[error(transparent)]
    Api(#[from] keygo_api::Error),

    // ── Session errors ───────────────────────────────────────────────
    #[error("Not signed in")]
    NotAuthenticated,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The wrapped API error, if any.
    pub fn api(&self) -> Option<&keygo_api::Error> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of the failed call, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        self.api().and_then(keygo_api::Error::status)
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
            || self.api().is_some_and(keygo_api::Error::is_unauthorized)
    }
}
