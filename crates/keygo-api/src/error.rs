use std::fmt;

use hyper::ext::ReasonPhrase;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Top-level error type for the `keygo-api` crate.
///
/// Every resource call funnels through [`HttpClient`](crate::HttpClient), so
/// this is the only error shape a caller of this crate ever has to branch on.
/// `keygo-core` maps these into session-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The server answered with a non-2xx status.
    #[error("{0}")]
    Response(#[from] ResponseError),

    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built (bad CA certificate, etc.)
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Identity ────────────────────────────────────────────────────
    /// The persisted identity store could not be read or written.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl Error {
    /// The HTTP status of a failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Response(e) => Some(e.status()),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` if the server rejected the session credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// The wrapped [`ResponseError`], if this is a non-2xx failure.
    pub fn as_response(&self) -> Option<&ResponseError> {
        match self {
            Self::Response(e) => Some(e),
            _ => None,
        }
    }
}

/// A non-2xx response from the API.
///
/// Carries the original status so callers can branch on it, plus the
/// `"{status} {statusText}"` summary. The body is only captured when it was
/// read to extract a user-facing message.
#[derive(Debug, Clone)]
pub struct ResponseError {
    status: StatusCode,
    status_text: String,
    url: Url,
    body: Option<String>,
    summary: String,
}

impl ResponseError {
    pub(crate) fn new(
        status: StatusCode,
        status_text: String,
        url: Url,
        body: Option<String>,
    ) -> Self {
        let summary = format!("{} {}", status.as_u16(), status_text);
        Self {
            status,
            status_text,
            url,
            body,
            summary,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase the server sent, e.g. `"Forbidden"`.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// The request URL that failed.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw response body, if it was read.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// `"{status} {statusText}"`, e.g. `"403 Forbidden"`.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Text for a user-facing notice when the body had no message: the
    /// reason phrase, or the bare status code if there is none.
    pub(crate) fn notice_text(&self) -> String {
        if self.status_text.is_empty() {
            self.status.as_str().to_owned()
        } else {
            self.status_text.clone()
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary)
    }
}

impl std::error::Error for ResponseError {}

/// Reason phrase of a response.
///
/// hyper only records the wire phrase (as a `ReasonPhrase` extension) when
/// it differs from the canonical one, so the canonical phrase fills in
/// otherwise. Empty for an unknown code sent without a phrase.
pub(crate) fn status_text(status: StatusCode, wire: Option<&ReasonPhrase>) -> String {
    wire.and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| status.canonical_reason())
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://localhost/api/users/7").unwrap()
    }

    fn response_error(status: StatusCode) -> ResponseError {
        let text = status_text(status, None);
        ResponseError::new(status, text, url(), None)
    }

    #[test]
    fn summary_is_status_and_reason() {
        let err = response_error(StatusCode::FORBIDDEN);
        assert_eq!(err.summary(), "403 Forbidden");
        assert_eq!(err.status_text(), "Forbidden");
        assert_eq!(err.to_string(), "403 Forbidden");
        assert_eq!(err.notice_text(), "Forbidden");
    }

    #[test]
    fn wire_reason_phrase_wins_over_canonical() {
        let status = StatusCode::from_u16(599).unwrap();
        let phrase = ReasonPhrase::from_static(b"Quota Exhausted");
        assert_eq!(status_text(status, Some(&phrase)), "Quota Exhausted");

        let phrase = ReasonPhrase::from_static(b"Go Away");
        assert_eq!(status_text(StatusCode::FORBIDDEN, Some(&phrase)), "Go Away");
    }

    #[test]
    fn unknown_status_without_phrase_notices_the_code() {
        let err = response_error(StatusCode::from_u16(599).unwrap());
        assert_eq!(err.status_text(), "");
        assert_eq!(err.summary(), "599 ");
        assert_eq!(err.notice_text(), "599");
    }

    #[test]
    fn predicates_read_response_status() {
        let err = Error::from(response_error(StatusCode::NOT_FOUND));
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.as_response().is_some());

        let err = Error::Storage {
            message: "disk full".into(),
        };
        assert_eq!(err.status(), None);
    }
}
