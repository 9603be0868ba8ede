// The single HTTP call primitive and its verb wrappers.
//
// Every request to the keygo API goes through `HttpClient::call`, which owns
// request shaping (JSON body, bearer credential), failure logging, notice
// dispatch and the `ResponseError` contract. Resource modules only build
// paths and decode bodies.

use std::fmt;
use std::sync::Arc;

use hyper::ext::ReasonPhrase;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::error::{Error, ResponseError, status_text};
use crate::identity::ClientIdentity;
use crate::notice::Notifier;
use crate::transport::TransportConfig;

/// Low-level client for the keygo API.
///
/// Resolves paths against a base URL, attaches the session credential, and
/// classifies every non-2xx response into [`Error::Response`]. One attempt per
/// call: no retries, no caching.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    credential: Option<ClientIdentity>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("sends_credential", &self.credential.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, notifier)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            credential: None,
            notifier,
        })
    }

    /// Send `Authorization: Bearer <client id ++ session token>` whenever a
    /// session token is stored.
    pub fn with_credential(mut self, identity: ClientIdentity) -> Self {
        self.credential = Some(identity);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an API path (e.g. `"/api/users"`) against the base URL.
    ///
    /// The leading slash is dropped so a base URL with a path prefix
    /// (`https://host/keygo/`) keeps its prefix.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Call primitive ───────────────────────────────────────────────

    /// Issue one request.
    ///
    /// `body`, when present, is sent as JSON with `Content-Type:
    /// application/json`. On a 2xx status the response is returned
    /// unconsumed. Any other status is logged, reported to the notifier when
    /// `show_error` is set, and returned as [`Error::Response`].
    pub async fn call<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        show_error: bool,
    ) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(header) = self.authorization().await? {
            request = request.header(AUTHORIZATION, header);
        }

        let resp = request.send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(self.fail(resp, show_error).await.into())
    }

    /// Log a failed response and, if asked, surface a notice for it.
    async fn fail(&self, resp: Response, show_error: bool) -> ResponseError {
        let status = resp.status();
        let text = status_text(status, resp.extensions().get::<ReasonPhrase>());
        let url = resp.url().clone();
        error!(status = status.as_u16(), reason = %text, %url, "request failed");

        if !show_error {
            return ResponseError::new(status, text, url, None);
        }

        let body = resp.text().await.ok();
        let message = body.as_deref().and_then(extract_message);
        let err = ResponseError::new(status, text, url, body);
        self.notifier
            .notify(&message.unwrap_or_else(|| err.notice_text()));
        err
    }

    async fn authorization(&self) -> Result<Option<HeaderValue>, Error> {
        let Some(identity) = &self.credential else {
            return Ok(None);
        };
        let Some(token) = identity.credential().await? else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Client(format!("invalid session token: {e}")))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get(&self, path: &str, show_error: bool) -> Result<Response, Error> {
        self.call::<()>(Method::GET, path, None, show_error).await
    }

    /// `body: None` sends no payload and no content type.
    pub async fn post<B>(&self, path: &str, body: Option<&B>) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, body, true).await
    }

    pub async fn put<B>(&self, path: &str, body: Option<&B>) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, body, true).await
    }

    pub async fn remove(&self, path: &str) -> Result<Response, Error> {
        self.call::<()>(Method::DELETE, path, None, true).await
    }
}

// ── Decoding ─────────────────────────────────────────────────────────

/// Read a success body and decode it into `T`.
pub async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

/// Pull a human-readable message out of an error body.
///
/// The server sends `{"message": "..."}`, or `{"message": {"Error": "..."}}`
/// for its auth errors. Anything else yields `None`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("message")? {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("Error")?.as_str()?,
        _ => return None,
    };
    (!message.is_empty()).then(|| message.to_owned())
}

/// Ensure the base URL ends with `/` so relative joins append to it.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
