// Auth endpoints
//
// `/api/auth` is the one endpoint whose failures are swallowed: the caller
// always gets a status, tagged with whether it came from the server.

use tracing::{debug, error, warn};

use super::{ApiClient, encode};
use crate::client::decode_json;
use crate::error::Error;
use crate::models::{AuthStatus, Provider};

/// Outcome of an auth-status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCheck {
    /// The server answered with this status.
    Fresh(AuthStatus),
    /// The check failed; this is the synthetic "not authenticated" status.
    Degraded(AuthStatus),
}

impl AuthCheck {
    pub fn status(&self) -> &AuthStatus {
        match self {
            Self::Fresh(status) | Self::Degraded(status) => status,
        }
    }

    pub fn into_status(self) -> AuthStatus {
        match self {
            Self::Fresh(status) | Self::Degraded(status) => status,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

impl ApiClient {
    /// Fetch the session status.
    ///
    /// `GET /api/auth`. Never fails: any transport or decode error becomes
    /// [`AuthCheck::Degraded`] with [`AuthStatus::default()`]. This covers
    /// every failure, not only 401s.
    pub async fn get_auth_status(&self) -> AuthCheck {
        match self.fetch_auth_status().await {
            Ok(status) => AuthCheck::Fresh(status),
            Err(err) => {
                warn!(error = %err, "auth status unavailable, treating session as logged out");
                AuthCheck::Degraded(AuthStatus::default())
            }
        }
    }

    async fn fetch_auth_status(&self) -> Result<AuthStatus, Error> {
        let resp = self.http.get("/api/auth", true).await?;
        decode_json(resp).await
    }

    /// List the login providers for this client.
    ///
    /// `GET /api/auth/login?client_id=<id>`
    pub async fn get_login_providers(&self) -> Result<Vec<Provider>, Error> {
        let path = format!(
            "/api/auth/login?client_id={}",
            encode(self.identity.client_id())
        );
        debug!("listing login providers");
        let resp = self.http.get(&path, true).await?;
        decode_json(resp).await
    }

    /// End the server session and forget the local session token.
    ///
    /// `GET /api/auth/logout`, with notices suppressed. The local token is
    /// cleared even when the server call fails; that failure is still
    /// returned. If both fail, the server failure is logged and the storage
    /// failure returned.
    pub async fn logout(&self) -> Result<(), Error> {
        let result = self.http.get("/api/auth/logout", false).await;
        if let Err(clear_err) = self.identity.clear_session_token().await {
            if let Err(server_err) = &result {
                error!(error = %server_err, "server logout failed");
            }
            return Err(clear_err);
        }
        result.map(drop)
    }
}
