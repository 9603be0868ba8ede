// ── Session context ──
//
// Explicitly constructed bundle of everything a view layer needs: the API
// client, the client identity, and the reactive stores. Built once at
// bootstrap and passed down; nothing here is a global.

use std::sync::Arc;

use keygo_api::{
    ApiClient, AuthCheck, AuthStatus, ClientIdentity, FileStore, HttpClient, KeyValueStore,
    MemoryStore, Notifier, StatusCode, User,
};
use tracing::{debug, info};

use crate::auth::AuthStore;
use crate::config::{IdentityStorage, SessionConfig};
use crate::error::CoreError;
use crate::store::StoreReader;
use crate::user::UserStore;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

struct SessionInner {
    api: ApiClient,
    auth: AuthStore,
    user: UserStore,
}

impl Session {
    /// Initialize the client identity and build the API client.
    ///
    /// This is the one place the client id is created if it does not exist
    /// yet; call it once during process start-up.
    pub fn bootstrap(config: &SessionConfig, notifier: Arc<dyn Notifier>) -> Result<Self, CoreError> {
        if !matches!(config.api_url.scheme(), "http" | "https") {
            return Err(CoreError::Config {
                message: format!("unsupported API URL scheme '{}'", config.api_url.scheme()),
            });
        }

        let storage: Arc<dyn KeyValueStore> = match &config.storage {
            IdentityStorage::File(path) => Arc::new(FileStore::new(path)),
            IdentityStorage::Memory => Arc::new(MemoryStore::new()),
        };
        let identity = ClientIdentity::init(storage)?;
        debug!(client_id = identity.client_id(), "client identity ready");

        let mut http = HttpClient::new(config.api_url.as_str(), &config.transport(), notifier)?;
        if config.send_credential {
            http = http.with_credential(identity.clone());
        }

        info!(api_url = %config.api_url, "session bootstrapped");
        Ok(Self::new(ApiClient::new(http, identity)))
    }

    /// Wrap an already-built API client.
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                api,
                auth: AuthStore::new(),
                user: UserStore::new(),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn identity(&self) -> &ClientIdentity {
        self.inner.api.identity()
    }

    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    pub fn user(&self) -> &UserStore {
        &self.inner.user
    }

    // ── Store shortcuts ──────────────────────────────────────────────

    pub fn auth_status(&self) -> StoreReader<AuthStatus> {
        self.inner.auth.reader()
    }

    pub fn current_user(&self) -> StoreReader<User> {
        self.inner.user.reader()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Check the session with the server and publish the result.
    pub async fn check_auth(&self) -> AuthCheck {
        self.inner.auth.check(&self.inner.api).await
    }

    /// Load a user into the current-user store.
    pub async fn load_user(&self, id: &str) -> Result<StatusCode, CoreError> {
        self.inner.user.load_user(&self.inner.api, id).await
    }

    /// Check auth, then load the signed-in user into the store.
    pub async fn refresh(&self) -> Result<Arc<User>, CoreError> {
        let check = self.check_auth().await;
        let status = check.status();
        if !status.is_authenticated || status.user_id.is_empty() {
            return Err(CoreError::NotAuthenticated);
        }
        self.load_user(&status.user_id).await?;
        Ok(self.inner.user.current())
    }

    /// Store a server-issued session token.
    pub async fn login(&self, token: &str) -> Result<(), CoreError> {
        self.identity().set_session_token(token).await?;
        info!("session token stored");
        Ok(())
    }

    /// End the session on the server and locally, then republish the
    /// auth status. The status is republished even if the server call
    /// failed, since the local token is gone either way.
    pub async fn logout(&self) -> Result<AuthCheck, CoreError> {
        let result = self.inner.api.logout().await;
        let check = self.check_auth().await;
        result?;
        Ok(check)
    }
}
