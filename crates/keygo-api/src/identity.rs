// Client identity: a locally generated device identifier plus the
// server-issued session token, composed into the bearer credential.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;
use uuid::Uuid;

use crate::error::Error;
use crate::storage::KeyValueStore;

/// Storage key for the persisted client identifier.
pub const CLIENT_ID_KEY: &str = "clientID";
/// Storage key for the session token.
pub const TOKEN_KEY: &str = "token";

/// The device/profile identity and its session credential.
///
/// Built once during bootstrap with [`init`](Self::init). The client id is
/// fixed for the life of the value; the session token is re-read from
/// storage on every [`token`](Self::token) call.
///
/// The async methods run storage access on tokio's blocking pool, since a
/// [`FileStore`](crate::FileStore) does plain file I/O.
#[derive(Clone)]
pub struct ClientIdentity {
    client_id: String,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl ClientIdentity {
    /// Load the persisted client id, generating and storing one if absent.
    ///
    /// Two processes racing on a fresh store may both generate an id; the
    /// storage's last write decides which one sticks.
    pub fn init(storage: Arc<dyn KeyValueStore>) -> Result<Self, Error> {
        let client_id = match storage.get(CLIENT_ID_KEY)? {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = make_random_id();
                storage.set(CLIENT_ID_KEY, &id)?;
                info!(client_id = %id, "generated new client id");
                id
            }
        };
        Ok(Self { client_id, storage })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The stored session token, or an empty string when logged out.
    pub fn session_token(&self) -> Result<String, Error> {
        Ok(self.storage.get(TOKEN_KEY)?.unwrap_or_default())
    }

    /// `client_id ++ session_token`.
    pub fn token(&self) -> Result<SecretString, Error> {
        let session = self.session_token()?;
        Ok(SecretString::from(format!("{}{session}", self.client_id)))
    }

    /// Whether a session token is currently stored.
    pub fn has_session(&self) -> Result<bool, Error> {
        Ok(!self.session_token()?.is_empty())
    }

    /// The bearer credential, or `None` when no session token is stored.
    /// One storage read.
    pub async fn credential(&self) -> Result<Option<SecretString>, Error> {
        let client_id = self.client_id.clone();
        self.with_storage(move |storage| {
            Ok(storage
                .get(TOKEN_KEY)?
                .filter(|session| !session.is_empty())
                .map(|session| SecretString::from(format!("{client_id}{session}"))))
        })
        .await
    }

    pub async fn set_session_token(&self, token: &str) -> Result<(), Error> {
        let token = token.to_owned();
        self.with_storage(move |storage| storage.set(TOKEN_KEY, &token))
            .await
    }

    pub async fn clear_session_token(&self) -> Result<(), Error> {
        self.with_storage(|storage| storage.remove(TOKEN_KEY)).await
    }

    async fn with_storage<R, F>(&self, op: F) -> Result<R, Error>
    where
        F: FnOnce(&dyn KeyValueStore) -> Result<R, Error> + Send + 'static,
        R: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || op(storage.as_ref()))
            .await
            .map_err(|e| Error::Storage {
                message: format!("storage task failed: {e}"),
            })?
    }
}

/// Random identifier for anti-abuse and analytics. Not a secret.
fn make_random_id() -> String {
    Uuid::new_v4().simple().to_string()
}
