// ── Current user store ──

use std::sync::Arc;

use keygo_api::{ApiClient, StatusCode, User, decode_json, user_path};
use tracing::debug;

use crate::error::CoreError;
use crate::store::{Store, StoreReader};

/// Owner of the current-user store.
#[derive(Default)]
pub struct UserStore {
    user: Store<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a user, publish it, and return the HTTP status of the fetch.
    ///
    /// `GET /api/users/<id>`. On failure the store keeps its previous value.
    pub async fn load_user(&self, api: &ApiClient, id: &str) -> Result<StatusCode, CoreError> {
        let resp = api.http().get(&user_path(id), true).await?;
        let status = resp.status();
        let user: User = decode_json(resp).await?;
        debug!(user_id = %user.id, "loaded user");
        self.set_user(user);
        Ok(status)
    }

    /// Publish a user record.
    ///
    /// Only for records that came from an API response. This is not a
    /// validation boundary: never route user-entered data through it.
    pub fn set_user(&self, user: User) {
        self.user.set(user);
    }

    pub fn current(&self) -> Arc<User> {
        self.user.get()
    }

    pub fn reader(&self) -> StoreReader<User> {
        self.user.reader()
    }
}
