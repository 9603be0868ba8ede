// ── Auth status store ──
//
// Holds the latest known session status. Every check writes, whether the
// server answered or the check degraded, so observers never see a status
// older than the last check.

use std::sync::Arc;

use keygo_api::{ApiClient, AuthCheck, AuthStatus};
use tracing::debug;

use crate::store::{Store, StoreReader};

/// Owner of the auth-status store.
#[derive(Default)]
pub struct AuthStore {
    status: Store<AuthStatus>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `/api/auth` and publish the result.
    pub async fn check(&self, api: &ApiClient) -> AuthCheck {
        let check = api.get_auth_status().await;
        debug!(
            authenticated = check.status().is_authenticated,
            degraded = check.is_degraded(),
            "auth status checked"
        );
        self.status.set(check.status().clone());
        check
    }

    pub fn current(&self) -> Arc<AuthStatus> {
        self.status.get()
    }

    pub fn reader(&self) -> StoreReader<AuthStatus> {
        self.status.reader()
    }
}
