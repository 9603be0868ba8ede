// ── Runtime session configuration ──
//
// Describes *where* the API lives and *where* the identity is persisted.
// Never touches config files; the front end builds a `SessionConfig` and
// hands it to `Session::bootstrap`.

use std::path::PathBuf;
use std::time::Duration;

use keygo_api::{TlsMode, TransportConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Additional CA certificate file.
    CustomCa(PathBuf),
}

/// Where the client id and session token are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityStorage {
    /// JSON document at this path.
    File(PathBuf),
    /// In memory only; a fresh client id every run.
    Memory,
}

/// Configuration for one API session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API base URL (e.g., `https://keygo.example.com`).
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Request timeout. `None` lets every call run to completion.
    pub timeout: Option<Duration>,
    pub storage: IdentityStorage,
    /// Attach the bearer credential when a session token is stored.
    pub send_credential: bool,
}

impl SessionConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: None,
            storage: IdentityStorage::Memory,
            send_credential: true,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }
}
