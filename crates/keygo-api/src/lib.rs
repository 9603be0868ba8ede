// keygo-api: Async Rust client for the keygo REST API

pub mod client;
pub mod error;
pub mod identity;
pub mod models;
pub mod notice;
pub mod resources;
pub mod storage;
pub mod transport;

pub use client::{HttpClient, decode_json};
pub use error::{Error, ResponseError};
pub use identity::ClientIdentity;
pub use models::{
    AuthStatus, Provider, Tenant, TenantCreate, TenantUserCreate, Token, User, UserUpdateInput,
    is_admin,
};
pub use notice::{Notifier, RecordingNotifier, TracingNotifier};
pub use resources::{ApiClient, AuthCheck, user_path};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::{Method, Response, StatusCode};
