// keygo-core: Session bootstrap and reactive stores between keygo-api and a view layer.

pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod user;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::AuthStore;
pub use config::{IdentityStorage, SessionConfig, TlsVerification};
pub use error::CoreError;
pub use session::Session;
pub use store::{StoreReader, StoreStream, StoreWatchStream};
pub use user::UserStore;

pub use keygo_api::{AuthCheck, AuthStatus, Provider, Tenant, Token, User, UserUpdateInput};
