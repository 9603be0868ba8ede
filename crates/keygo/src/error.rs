//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and API failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use keygo_api::{Error as ApiError, StatusCode};
use keygo_config::ConfigError;
use keygo_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to keygo at {url}")]
    #[diagnostic(
        code(keygo::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not set up TLS: {message}")]
    #[diagnostic(
        code(keygo::tls_error),
        help("Check the ca_cert path in your profile.")
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(keygo::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(
        code(keygo::not_authenticated),
        help(
            "Sign in through one of: keygo auth providers\n\
             then store the issued token with: keygo auth login --token <TOKEN>"
        )
    )]
    NotAuthenticated,

    #[error("Session rejected by the server ({summary})")]
    #[diagnostic(
        code(keygo::auth_failed),
        help("The stored session may have expired. Run: keygo auth login --token <TOKEN>")
    )]
    AuthFailed { summary: String },

    #[error("Permission denied ({summary})")]
    #[diagnostic(code(keygo::forbidden))]
    Forbidden { summary: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(keygo::not_found),
        help("Run: keygo {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {summary}")]
    #[diagnostic(code(keygo::api_error))]
    Api { status: StatusCode, summary: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(
        code(keygo::unexpected_response),
        help("Run again with -vv to see the request that failed.")
    )]
    UnexpectedResponse { message: String },

    #[error("Client identity store failed: {message}")]
    #[diagnostic(
        code(keygo::identity),
        help("Check permissions on the storage_path of your profile.")
    )]
    Identity { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(keygo::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(keygo::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: keygo config init --url <URL> --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API URL configured")]
    #[diagnostic(
        code(keygo::no_config),
        help(
            "Pass --api-url, or create a profile with: keygo config init --url <URL>\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(keygo::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(keygo::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotAuthenticated | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Turn a 404 into a `NotFound` that names the resource; pass anything
    /// else through the normal mapping.
    pub fn not_found_as(
        err: impl Into<CliError>,
        resource_type: &str,
        identifier: &str,
        list_command: &str,
    ) -> Self {
        match err.into() {
            Self::Api { status, .. } if status == StatusCode::NOT_FOUND => Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            },
            other => other,
        }
    }
}

// ── Error mapping ────────────────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Response(resp) => {
                let summary = resp.summary().to_owned();
                match resp.status() {
                    StatusCode::UNAUTHORIZED => Self::AuthFailed { summary },
                    StatusCode::FORBIDDEN => Self::Forbidden { summary },
                    status => Self::Api { status, summary },
                }
            }
            ApiError::Transport(e) if e.is_timeout() => Self::Timeout,
            ApiError::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "api_url".into(),
                reason: e.to_string(),
            },
            ApiError::Client(message) => Self::Tls { message },
            ApiError::Deserialization { message, .. } => Self::UnexpectedResponse { message },
            ApiError::Storage { message } => Self::Identity { message },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::NotAuthenticated => Self::NotAuthenticated,
            CoreError::Config { message } => Self::Validation {
                field: "api_url".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
