//! Command dispatch: bridges CLI args -> session operations -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod tenants;
pub mod users;

use keygo_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(session, args, global).await,
        Command::Users(args) => users::handle(session, args, global).await,
        Command::Tenants(args) => tenants::handle(session, args, global).await,
        // Config and Completions never reach the server
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
