//! Session command handlers.

use keygo_core::{AuthStatus, Provider, Session};
use tabled::Tabled;

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProviderRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Login URL")]
    redirect_url: String,
}

fn provider_row(p: &Provider) -> ProviderRow {
    ProviderRow {
        key: p.key.clone(),
        name: p.name.clone(),
        redirect_url: p.redirect_url.clone(),
    }
}

fn status_detail(s: &AuthStatus, client_id: &str) -> String {
    let mut lines = vec![format!("Authenticated: {}", s.is_authenticated)];
    if s.is_authenticated {
        lines.push(format!("User ID:       {}", output::or_dash(&s.user_id)));
        lines.push(format!("Expires:       {}", output::opt_time(s.expiry.as_ref())));
    }
    lines.push(format!("Client ID:     {client_id}"));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Status => {
            let check = session.check_auth().await;
            if check.is_degraded() {
                output::status(
                    "Could not verify the session with the server; reporting signed out.",
                    global.quiet,
                );
            }
            let client_id = session.identity().client_id();
            let out = output::render_single(
                global.format(),
                check.status(),
                |s| status_detail(s, client_id),
                |s| s.is_authenticated.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthCommand::Providers => {
            let providers = session.api().get_login_providers().await?;
            let out = output::render_list(
                global.format(),
                &providers,
                provider_row,
                |p| p.redirect_url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthCommand::Login { token } => {
            session.login(&token).await?;
            let check = session.check_auth().await;
            let status = check.status();
            if !status.is_authenticated {
                return Err(CliError::NotAuthenticated);
            }
            output::status(&format!("Signed in as user {}", status.user_id), global.quiet);
            Ok(())
        }

        AuthCommand::Logout => {
            session.logout().await?;
            output::status("Signed out", global.quiet);
            Ok(())
        }
    }
}
