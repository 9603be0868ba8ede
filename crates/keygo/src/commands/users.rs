//! User command handlers.

use chrono::Utc;
use keygo_core::{Session, Token, User, UserUpdateInput};
use tabled::Tabled;

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Last Login")]
    last_login: String,
}

fn user_row(u: &User) -> UserRow {
    UserRow {
        id: u.id.clone(),
        email: u.email.clone(),
        name: output::or_dash(&u.full_name()).to_owned(),
        role: u.role.clone(),
        last_login: output::opt_time(u.last_login_at.as_ref()),
    }
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Auth ID")]
    auth_id: String,
    #[tabled(rename = "Last Used")]
    last_used: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "State")]
    state: String,
}

fn token_row(t: &Token) -> TokenRow {
    TokenRow {
        id: t.id.clone(),
        auth_id: t.auth_id.clone(),
        last_used: output::opt_time(t.last_used_at.as_ref()),
        expires: output::time(&t.expires_at),
        state: if t.is_expired(Utc::now()) { "expired" } else { "active" }.into(),
    }
}

fn detail(u: &User) -> String {
    [
        format!("ID:         {}", u.id),
        format!("Email:      {}", u.email),
        format!("Name:       {}", output::or_dash(&u.full_name())),
        format!("Role:       {}{}", u.role, if u.is_admin() { " (admin)" } else { "" }),
        format!("Tenant:     {}", u.tenant_id.as_deref().unwrap_or("-")),
        format!("Avatar:     {}", output::or_dash(&u.avatar_url)),
        format!("Created:    {}", output::time(&u.created_at)),
        format!("Updated:    {}", output::time(&u.updated_at)),
        format!("Last Login: {}", output::opt_time(u.last_login_at.as_ref())),
    ]
    .join("\n")
}

fn print_user(user: &User, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.format(), user, detail, |u| u.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let api = session.api();
    match args.command {
        UsersCommand::List => {
            let users = api.list_users().await?;
            let out = output::render_list(global.format(), &users, user_row, |u| u.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Get { id } => {
            let user = api
                .get_user(&id)
                .await
                .map_err(|e| CliError::not_found_as(e, "user", &id, "users list"))?;
            print_user(&user, global)
        }

        UsersCommand::Update {
            id,
            email,
            first_name,
            last_name,
        } => {
            let input = UserUpdateInput {
                email,
                first_name,
                last_name,
            };
            if input.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --email, --first-name or --last-name".into(),
                });
            }
            let user = api
                .update_user(&id, &input)
                .await
                .map_err(|e| CliError::not_found_as(e, "user", &id, "users list"))?;
            print_user(&user, global)
        }

        UsersCommand::Tokens { id } => {
            let tokens = api
                .list_user_tokens(&id)
                .await
                .map_err(|e| CliError::not_found_as(e, "user", &id, "users list"))?;
            let out = output::render_list(global.format(), &tokens, token_row, |t| t.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Me => {
            let user = session.refresh().await?;
            print_user(&user, global)
        }
    }
}
