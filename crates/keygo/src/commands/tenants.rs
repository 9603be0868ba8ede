//! Tenant command handlers.

use keygo_core::{Session, Tenant};
use tabled::Tabled;

use crate::cli::{GlobalOpts, TenantsArgs, TenantsCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn tenant_row(t: &Tenant) -> TenantRow {
    TenantRow {
        id: t.id.clone(),
        name: t.name.clone(),
        created: output::time(&t.created_at),
    }
}

fn detail(t: &Tenant) -> String {
    [
        format!("ID:      {}", t.id),
        format!("Name:    {}", t.name),
        format!("Created: {}", output::time(&t.created_at)),
        format!("Updated: {}", output::time(&t.updated_at)),
    ]
    .join("\n")
}

fn print_tenant(tenant: &Tenant, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.format(), tenant, detail, |t| t.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(session: &Session, args: TenantsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let api = session.api();
    match args.command {
        TenantsCommand::List => {
            let tenants = api.list_tenants().await?;
            let out = output::render_list(global.format(), &tenants, tenant_row, |t| t.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TenantsCommand::Get { id } => {
            let tenant = api
                .get_tenant(&id)
                .await
                .map_err(|e| CliError::not_found_as(e, "tenant", &id, "tenants list"))?;
            print_tenant(&tenant, global)
        }

        TenantsCommand::Add { name } => {
            let tenant = api.add_tenant(&name).await?;
            output::status(&format!("Tenant '{}' created", tenant.name), global.quiet);
            print_tenant(&tenant, global)
        }

        TenantsCommand::AddUser { tenant_id, email } => {
            let tenant = api
                .add_tenant_user(&tenant_id, &email)
                .await
                .map_err(|e| CliError::not_found_as(e, "tenant", &tenant_id, "tenants list"))?;
            output::status(&format!("Added {email} to tenant '{}'", tenant.name), global.quiet);
            Ok(())
        }
    }
}
