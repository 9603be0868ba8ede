// Tenant endpoints

use tracing::debug;

use super::{ApiClient, encode};
use crate::client::decode_json;
use crate::error::Error;
use crate::models::{Tenant, TenantCreate, TenantUserCreate};

impl ApiClient {
    /// Create a tenant.
    ///
    /// `POST /api/tenants` with `{"Name": name}`
    pub async fn add_tenant(&self, name: &str) -> Result<Tenant, Error> {
        debug!(name, "creating tenant");
        let resp = self.http.post("/api/tenants", Some(&TenantCreate { name })).await?;
        decode_json(resp).await
    }

    /// `GET /api/tenants`
    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, Error> {
        let resp = self.http.get("/api/tenants", true).await?;
        decode_json(resp).await
    }

    /// `GET /api/tenants/<id>`
    pub async fn get_tenant(&self, id: &str) -> Result<Tenant, Error> {
        let path = format!("/api/tenants/{}", encode(id));
        let resp = self.http.get(&path, true).await?;
        decode_json(resp).await
    }

    /// Add a user to a tenant by email.
    ///
    /// `POST /api/tenants/<id>/users` with `{"Email": email}`
    pub async fn add_tenant_user(&self, tenant_id: &str, email: &str) -> Result<Tenant, Error> {
        let path = format!("/api/tenants/{}/users", encode(tenant_id));
        let resp = self.http.post(&path, Some(&TenantUserCreate { email })).await?;
        decode_json(resp).await
    }
}
