// keygo API records
//
// Wire names are the server's Go field names (`ID`, `FirstName`, ...).
// Required fields have no serde default, so a body missing one fails to
// decode instead of producing a half-filled record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role name that grants administrative access.
pub const ADMIN_ROLE: &str = "Admin";

// ── Auth ─────────────────────────────────────────────────────────────

/// Session status reported by `GET /api/auth`.
///
/// `Default` is the "not authenticated" value substituted when the status
/// cannot be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "IsAuthenticated")]
    pub is_authenticated: bool,
    #[serde(rename = "IsValid", default)]
    pub is_valid: bool,
    /// Meaningless unless `is_authenticated`.
    #[serde(rename = "Expiry", default, with = "zero_time")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(rename = "UserID", default)]
    pub user_id: String,
}

/// An OAuth login provider offered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "RedirectURL")]
    pub redirect_url: String,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "FirstName", default)]
    pub first_name: String,
    #[serde(rename = "LastName", default)]
    pub last_name: String,
    #[serde(rename = "AvatarURL", default)]
    pub avatar_url: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "TenantID", default)]
    pub tenant_id: Option<String>,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "LastLoginAt", default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        is_admin(self)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

pub fn is_admin(user: &User) -> bool {
    user.role == ADMIN_ROLE
}

/// Partial update for `PUT /api/users/<id>`. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdateInput {
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "FirstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "LastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

// ── Tenants ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantCreate<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantUserCreate<'a> {
    #[serde(rename = "Email")]
    pub email: &'a str,
}

// ── Tokens ───────────────────────────────────────────────────────────

/// An API credential record. Not the session token held by
/// [`ClientIdentity`](crate::ClientIdentity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "AuthID")]
    pub auth_id: String,
    #[serde(rename = "LastUsedAt", default)]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(rename = "ExpiresAt")]
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Token {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// ── Serde helpers ────────────────────────────────────────────────────

/// The server encodes "no time" as Go's zero time (`0001-01-01T00:00:00Z`)
/// or an empty string. Both read as `None`.
mod zero_time {
    use chrono::{DateTime, Datelike, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let parsed = DateTime::parse_from_rfc3339(&raw)
            .map_err(serde::de::Error::custom)?
            .with_timezone(&Utc);
        Ok((parsed.year() > 1).then_some(parsed))
    }
}
