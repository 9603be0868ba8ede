#![allow(clippy::unwrap_used)]
// Integration tests for the typed resource clients using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use keygo_api::{
    ApiClient, AuthCheck, AuthStatus, ClientIdentity, Error, HttpClient, KeyValueStore,
    MemoryStore, RecordingNotifier, UserUpdateInput,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Fixture {
    server: MockServer,
    client: ApiClient,
    notifier: RecordingNotifier,
    storage: Arc<dyn KeyValueStore>,
}

async fn setup() -> Fixture {
    let server = MockServer::start().await;
    let notifier = RecordingNotifier::new();
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    storage.set("clientID", "client 1").unwrap();
    storage.set("token", "session").unwrap();

    let identity = ClientIdentity::init(Arc::clone(&storage)).unwrap();
    let http = HttpClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Arc::new(notifier.clone()),
    )
    .unwrap()
    .with_credential(identity.clone());

    Fixture {
        server,
        client: ApiClient::new(http, identity),
        notifier,
        storage,
    }
}

fn user_body(id: &str, role: &str) -> serde_json::Value {
    json!({
        "ID": id,
        "Email": "a@b.com",
        "FirstName": "Ada",
        "LastName": "Lovelace",
        "AvatarURL": "https://example.com/a.png",
        "Role": role,
        "TenantID": "t1",
        "CreatedAt": "2024-01-01T00:00:00Z",
        "UpdatedAt": "2024-01-02T00:00:00Z",
        "LastLoginAt": "2024-01-03T00:00:00Z"
    })
}

fn tenant_body(id: &str, name: &str) -> serde_json::Value {
    json!({
        "ID": id,
        "Name": name,
        "CreatedAt": "2024-01-01T00:00:00Z",
        "UpdatedAt": "2024-01-01T00:00:00Z"
    })
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_auth_status_fresh() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IsAuthenticated": true,
            "Expiry": "2030-01-01T00:00:00Z",
            "UserID": "42"
        })))
        .mount(&f.server)
        .await;

    let check = f.client.get_auth_status().await;

    assert!(!check.is_degraded());
    assert!(check.status().is_authenticated);
    assert_eq!(check.status().user_id, "42");
}

#[tokio::test]
async fn test_auth_status_degrades_on_server_error() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&f.server)
        .await;

    let check = f.client.get_auth_status().await;

    assert_eq!(check, AuthCheck::Degraded(AuthStatus::default()));
    let status = check.into_status();
    assert!(!status.is_authenticated);
    assert!(!status.is_valid);
    assert_eq!(status.expiry, None);
    assert_eq!(status.user_id, "");
}

#[tokio::test]
async fn test_auth_status_degrades_on_bad_body() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&f.server)
        .await;

    let check = f.client.get_auth_status().await;

    assert!(check.is_degraded());
    assert!(f.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_login_providers_send_encoded_client_id() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/login"))
        .and(query_param("client_id", "client 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Key": "google", "Name": "Google", "RedirectURL": "https://accounts.google.com/x" }
        ])))
        .mount(&f.server)
        .await;

    let providers = f.client.get_login_providers().await.unwrap();

    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].key, "google");
    assert_eq!(providers[0].redirect_url, "https://accounts.google.com/x");

    let requests = f.server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("client_id=client%201"));
}

#[tokio::test]
async fn test_logout_clears_session_even_on_failure() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&f.server)
        .await;

    let result = f.client.logout().await;

    assert!(result.is_err());
    assert!(f.notifier.messages().is_empty());
    assert_eq!(f.storage.get("token").unwrap(), None);
    assert_eq!(f.storage.get("clientID").unwrap().as_deref(), Some("client 1"));
}

/// Reads and writes work, deletes fail.
struct ReadOnlyTokenStore(MemoryStore);

impl KeyValueStore for ReadOnlyTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.0.set(key, value)
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Err(Error::Storage {
            message: "identity.json: read-only file system".into(),
        })
    }
}

#[tokio::test]
async fn test_logout_reports_storage_failure_after_server_failure() {
    let server = MockServer::start().await;
    let inner = MemoryStore::new();
    inner.set("clientID", "cid").unwrap();
    inner.set("token", "sess").unwrap();
    let identity = ClientIdentity::init(Arc::new(ReadOnlyTokenStore(inner))).unwrap();
    let http = HttpClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();
    let client = ApiClient::new(http, identity.clone());

    Mock::given(method("GET"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.logout().await.unwrap_err();

    assert!(matches!(err, Error::Storage { .. }), "got {err:?}");
    assert!(identity.has_session().unwrap());
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_user_admin() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("42", "Admin")))
        .mount(&f.server)
        .await;

    let user = f.client.get_user("42").await.unwrap();

    assert_eq!(user.id, "42");
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.tenant_id.as_deref(), Some("t1"));
    assert!(keygo_api::is_admin(&user));
}

#[tokio::test]
async fn test_user_paths_are_percent_encoded() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("a/b c", "Basic")))
        .expect(1)
        .mount(&f.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("a/b c", "Basic")))
        .expect(1)
        .mount(&f.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/a%2Fb%20c/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&f.server)
        .await;

    f.client.get_user("a/b c").await.unwrap();
    f.client
        .update_user("a/b c", &UserUpdateInput::default())
        .await
        .unwrap();
    f.client.list_user_tokens("a/b c").await.unwrap();
}

#[tokio::test]
async fn test_list_users() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_body("1", "Admin"), user_body("2", "Basic")])),
        )
        .mount(&f.server)
        .await;

    let users = f.client.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert!(users[0].is_admin());
    assert!(!users[1].is_admin());
}

#[tokio::test]
async fn test_update_user_sends_only_set_fields() {
    let f = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/7"))
        .and(body_json(json!({ "LastName": "Hopper" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("7", "Basic")))
        .expect(1)
        .mount(&f.server)
        .await;

    let input = UserUpdateInput {
        last_name: Some("Hopper".into()),
        ..UserUpdateInput::default()
    };
    let user = f.client.update_user("7", &input).await.unwrap();
    assert_eq!(user.id, "7");
}

#[tokio::test]
async fn test_update_user_forbidden_propagates() {
    let f = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/7"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "not allowed" })))
        .mount(&f.server)
        .await;

    let err = f
        .client
        .update_user("7", &UserUpdateInput::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "403 Forbidden");
    assert_eq!(f.notifier.messages(), vec!["not allowed"]);
}

#[tokio::test]
async fn test_list_user_tokens() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/42/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "ID": "tok1",
            "UserID": "42",
            "AuthID": "google|1",
            "LastUsedAt": "2024-02-01T00:00:00Z",
            "ExpiresAt": "2024-03-01T00:00:00Z",
            "CreatedAt": "2024-01-01T00:00:00Z",
            "UpdatedAt": "2024-02-01T00:00:00Z"
        }])))
        .mount(&f.server)
        .await;

    let tokens = f.client.list_user_tokens("42").await.unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].auth_id, "google|1");
    assert!(tokens[0].last_used_at.is_some());
}

#[tokio::test]
async fn test_malformed_user_is_deserialization_error() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ID": "42" })))
        .mount(&f.server)
        .await;

    let err = f.client.get_user("42").await.unwrap_err();

    assert!(
        matches!(err, keygo_api::Error::Deserialization { ref body, .. } if body.contains("42")),
        "got {err:?}"
    );
    assert!(f.notifier.messages().is_empty());
}

// ── Tenants ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_tenant() {
    let f = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/tenants"))
        .and(body_json(json!({ "Name": "Acme" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(tenant_body("t1", "Acme")))
        .expect(1)
        .mount(&f.server)
        .await;

    let tenant = f.client.add_tenant("Acme").await.unwrap();

    assert_eq!(tenant.id, "t1");
    assert_eq!(tenant.name, "Acme");
}

#[tokio::test]
async fn test_list_and_get_tenants() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([tenant_body("t1", "Acme"), tenant_body("t2", "Globex")])),
        )
        .mount(&f.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tenants/t%2F2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tenant_body("t/2", "Globex")))
        .mount(&f.server)
        .await;

    let tenants = f.client.list_tenants().await.unwrap();
    assert_eq!(
        tenants.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["Acme", "Globex"]
    );

    let tenant = f.client.get_tenant("t/2").await.unwrap();
    assert_eq!(tenant.id, "t/2");
}

#[tokio::test]
async fn test_add_tenant_user() {
    let f = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/tenants/t1/users"))
        .and(body_json(json!({ "Email": "new@acme.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tenant_body("t1", "Acme")))
        .expect(1)
        .mount(&f.server)
        .await;

    let tenant = f.client.add_tenant_user("t1", "new@acme.com").await.unwrap();
    assert_eq!(tenant.id, "t1");
}

#[tokio::test]
async fn test_get_tenant_not_found() {
    let f = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": { "Error": "not found" } })),
        )
        .mount(&f.server)
        .await;

    let err = f.client.get_tenant("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(f.notifier.messages(), vec!["not found"]);
}
