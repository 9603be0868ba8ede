// Typed resource clients
//
// Each endpoint is an inherent method on `ApiClient`, split across files by
// resource. A method builds a path, issues one call through `HttpClient` and
// decodes the JSON body; errors pass through untouched, except for the
// auth-status check which degrades instead of failing.

mod auth;
mod tenants;
mod users;

use std::borrow::Cow;

pub use auth::AuthCheck;
pub use users::user_path;

use crate::client::HttpClient;
use crate::identity::ClientIdentity;

/// Resource-level client for the keygo API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    identity: ClientIdentity,
}

impl ApiClient {
    pub fn new(http: HttpClient, identity: ClientIdentity) -> Self {
        Self { http, identity }
    }

    /// The underlying call primitive, for requests without a typed wrapper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }
}

/// Percent-encode a value for use as a path segment or query value.
pub(crate) fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

#[cfg(test)]
mod tests {
    use super::encode;

    #[test]
    fn encode_escapes_reserved_characters() {
        assert_eq!(encode("a/b c"), "a%2Fb%20c");
        assert_eq!(encode("plain-id_1.2~"), "plain-id_1.2~");
        assert_eq!(encode("?&#"), "%3F%26%23");
    }
}
