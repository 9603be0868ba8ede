// User endpoints

use super::{ApiClient, encode};
use crate::client::decode_json;
use crate::error::Error;
use crate::models::{Token, User, UserUpdateInput};

impl ApiClient {
    /// `GET /api/users/<id>`
    pub async fn get_user(&self, id: &str) -> Result<User, Error> {
        let resp = self.http.get(&user_path(id), true).await?;
        decode_json(resp).await
    }

    /// `GET /api/users`
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        let resp = self.http.get("/api/users", true).await?;
        decode_json(resp).await
    }

    /// `PUT /api/users/<id>`
    pub async fn update_user(&self, id: &str, input: &UserUpdateInput) -> Result<User, Error> {
        let resp = self.http.put(&user_path(id), Some(input)).await?;
        decode_json(resp).await
    }

    /// `GET /api/users/<id>/tokens`
    pub async fn list_user_tokens(&self, id: &str) -> Result<Vec<Token>, Error> {
        let path = format!("{}/tokens", user_path(id));
        let resp = self.http.get(&path, true).await?;
        decode_json(resp).await
    }
}

/// `/api/users/<id>` with the id percent-encoded.
pub fn user_path(id: &str) -> String {
    format!("/api/users/{}", encode(id))
}
