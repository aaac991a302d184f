use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/users";

pub const STATUS_OPTIONS: &[&str] = &["Aktif", "Pasif", "Beklemede"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tcno: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isim: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub yetkiler_json: String,
}

/// Body of create and update calls. An absent password leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub tcno: String,
    pub isim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub status: String,
    pub yetkiler_json: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    let users: Option<Vec<User>> = logged("Failed to fetch users", client.get(BASE).await)?;
    Ok(users.unwrap_or_default())
}

pub async fn get(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    logged("Failed to fetch user", client.get(&format!("{BASE}/{id}")).await)
}

pub async fn create(client: &ApiClient, req: &UserRequest) -> Result<Value, ApiError> {
    logged("Failed to create user", client.post(BASE, req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &UserRequest) -> Result<Value, ApiError> {
    logged("Failed to update user", client.put(&format!("{BASE}/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/{id}")).await.map(drop);
    logged("Failed to delete user", result)
}
