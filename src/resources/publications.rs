use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/yayinlar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(default)]
    pub yayin_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub yayin_baslik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub yayin_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationCategory {
    pub category_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub yayinlar: Vec<Publication>,
}

/// Body of create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRequest {
    pub yayin_baslik: String,
    pub yayin_url: String,
    pub description: String,
    pub category_id: i64,
}

pub async fn categories(client: &ApiClient) -> Result<Vec<PublicationCategory>, ApiError> {
    logged(
        "Failed to fetch publication categories",
        client.get(&format!("{BASE}/category/list")).await,
    )
}

pub async fn list(client: &ApiClient) -> Result<Vec<Publication>, ApiError> {
    logged("Failed to fetch publications", client.get(&format!("{BASE}/list")).await)
}

pub async fn category(client: &ApiClient, id: i64) -> Result<PublicationCategory, ApiError> {
    logged(
        "Failed to fetch publication category",
        client.get(&format!("{BASE}/category/find/{id}")).await,
    )
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Publication, ApiError> {
    logged("Failed to fetch publication", client.get(&format!("{BASE}/find/{id}")).await)
}

pub async fn create(client: &ApiClient, req: &PublicationRequest) -> Result<Value, ApiError> {
    logged("Failed to create publication", client.post(&format!("{BASE}/create"), req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &PublicationRequest) -> Result<Value, ApiError> {
    logged("Failed to update publication", client.put(&format!("{BASE}/update/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/delete/{id}")).await.map(drop);
    logged("Failed to delete publication", result)
}
