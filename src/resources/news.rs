use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/haberler";
pub const CATEGORIES: &str = "/api/kategoriler";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsCategory {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ad: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub baslik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tarih: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aciklama: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resim1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resim2: Option<String>,
    #[serde(default)]
    pub kategori: Option<NewsCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    pub baslik: String,
    pub aciklama: String,
    pub tarih: String,
    pub resim1: String,
    pub resim2: String,
    pub kategori_id: i64,
}

pub async fn list(client: &ApiClient) -> Result<Vec<News>, ApiError> {
    logged("Failed to fetch news", client.get(BASE).await)
}

pub async fn get(client: &ApiClient, id: i64) -> Result<News, ApiError> {
    logged("Failed to fetch news item", client.get(&format!("{BASE}/{id}")).await)
}

pub async fn create(client: &ApiClient, req: &NewsRequest) -> Result<Value, ApiError> {
    logged("Failed to create news item", client.post(&format!("{BASE}/create"), req).await)
}

/// The backend answers `true`/`false`; `false` is a refused write.
pub async fn update(client: &ApiClient, id: i64, req: &NewsRequest) -> Result<(), ApiError> {
    let result = client
        .put::<Value, _>(&format!("{BASE}/{id}"), req)
        .await
        .and_then(|v| match v {
            Value::Bool(false) => Err(ApiError::Rejected("Güncellenemedi".to_string())),
            _ => Ok(()),
        });
    logged("Failed to update news item", result)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/{id}")).await.map(drop);
    logged("Failed to delete news item", result)
}

pub async fn categories(client: &ApiClient) -> Result<Vec<NewsCategory>, ApiError> {
    logged("Failed to fetch news categories", client.get(CATEGORIES).await)
}
