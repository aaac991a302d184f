use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/hizmetler";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityService {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub baslik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub img_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telefon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub konum: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub button_detay: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub button_konum: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mail: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kategori: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityServiceRequest {
    pub baslik: String,
    pub img_url: String,
    pub telefon: String,
    pub konum: String,
    pub button_detay: String,
    pub button_konum: String,
    pub mail: String,
    pub kategori: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<CityService>, ApiError> {
    logged("Failed to fetch city services", client.get(BASE).await)
}

pub async fn get(client: &ApiClient, id: i64) -> Result<CityService, ApiError> {
    logged("Failed to fetch city service", client.get(&format!("{BASE}/{id}")).await)
}

pub async fn create(client: &ApiClient, req: &CityServiceRequest) -> Result<Value, ApiError> {
    logged("Failed to create city service", client.post(&format!("{BASE}/create"), req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &CityServiceRequest) -> Result<Value, ApiError> {
    logged("Failed to update city service", client.put(&format!("{BASE}/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/{id}")).await.map(drop);
    logged("Failed to delete city service", result)
}
