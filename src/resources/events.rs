use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/etkinlikler";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub baslik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tarih: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resim_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aciklama: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub baslik: String,
    pub tarih: String,
    pub resim_url: String,
    pub aciklama: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Event>, ApiError> {
    logged("Failed to fetch events", client.get(BASE).await)
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Event, ApiError> {
    logged("Failed to fetch event", client.get(&format!("{BASE}/{id}")).await)
}

pub async fn create(client: &ApiClient, req: &EventRequest) -> Result<Value, ApiError> {
    logged("Failed to create event", client.post(&format!("{BASE}/create"), req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &EventRequest) -> Result<Value, ApiError> {
    logged("Failed to update event", client.put(&format!("{BASE}/update/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/delete/{id}")).await.map(drop);
    logged("Failed to delete event", result)
}
