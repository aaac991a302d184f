use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/duyuru";

pub const STATUS_OPTIONS: &[&str] = &["AKTIF", "PASIF", "TASLAK", "ARSIV"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub baslik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icerik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub durum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub olusturma_tarihi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guncelleme_tarihi: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub olusturan_kullanici: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Announcement>, ApiError> {
    logged("Failed to fetch announcements", client.get(BASE).await)
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Announcement, ApiError> {
    logged("Failed to fetch announcement", client.get(&format!("{BASE}/{id}")).await)
}

pub async fn create(client: &ApiClient, dto: &Announcement) -> Result<Announcement, ApiError> {
    logged("Failed to create announcement", client.post(BASE, dto).await)
}

pub async fn update(client: &ApiClient, id: i64, dto: &Announcement) -> Result<Announcement, ApiError> {
    logged("Failed to update announcement", client.put(&format!("{BASE}/{id}"), dto).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/{id}")).await.map(drop);
    logged("Failed to delete announcement", result)
}

pub async fn by_status(client: &ApiClient, durum: &str) -> Result<Vec<Announcement>, ApiError> {
    logged(
        "Failed to fetch announcements by status",
        client.get(&format!("{BASE}/durum/{durum}")).await,
    )
}

pub async fn search(client: &ApiClient, q: &str) -> Result<Vec<Announcement>, ApiError> {
    logged(
        "Failed to search announcements",
        client.get_query(&format!("{BASE}/arama"), &[("q", q)]).await,
    )
}

pub async fn by_status_and_search(
    client: &ApiClient,
    durum: &str,
    q: &str,
) -> Result<Vec<Announcement>, ApiError> {
    logged(
        "Failed to search announcements by status",
        client
            .get_query(&format!("{BASE}/durum-ve-arama"), &[("durum", durum), ("q", q)])
            .await,
    )
}

pub async fn active(client: &ApiClient) -> Result<Vec<Announcement>, ApiError> {
    logged("Failed to fetch active announcements", client.get(&format!("{BASE}/aktif")).await)
}
