use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_collection, logged, null_as_default, unwrap_envelope};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/muhtarlar";

/// Neighbourhood head (muhtar) of one mahalle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Muhtar {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ad: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub soyad: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mahalle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telefon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eposta: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resim_url: String,
    /// Address or `lat,lng`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub konum: String,
}

impl Muhtar {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.ad.trim(), self.soyad.trim()).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MuhtarRequest {
    pub ad: String,
    pub soyad: String,
    pub mahalle: String,
    pub telefon: String,
    pub eposta: String,
    pub resim_url: String,
    pub konum: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Muhtar>, ApiError> {
    let result = client
        .get::<Value>(BASE)
        .await
        .and_then(|v| decode_collection(v, &["content", "data"]));
    logged("Failed to fetch muhtars", result)
}

/// Single record, falling back to a list scan when the direct fetch fails.
pub async fn get(client: &ApiClient, id: i64) -> Result<Muhtar, ApiError> {
    let direct = client
        .get::<Value>(&format!("{BASE}/{id}"))
        .await
        .map(unwrap_envelope)
        .and_then(|v| serde_json::from_value::<Muhtar>(v).map_err(ApiError::from));
    match direct {
        Ok(found) if found.id == id => Ok(found),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        _ => list(client)
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ApiError::Status { status: 404, message: "Kayıt bulunamadı.".to_string() }),
    }
}

pub async fn create(client: &ApiClient, req: &MuhtarRequest) -> Result<Value, ApiError> {
    logged("Failed to create muhtar", client.post(&format!("{BASE}/create"), req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &MuhtarRequest) -> Result<Value, ApiError> {
    logged("Failed to update muhtar", client.put(&format!("{BASE}/update/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/delete/{id}")).await.map(drop);
    logged("Failed to delete muhtar", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_missing_parts() {
        let m = Muhtar { ad: "Ayşe".into(), soyad: " Kaya ".into(), ..Muhtar::default() };
        assert_eq!(m.full_name(), "Ayşe Kaya");
        assert_eq!(Muhtar { ad: "Ayşe".into(), ..Muhtar::default() }.full_name(), "Ayşe");
    }
}
