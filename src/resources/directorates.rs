use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_collection, logged, null_as_default, unwrap_envelope};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/rest/api/mudurlukler";

/// A municipal directorate (müdürlük) and its manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directorate {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default, alias = "MUDURLUKISIM", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "AD", deserialize_with = "null_as_default")]
    pub manager_name: String,
    #[serde(default, alias = "EMAIL", deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, alias = "IMG_URL", deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mud_aciklamasi: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub regulations: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biography: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorateRequest {
    pub name: String,
    pub manager_name: String,
    pub email: String,
    pub image_url: String,
    pub mud_aciklamasi: String,
    pub regulations: String,
    pub biography: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Directorate>, ApiError> {
    let result = client
        .get::<Value>(&format!("{BASE}/list"))
        .await
        .and_then(|v| decode_collection(v, &["content", "data"]));
    logged("Failed to fetch directorates", result)
}

/// Single record. When the find call fails for any reason other than an
/// expired session, the list is scanned for the id instead.
pub async fn get(client: &ApiClient, id: i64) -> Result<Directorate, ApiError> {
    let direct = client
        .get::<Value>(&format!("{BASE}/find/{id}"))
        .await
        .map(unwrap_envelope)
        .and_then(|v| serde_json::from_value::<Directorate>(v).map_err(ApiError::from));
    match direct {
        Ok(found) if found.id == id => Ok(found),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        _ => list(client)
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::Status { status: 404, message: "Kayıt bulunamadı.".to_string() }),
    }
}

pub async fn create(client: &ApiClient, req: &DirectorateRequest) -> Result<Value, ApiError> {
    logged("Failed to create directorate", client.post(&format!("{BASE}/create"), req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &DirectorateRequest) -> Result<Value, ApiError> {
    logged("Failed to update directorate", client.put(&format!("{BASE}/update/{id}"), req).await)
}

/// The backend answers `true` or `false`; `false` means nothing was deleted.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client
        .delete::<Value>(&format!("{BASE}/delete/{id}"))
        .await
        .and_then(|v| match v {
            Value::Bool(false) => Err(ApiError::Rejected("Silinemedi".to_string())),
            _ => Ok(()),
        });
    logged("Failed to delete directorate", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_names_are_accepted() {
        let d: Directorate = serde_json::from_value(json!({
            "ID": 4, "MUDURLUKISIM": "Fen İşleri", "AD": "Ali Veli", "EMAIL": null
        }))
        .unwrap();
        assert_eq!(d.id, 4);
        assert_eq!(d.name, "Fen İşleri");
        assert_eq!(d.manager_name, "Ali Veli");
        assert_eq!(d.email, "");
    }
}
