use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_collection, lenient_bool, logged, null_as_default, truthy, unwrap_envelope};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/kurumsal";
pub const CHAIRMAN_ENDPOINT: &str = "/api/kurumsal/baskan-misyon-vizyon";
pub const ETHICS_ENDPOINT: &str = "/api/kurumsal/etik-arabuluculuk";

/// Chairman, mission, vision or principles record. The backend mixes
/// upper-case column names with camelCase, so both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateRecord {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default, alias = "BASLIK", deserialize_with = "null_as_default")]
    pub baslik: String,
    #[serde(default, alias = "ICERIK", deserialize_with = "null_as_default")]
    pub icerik: String,
    #[serde(default, alias = "KATEGORI", deserialize_with = "null_as_default")]
    pub kategori: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resim_url1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url2: String,
    #[serde(default, alias = "AKTIF", deserialize_with = "lenient_bool")]
    pub aktif: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateUpdate {
    pub baslik: String,
    pub resim_url1: String,
    pub image_url2: String,
    pub icerik: String,
    pub kategori: String,
    pub aktif: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthicsUpdate {
    pub ad: String,
    pub unvan: String,
    pub gorev: String,
    pub tip: String,
    pub ilke: String,
    pub delta: String,
    pub resim_url: String,
}

/// All records of one category, as raw JSON objects.
pub async fn by_category_raw(client: &ApiClient, kategori: &str) -> Result<Vec<Value>, ApiError> {
    let result = client
        .get::<Value>(&format!("{BASE}/kategori/{kategori}"))
        .await
        .and_then(|v| decode_collection(v, &["data"]));
    logged("Failed to fetch corporate records", result)
}

pub async fn by_category(client: &ApiClient, kategori: &str) -> Result<Vec<CorporateRecord>, ApiError> {
    let raw = by_category_raw(client, kategori).await?;
    raw.into_iter()
        .map(|v| serde_json::from_value(v).map_err(ApiError::from))
        .collect()
}

/// The active record of a category: the one flagged `AKTIF`/`aktif`,
/// else the first one.
pub async fn active_by_category(client: &ApiClient, kategori: &str) -> Result<Option<CorporateRecord>, ApiError> {
    let raw = by_category_raw(client, kategori).await?;
    let picked = raw
        .iter()
        .find(|v| ["AKTIF", "aktif"].iter().any(|k| v.get(*k).is_some_and(truthy)))
        .or_else(|| raw.first())
        .cloned();
    picked
        .map(|v| serde_json::from_value(v).map_err(ApiError::from))
        .transpose()
}

/// One record of a category by id. A 404 or an empty body is `None`.
pub async fn find_in_category(client: &ApiClient, kategori: &str, id: i64) -> Result<Option<Value>, ApiError> {
    match client.get::<Value>(&format!("{BASE}/kategori/{kategori}/{id}")).await {
        Ok(v) => Ok(non_empty(unwrap_envelope(v))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn non_empty(v: Value) -> Option<Value> {
    match v {
        Value::Null => None,
        Value::Object(ref m) if m.is_empty() => None,
        Value::Array(items) => items.into_iter().next().and_then(non_empty),
        other => Some(other),
    }
}

pub async fn update(client: &ApiClient, id: i64, req: &CorporateUpdate) -> Result<Value, ApiError> {
    logged(
        "Failed to update corporate record",
        client.put(&format!("{CHAIRMAN_ENDPOINT}/{id}"), req).await,
    )
}

pub async fn update_ethics(client: &ApiClient, id: i64, req: &EthicsUpdate) -> Result<Value, ApiError> {
    logged(
        "Failed to update ethics record",
        client.put(&format!("{ETHICS_ENDPOINT}/{id}"), req).await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_empty_skips_blank_answers() {
        assert!(non_empty(json!(null)).is_none());
        assert!(non_empty(json!({})).is_none());
        assert!(non_empty(json!([])).is_none());
        assert_eq!(non_empty(json!([{"id": 2}])), Some(json!({"id": 2})));
    }

    #[test]
    fn upper_case_columns_deserialize() {
        let rec: CorporateRecord =
            serde_json::from_value(json!({"ID": 3, "BASLIK": "Başkan", "AKTIF": 1})).unwrap();
        assert_eq!(rec.id, 3);
        assert_eq!(rec.baslik, "Başkan");
        assert!(rec.aktif);
    }
}
