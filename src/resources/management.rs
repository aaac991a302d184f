use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{decode_collection, lenient_bool, lenient_string, logged, null_as_default, unwrap_envelope};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/kurumsal/yonetim-semasi";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementMember {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isim_soyisim: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resim_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pozisyon: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sira_no: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mudurlukler: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delta: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telefon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biyografi: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub archived: bool,
}

impl ManagementMember {
    /// Roster position as a number; unparseable values sort last.
    pub fn order(&self) -> i64 {
        self.sira_no.trim().parse().unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementUpdate {
    pub isim_soyisim: String,
    pub resim_url: String,
    pub pozisyon: String,
    pub sira_no: String,
    pub mudurlukler: String,
    pub delta: String,
    pub email: String,
    pub telefon: String,
    pub biyografi: String,
}

pub async fn list(client: &ApiClient) -> Result<Vec<ManagementMember>, ApiError> {
    let result = client
        .get::<Value>(BASE)
        .await
        .and_then(|v| decode_collection(v, &["data", "content"]));
    logged("Failed to fetch management roster", result)
}

/// Single record, with a `{data}` envelope removed.
pub async fn get(client: &ApiClient, id: i64) -> Result<ManagementMember, ApiError> {
    let result = client
        .get::<Value>(&format!("{BASE}/{id}"))
        .await
        .map(unwrap_envelope)
        .and_then(|v| serde_json::from_value(v).map_err(ApiError::from));
    logged("Failed to fetch management member", result)
}

pub async fn update(client: &ApiClient, id: i64, req: &ManagementUpdate) -> Result<Value, ApiError> {
    logged("Failed to update management member", client.put(&format!("{BASE}/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/{id}")).await.map(drop);
    logged("Failed to delete management member", result)
}

pub async fn archive(client: &ApiClient, id: i64, archived: bool) -> Result<(), ApiError> {
    let result = client
        .put::<Value, _>(&format!("{BASE}/{id}/archive"), &json!({ "archived": archived }))
        .await
        .map(drop);
    logged("Failed to archive management member", result)
}
