use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_collection, logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/kurumsal/etik-komisyonu";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default, alias = "Ad", deserialize_with = "null_as_default")]
    pub ad: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unvan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gorev: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub img_url: String,
}

/// The backend answers either a bare array or `{ "etikKomisyonu": [...] }`.
pub async fn list(client: &ApiClient) -> Result<Vec<CommitteeMember>, ApiError> {
    let result = client
        .get::<Value>(BASE)
        .await
        .and_then(|v| decode_collection(v, &["etikKomisyonu", "data"]));
    logged("Failed to fetch committee members", result)
}
