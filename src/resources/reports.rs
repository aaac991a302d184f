use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/raporlar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub rapor_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rapor_baslik: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rapor_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapor_tarihi: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rapor_durum: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCategory {
    pub category_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raporlar: Vec<Report>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub rapor_baslik: String,
    pub rapor_url: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rapor_tarihi: Option<String>,
    pub rapor_durum: bool,
}

pub async fn categories(client: &ApiClient) -> Result<Vec<ReportCategory>, ApiError> {
    logged("Failed to fetch report categories", client.get(&format!("{BASE}/category/list")).await)
}

pub async fn category(client: &ApiClient, id: i64) -> Result<ReportCategory, ApiError> {
    logged("Failed to fetch report category", client.get(&format!("{BASE}/category/find/{id}")).await)
}

/// Every report across all categories, with `category_name` filled in.
/// The backend has no flat list endpoint.
pub async fn list(client: &ApiClient) -> Result<Vec<Report>, ApiError> {
    let cats = categories(client).await?;
    Ok(flatten(cats))
}

pub fn flatten(cats: Vec<ReportCategory>) -> Vec<Report> {
    cats.into_iter()
        .flat_map(|cat| {
            let name = cat.category_name;
            let id = cat.category_id;
            cat.raporlar.into_iter().map(move |mut r| {
                if r.category_id == 0 {
                    r.category_id = id;
                }
                r.category_name.get_or_insert_with(|| name.clone());
                r
            })
        })
        .collect()
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Report, ApiError> {
    logged("Failed to fetch report", client.get(&format!("{BASE}/find/{id}")).await)
}

pub async fn create(client: &ApiClient, req: &ReportRequest) -> Result<Value, ApiError> {
    logged("Failed to create report", client.post(&format!("{BASE}/create"), req).await)
}

pub async fn update(client: &ApiClient, id: i64, req: &ReportRequest) -> Result<Value, ApiError> {
    logged("Failed to update report", client.put(&format!("{BASE}/update/{id}"), req).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/delete/{id}")).await.map(drop);
    logged("Failed to delete report", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_fills_category_from_parent() {
        let cats = vec![ReportCategory {
            category_id: 4,
            category_name: "Faaliyet".into(),
            raporlar: vec![Report { rapor_id: 1, ..Default::default() }],
        }];
        let flat = flatten(cats);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].category_id, 4);
        assert_eq!(flat[0].category_name.as_deref(), Some("Faaliyet"));
    }
}
