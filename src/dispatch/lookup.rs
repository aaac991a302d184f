use serde_json::Value;

use super::DispatchError;
use crate::api::{ApiClient, ApiError};
use crate::registry::Category;
use crate::resources::{corporate, unwrap_envelope};

/// Shape of a collection endpoint used by the fallback scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// A bare array, or one wrapped in `data` / `content`.
    Flat,
    /// Category groups each holding their records under `children`.
    Grouped { children: &'static str },
}

/// How a mode finds its record. The backend is inconsistent: some
/// resources have a single-record endpoint, some only a collection, and
/// the corporate tables are split by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Try `direct`; on failure fetch `list` and scan for a record whose
    /// `id_field` is numerically equal to the requested id.
    DirectThenScan {
        direct: String,
        list: &'static str,
        shape: ListShape,
        id_field: &'static str,
    },
    /// Probe categories in order; the first non-empty answer wins.
    CategoryProbe { categories: &'static [Category] },
}

/// A record found by a lookup, plus the category that answered a probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    pub record: Value,
    pub category: Option<Category>,
}

impl Lookup {
    pub async fn run(&self, client: &ApiClient, id: i64) -> Result<Found, DispatchError> {
        match self {
            Lookup::DirectThenScan { direct, list, shape, id_field } => {
                match client.get::<Value>(direct).await {
                    Ok(v) => {
                        let v = unwrap_envelope(v);
                        if is_record(&v) {
                            return Ok(Found { record: v, category: None });
                        }
                        log::debug!("[dispatch] {direct} returned no record, scanning {list}");
                    }
                    Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
                    Err(e) => log::warn!("[dispatch] {direct} failed ({e}), scanning {list}"),
                }
                let all = client.get::<Value>(list).await?;
                scan(all, *shape, id_field, id)
                    .map(|record| Found { record, category: None })
                    .ok_or(DispatchError::NotFound)
            }
            Lookup::CategoryProbe { categories } => {
                for &cat in categories.iter() {
                    match corporate::find_in_category(client, cat.as_str(), id).await {
                        Ok(Some(record)) => {
                            log::debug!("[dispatch] record {id} found under {}", cat.as_str());
                            return Ok(Found { record, category: Some(cat) });
                        }
                        Ok(None) => {}
                        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
                        Err(e) => log::debug!("[dispatch] probe {} failed: {e}", cat.as_str()),
                    }
                }
                Err(DispatchError::NotFound)
            }
        }
    }
}

fn is_record(v: &Value) -> bool {
    v.as_object().is_some_and(|m| !m.is_empty())
}

/// Numeric id of a record. Only JSON numbers count; `"5"` never equals `5`.
pub fn record_id(record: &Value, id_field: &str) -> Option<i64> {
    record
        .get(id_field)
        .or_else(|| record.get(id_field.to_lowercase()))
        .and_then(Value::as_i64)
}

/// Find the record with the given numeric id in a collection answer.
pub fn scan(all: Value, shape: ListShape, id_field: &str, id: i64) -> Option<Value> {
    let items = match unwrap_envelope(all) {
        Value::Array(items) => items,
        Value::Object(mut m) => match m.remove("content") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    let records: Vec<Value> = match shape {
        ListShape::Flat => items,
        ListShape::Grouped { children } => items
            .into_iter()
            .flat_map(|mut group| match group.get_mut(children).map(Value::take) {
                Some(Value::Array(rs)) => rs,
                _ => vec![],
            })
            .collect(),
    };
    records.into_iter().find(|r| record_id(r, id_field) == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_uses_numeric_equality() {
        let all = json!([{"id": "5", "baslik": "string id"}, {"id": 5, "baslik": "numeric id"}]);
        let found = scan(all, ListShape::Flat, "id", 5).unwrap();
        assert_eq!(found["baslik"], "numeric id");
    }

    #[test]
    fn scan_flattens_groups() {
        let all = json!([
            {"categoryId": 1, "raporlar": [{"raporId": 10}]},
            {"categoryId": 2, "raporlar": [{"raporId": 11, "raporBaslik": "B"}]}
        ]);
        let found = scan(all, ListShape::Grouped { children: "raporlar" }, "raporId", 11).unwrap();
        assert_eq!(found["raporBaslik"], "B");
    }

    #[test]
    fn scan_accepts_envelopes_and_upper_case_ids() {
        let all = json!({"data": [{"ID": 3}]});
        assert!(scan(all, ListShape::Flat, "ID", 3).is_some());
        let paged = json!({"content": [{"id": 4}]});
        assert!(scan(paged, ListShape::Flat, "ID", 4).is_some());
    }
}
