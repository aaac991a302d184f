//! Typed pass-through functions over the backend REST resources.
//!
//! One function per backend operation with a fixed path template. Failures
//! are logged and handed back unchanged; the caller decides what to show.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::api::ApiError;

pub mod announcements;
pub mod city_services;
pub mod committees;
pub mod complaints;
pub mod corporate;
pub mod directorates;
pub mod events;
pub mod files;
pub mod management;
pub mod muhtars;
pub mod news;
pub mod profile;
pub mod publications;
pub mod reports;
pub mod users;

/// Log a failed call under `context` and return the result untouched.
pub(crate) fn logged<T>(context: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        log::error!("{context}: {e}");
    }
    result
}

/// Treat JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Accept a string, a number or null for a text column.
pub(crate) fn lenient_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accept `true`, `1`, `"1"`, `"true"` as true; anything else as false.
pub(crate) fn lenient_bool<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(truthy(&Value::deserialize(d)?))
}

pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "on" | "evet"),
        _ => false,
    }
}

/// Strip a `{ "data": ... }` envelope if the backend added one.
pub fn unwrap_envelope(v: Value) -> Value {
    match v {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode a collection that may arrive as a bare array or wrapped in
/// one of the given object keys.
pub(crate) fn decode_collection<T>(v: Value, keys: &[&str]) -> Result<Vec<T>, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let items = match v {
        Value::Array(_) => v,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|k| map.remove(*k).filter(Value::is_array))
            .unwrap_or(Value::Array(vec![])),
        Value::Null => Value::Array(vec![]),
        other => {
            return Err(ApiError::Decode(format!("expected a list, got {other}")));
        }
    };
    Ok(serde_json::from_value(items)?)
}
