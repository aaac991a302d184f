//! In-memory draft of a record being created or edited.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::registry::{FieldConfig, FieldKind, OptionSource, TableConfig, TableKind};
use crate::resources::truthy;

pub mod dates;
pub mod widgets;

/// Draft keyed by field name. Holds exactly the fields declared by its
/// table; anything else in a fetched record is left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    kind: TableKind,
    values: Map<String, Value>,
}

impl FormState {
    /// Fresh draft for a create page.
    pub fn empty(kind: TableKind) -> Self {
        let values = kind
            .config()
            .fields
            .iter()
            .map(|f| (f.name.to_string(), default_value(f)))
            .collect();
        Self { kind, values }
    }

    /// Draft populated from backend JSON. Each declared field is looked up
    /// by exact name, then lower-cased name, then given its default.
    pub fn from_record(kind: TableKind, record: &Value) -> Self {
        let empty = Map::new();
        let source = record.as_object().unwrap_or(&empty);
        let values = kind
            .config()
            .fields
            .iter()
            .map(|f| {
                let value = match f.kind {
                    FieldKind::Password => default_value(f),
                    _ => lookup(source, f.name).cloned().unwrap_or_else(|| default_value(f)),
                };
                (f.name.to_string(), value)
            })
            .collect();
        Self { kind, values }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn config(&self) -> &'static TableConfig {
        self.kind.config()
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Record id, read from the table's id field.
    pub fn id(&self) -> Option<i64> {
        self.values.get(self.config().id_field).and_then(as_int)
    }

    pub fn text(&self, name: &str) -> String {
        self.values.get(name).map(plain_text).unwrap_or_default()
    }

    pub fn int(&self, name: &str) -> i64 {
        self.values.get(name).and_then(as_int).unwrap_or(0)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(truthy)
    }

    /// String shown in the field's input.
    pub fn display(&self, field: &FieldConfig) -> String {
        self.values
            .get(field.name)
            .map(|v| input_text(field, v))
            .unwrap_or_default()
    }

    /// Apply one submitted input. `None` means the key was absent from the
    /// form, which for a checkbox means unchecked.
    ///
    /// A submitted string equal to what the input was showing keeps the
    /// stored value as-is, so untouched fields (including full timestamps
    /// behind a date input) survive a save unchanged.
    pub fn apply_input(&mut self, field: &FieldConfig, raw: Option<&str>) {
        if self.config().is_identity(field) {
            return;
        }
        let current = self.values.get(field.name).cloned().unwrap_or(Value::Null);

        let next = match field.kind {
            FieldKind::Boolean => {
                let checked = raw.is_some_and(|r| truthy(&Value::String(r.to_string())));
                if !current.is_null() && truthy(&current) == checked {
                    return;
                }
                Value::Bool(checked)
            }
            _ => {
                let Some(raw) = raw else { return };
                if !current.is_null() && raw == input_text(field, &current) {
                    return;
                }
                if is_numeric(field) {
                    parse_number(raw)
                } else {
                    Value::String(raw.to_string())
                }
            }
        };
        self.values.insert(field.name.to_string(), next);
    }

    /// Apply a whole submitted form body.
    pub fn apply_form(&mut self, form: &HashMap<String, String>) {
        for field in self.config().fields {
            self.apply_input(field, form.get(field.name).map(String::as_str));
        }
    }

    /// Required and length checks. An empty result means the draft may be sent.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        for field in self.config().fields {
            let value = self.values.get(field.name).unwrap_or(&Value::Null);
            if field.required && is_blank(field, value) {
                errors.push(format!("{} zorunludur", field.label));
                continue;
            }
            if let (Some(max), Value::String(s)) = (field.max_length, value) {
                if s.trim().chars().count() > max {
                    errors.push(format!("{} en fazla {max} karakter olabilir", field.label));
                }
            }
        }
        errors
    }
}

/// Number fields and selects whose options are backend ids.
pub fn is_numeric(field: &FieldConfig) -> bool {
    field.kind == FieldKind::Number
        || matches!(
            field.options,
            Some(
                OptionSource::PublicationCategories
                    | OptionSource::ReportCategories
                    | OptionSource::NewsCategories
            )
        )
}

fn default_value(field: &FieldConfig) -> Value {
    if is_numeric(field) {
        Value::from(0)
    } else if field.kind == FieldKind::Boolean {
        Value::Bool(false)
    } else {
        Value::String(String::new())
    }
}

fn lookup<'a>(record: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    record
        .get(name)
        .filter(|v| !v.is_null())
        .or_else(|| record.get(&name.to_lowercase()).filter(|v| !v.is_null()))
}

/// Empty input is 0, never null. Unparseable text is 0 as well.
pub fn parse_number(raw: &str) -> Value {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Value::from(n);
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

fn as_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn plain_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn input_text(field: &FieldConfig, v: &Value) -> String {
    let text = plain_text(v);
    match field.kind {
        FieldKind::Date => dates::input_value(&text),
        _ => text,
    }
}

fn is_blank(field: &FieldConfig, v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Number(_) if is_numeric(field) && field.kind == FieldKind::Select => {
            as_int(v) == Some(0)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_draft_fails_validation_for_every_table() {
        for kind in TableKind::ALL {
            assert!(!FormState::empty(kind).validate().is_empty(), "{kind}");
        }
    }

    #[test]
    fn from_record_falls_back_to_lowercase_then_default() {
        let record = json!({"id": 7, "baslik": "Başkan", "icerik": "<p>x</p>", "resimUrl1": "/a.png"});
        let state = FormState::from_record(TableKind::Corporate, &record);
        assert_eq!(state.int("ID"), 7);
        assert_eq!(state.text("BASLIK"), "Başkan");
        assert_eq!(state.text("resimUrl1"), "/a.png");
        assert_eq!(state.text("DELTA"), "");
        assert_eq!(state.id(), Some(7));
    }

    #[test]
    fn empty_number_input_becomes_zero() {
        let mut state = FormState::empty(TableKind::Publication);
        let field = TableKind::Publication.config().field("categoryId").unwrap();
        state.apply_input(field, Some("5"));
        assert_eq!(state.get("categoryId"), Some(&json!(5)));
        state.apply_input(field, Some(""));
        assert_eq!(state.get("categoryId"), Some(&json!(0)));
        state.apply_input(field, Some("abc"));
        assert_eq!(state.get("categoryId"), Some(&json!(0)));
    }

    #[test]
    fn unchanged_date_keeps_timestamp() {
        let record = json!({"id": 1, "baslik": "Konser", "tarih": "2025-05-01T19:00:00"});
        let mut state = FormState::from_record(TableKind::Event, &record);
        state.apply_form(&form(&[("baslik", "Konser"), ("tarih", "2025-05-01")]));
        assert_eq!(state.text("tarih"), "2025-05-01T19:00:00");

        state.apply_form(&form(&[("tarih", "2025-06-02")]));
        assert_eq!(state.text("tarih"), "2025-06-02");
    }

    #[test]
    fn identity_field_is_never_overwritten() {
        let mut state = FormState::from_record(TableKind::Event, &json!({"id": 9}));
        state.apply_form(&form(&[("id", "100")]));
        assert_eq!(state.id(), Some(9));
    }

    #[test]
    fn named_id_field_is_never_overwritten() {
        let mut state = FormState::from_record(TableKind::Report, &json!({"raporId": 4, "raporBaslik": "A"}));
        state.apply_form(&form(&[("raporId", "40"), ("raporBaslik", "A")]));
        assert_eq!(state.id(), Some(4));
        assert_eq!(state.get("raporId"), Some(&json!(4)));
    }

    #[test]
    fn missing_checkbox_is_false_and_untouched_flag_kept() {
        let mut state = FormState::from_record(TableKind::Report, &json!({"raporId": 1, "raporDurum": 1}));
        state.apply_form(&form(&[("raporDurum", "on")]));
        assert_eq!(state.get("raporDurum"), Some(&json!(1)));
        state.apply_form(&form(&[]));
        assert_eq!(state.get("raporDurum"), Some(&json!(false)));
    }

    #[test]
    fn required_select_with_zero_is_blank() {
        let mut state = FormState::empty(TableKind::Publication);
        state.apply_form(&form(&[("yayinBaslik", "Bülten"), ("yayinUrl", "/b.pdf")]));
        let errors = state.validate();
        assert_eq!(errors, vec!["Kategori zorunludur".to_string()]);
    }

    #[test]
    fn max_length_is_checked() {
        let mut state = FormState::empty(TableKind::User);
        state.apply_form(&form(&[("tcno", "123456789012"), ("isim", "Ali"), ("status", "Aktif")]));
        assert_eq!(state.validate(), vec!["TC Kimlik No en fazla 11 karakter olabilir".to_string()]);
    }

    #[test]
    fn password_is_never_prefilled() {
        let state = FormState::from_record(TableKind::User, &json!({"id": 1, "password": "hash"}));
        assert_eq!(state.text("password"), "");
    }
}
