//! View models turning a [`FormState`] into form inputs or a read-only preview.

use std::collections::HashMap;

use super::{FormState, dates, is_numeric};
use crate::registry::{FieldConfig, FieldKind, OptionSource};

pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.svg";

/// Options fetched from the backend, keyed by field name.
pub type LoadedOptions = HashMap<&'static str, Vec<(String, String)>>;

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One rendered input.
pub struct FieldView {
    pub name: String,
    pub label: String,
    /// Template branch: text, textarea, editor, image, select, number, date,
    /// checkbox or password.
    pub widget: &'static str,
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub disabled: bool,
    pub wide: bool,
    pub placeholder: String,
    pub max_length: Option<usize>,
    pub options: Vec<SelectOption>,
}

pub fn field_views(state: &FormState, loaded: &LoadedOptions) -> Vec<FieldView> {
    let config = state.config();
    config
        .fields
        .iter()
        .map(|f| {
            let value = state.display(f);
            let options = match f.options {
                Some(source) => select_options(f, source, &value, loaded),
                None => vec![],
            };
            FieldView {
                name: f.name.to_string(),
                label: f.label.to_string(),
                widget: match f.kind {
                    FieldKind::Boolean => "checkbox",
                    other => other.as_str(),
                },
                checked: state.flag(f.name),
                required: f.required,
                disabled: config.is_identity(f),
                wide: matches!(f.kind, FieldKind::Textarea | FieldKind::Editor),
                placeholder: f.placeholder.unwrap_or(f.label).to_string(),
                max_length: f.max_length,
                options,
                value,
            }
        })
        .collect()
}

/// Options of one select with the stored value selected. Fixed options
/// match case-insensitively and take the stored spelling, so an untouched
/// submit posts back exactly what was loaded. A stored value missing from
/// the list (or from a list that failed to load) is kept as an extra option.
fn select_options(
    field: &FieldConfig,
    source: OptionSource,
    value: &str,
    loaded: &LoadedOptions,
) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = match source {
        OptionSource::Fixed(list) => list
            .iter()
            .map(|o| {
                let selected = o.eq_ignore_ascii_case(value);
                SelectOption {
                    value: if selected { value.to_string() } else { o.to_string() },
                    label: o.to_string(),
                    selected,
                }
            })
            .collect(),
        _ => loaded
            .get(field.name)
            .map(|opts| {
                opts.iter()
                    .map(|(v, l)| SelectOption {
                        value: v.clone(),
                        label: l.clone(),
                        selected: v == value,
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };

    let unset = value.trim().is_empty() || (is_numeric(field) && value.trim() == "0");
    if !unset && !options.iter().any(|o| o.selected) {
        options.push(SelectOption {
            value: value.to_string(),
            label: value.to_string(),
            selected: true,
        });
    }
    options
}

/// One read-only preview row.
pub struct PreviewView {
    pub label: String,
    /// image, html, pill, date or text.
    pub kind: &'static str,
    pub text: String,
    pub on: bool,
}

pub fn preview_views(state: &FormState, loaded: &LoadedOptions) -> Vec<PreviewView> {
    state
        .config()
        .fields
        .iter()
        .filter(|f| f.kind != FieldKind::Password)
        .map(|f| {
            let raw = state.text(f.name);
            let (kind, text) = match f.kind {
                FieldKind::Image if raw.trim().is_empty() => ("image", PLACEHOLDER_IMAGE.to_string()),
                FieldKind::Image => ("image", raw),
                FieldKind::Editor => ("html", raw),
                FieldKind::Boolean => {
                    let label = if state.flag(f.name) { "Evet" } else { "Hayır" };
                    ("pill", label.to_string())
                }
                FieldKind::Date => ("date", dates::display(&raw)),
                FieldKind::Select => {
                    let label = loaded
                        .get(f.name)
                        .and_then(|opts| opts.iter().find(|(v, _)| *v == raw))
                        .map(|(_, l)| l.clone())
                        .unwrap_or(raw);
                    ("text", label)
                }
                _ => ("text", raw),
            };
            PreviewView {
                label: f.label.to_string(),
                kind,
                text,
                on: state.flag(f.name),
            }
        })
        .collect()
}

/// Hidden inputs carrying the draft through the preview page.
/// Unchecked booleans are omitted, matching a real checkbox submit.
pub fn draft_inputs(state: &FormState) -> Vec<(String, String)> {
    state
        .config()
        .fields
        .iter()
        .filter(|f| !state.config().is_identity(f))
        .filter_map(|f| match f.kind {
            FieldKind::Boolean if state.flag(f.name) => Some((f.name.to_string(), "on".to_string())),
            FieldKind::Boolean => None,
            _ => Some((f.name.to_string(), state.display(f))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TableKind;
    use serde_json::json;

    #[test]
    fn preview_rules_per_kind() {
        let record = json!({
            "raporId": 3, "raporBaslik": "Faaliyet", "raporUrl": "/r.pdf",
            "raporTarihi": "2024-12-31T00:00:00", "raporDurum": true, "categoryId": 2
        });
        let state = FormState::from_record(TableKind::Report, &record);
        let mut loaded = LoadedOptions::new();
        loaded.insert("categoryId", vec![("2".into(), "Mali".into())]);
        let rows = preview_views(&state, &loaded);

        let by_label = |l: &str| rows.iter().find(|r| r.label == l).unwrap();
        assert_eq!(by_label("Rapor Tarihi").text, "31.12.2024");
        assert_eq!(by_label("Yayında").kind, "pill");
        assert!(by_label("Yayında").on);
        assert_eq!(by_label("Kategori").text, "Mali");
    }

    #[test]
    fn empty_image_previews_placeholder() {
        let state = FormState::empty(TableKind::Event);
        let rows = preview_views(&state, &LoadedOptions::new());
        let image = rows.iter().find(|r| r.kind == "image").unwrap();
        assert_eq!(image.text, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn select_marks_current_value() {
        let state = FormState::from_record(TableKind::Announcement, &json!({"durum": "PASIF"}));
        let views = field_views(&state, &LoadedOptions::new());
        let durum = views.iter().find(|v| v.name == "durum").unwrap();
        let selected: Vec<_> = durum.options.iter().filter(|o| o.selected).map(|o| o.value.as_str()).collect();
        assert_eq!(selected, vec!["PASIF"]);
    }

    fn selected(views: &[FieldView], name: &str) -> Vec<String> {
        let view = views.iter().find(|v| v.name == name).unwrap();
        view.options.iter().filter(|o| o.selected).map(|o| o.value.clone()).collect()
    }

    #[test]
    fn uppercase_fixed_option_keeps_stored_spelling() {
        let state = FormState::from_record(TableKind::Corporate, &json!({"ID": 1, "KATEGORI": "BASKAN"}));
        let views = field_views(&state, &LoadedOptions::new());
        assert_eq!(selected(&views, "KATEGORI"), vec!["BASKAN"]);
        let kategori = views.iter().find(|v| v.name == "KATEGORI").unwrap();
        assert_eq!(kategori.options.len(), 4);
    }

    #[test]
    fn unlisted_category_stays_selected() {
        let state = FormState::from_record(TableKind::Report, &json!({"raporId": 1, "categoryId": 3}));
        let mut loaded = LoadedOptions::new();
        loaded.insert("categoryId", vec![("1".into(), "Mali".into())]);
        assert_eq!(selected(&field_views(&state, &loaded), "categoryId"), vec!["3"]);

        loaded.insert("categoryId", vec![]);
        assert_eq!(selected(&field_views(&state, &loaded), "categoryId"), vec!["3"]);
    }

    #[test]
    fn zero_category_selects_nothing() {
        let state = FormState::from_record(TableKind::Report, &json!({"raporId": 1, "categoryId": 0}));
        let views = field_views(&state, &LoadedOptions::new());
        assert!(selected(&views, "categoryId").is_empty());
    }

    #[test]
    fn id_field_is_disabled() {
        let state = FormState::from_record(TableKind::Publication, &json!({"yayinId": 5}));
        let views = field_views(&state, &LoadedOptions::new());
        assert!(views.iter().find(|v| v.name == "yayinId").unwrap().disabled);
        assert!(!views.iter().find(|v| v.name == "yayinBaslik").unwrap().disabled);
    }

    #[test]
    fn draft_inputs_skip_id_and_unchecked() {
        let state = FormState::from_record(TableKind::Report, &json!({"raporId": 1, "raporBaslik": "A"}));
        let inputs = draft_inputs(&state);
        assert!(inputs.iter().all(|(k, _)| k != "raporId" && k != "raporDurum"));
        assert!(inputs.contains(&("raporBaslik".to_string(), "A".to_string())));
    }
}
