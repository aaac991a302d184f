//! Generic edit-page dispatcher.
//!
//! One edit page serves every editable resource. The [`EditMode`] comes from
//! the route, picks a [`Lookup`] strategy to find the record, and the pair
//! `(EditMode, TableKind)` resolved at load time is the only path a draft can
//! be written back through.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::form::FormState;
use crate::registry::{Category, TableKind};
use crate::resources::{
    city_services, corporate, events, management, news, publications, reports,
};

pub mod lookup;
pub mod payload;

pub use lookup::{Found, ListShape, Lookup};
pub use payload::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    Event,
    News,
    Service,
    Report,
    Publication,
    Management,
    Corporate,
}

impl EditMode {
    pub const ALL: [EditMode; 7] = [
        EditMode::Event,
        EditMode::News,
        EditMode::Service,
        EditMode::Report,
        EditMode::Publication,
        EditMode::Management,
        EditMode::Corporate,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            EditMode::Event => "event",
            EditMode::News => "news",
            EditMode::Service => "service",
            EditMode::Report => "report",
            EditMode::Publication => "publication",
            EditMode::Management => "management",
            EditMode::Corporate => "corporate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditMode::Event => "Etkinlikler",
            EditMode::News => "Haberler",
            EditMode::Service => "Hizmetler",
            EditMode::Report => "Raporlar",
            EditMode::Publication => "Yayınlar",
            EditMode::Management => "Yönetim Şeması",
            EditMode::Corporate => "Başkan, Misyon, Vizyon",
        }
    }

    /// List page the mode returns to after a save or from the not-found page.
    pub fn back_url(self) -> &'static str {
        match self {
            EditMode::Event => "/panel/etkinlikler",
            EditMode::News => "/panel/haberler",
            EditMode::Service => "/panel/hizmetler",
            EditMode::Report => "/panel/raporlar",
            EditMode::Publication => "/panel/yayinlar",
            EditMode::Management => "/panel/kurumsal/yonetim",
            EditMode::Corporate => "/panel/kurumsal/bmvi",
        }
    }

    /// Permission module guarding writes in this mode.
    pub fn module(self) -> &'static str {
        match self {
            EditMode::Event => "etkinlikler",
            EditMode::News => "haberler",
            EditMode::Service => "hizmetler",
            EditMode::Report => "raporlar",
            EditMode::Publication => "yayinlar",
            EditMode::Management | EditMode::Corporate => "kurumsal",
        }
    }

    pub fn edit_url(self, id: i64) -> String {
        format!("/panel/edit/{}/{id}", self.slug())
    }

    /// Mode of a legacy edit URL. First match wins, in this order: events,
    /// management, news, services, reports, publications, then any
    /// `/kurumsal/` path as corporate.
    pub fn infer_from_path(path: &str) -> Option<EditMode> {
        const RULES: [(&str, EditMode); 7] = [
            ("/etkinlikler/", EditMode::Event),
            ("/kurumsal/yonetim", EditMode::Management),
            ("/haberler/", EditMode::News),
            ("/hizmetler/", EditMode::Service),
            ("/raporlar/", EditMode::Report),
            ("/yayinlar/", EditMode::Publication),
            ("/kurumsal/", EditMode::Corporate),
        ];
        RULES
            .iter()
            .find(|(needle, _)| path.contains(needle))
            .map(|(_, mode)| *mode)
    }

    /// Table a mode edits when the record does not say otherwise.
    pub fn table(self) -> TableKind {
        match self {
            EditMode::Event => TableKind::Event,
            EditMode::News => TableKind::News,
            EditMode::Service => TableKind::CityService,
            EditMode::Report => TableKind::Report,
            EditMode::Publication => TableKind::Publication,
            EditMode::Management => TableKind::ManagementChart,
            EditMode::Corporate => TableKind::Corporate,
        }
    }

    pub fn accepts(self, table: TableKind) -> bool {
        match self {
            EditMode::Corporate => {
                matches!(table, TableKind::Corporate | TableKind::EthicsMediation)
            }
            other => other.table() == table,
        }
    }

    pub fn lookup(self, id: i64) -> Lookup {
        let scan = |direct: String, list: &'static str, shape, id_field| Lookup::DirectThenScan {
            direct,
            list,
            shape,
            id_field,
        };
        match self {
            EditMode::Event => scan(format!("{}/{id}", events::BASE), events::BASE, ListShape::Flat, "id"),
            EditMode::News => scan(format!("{}/{id}", news::BASE), news::BASE, ListShape::Flat, "id"),
            EditMode::Service => scan(
                format!("{}/{id}", city_services::BASE),
                city_services::BASE,
                ListShape::Flat,
                "id",
            ),
            EditMode::Report => scan(
                format!("{}/find/{id}", reports::BASE),
                "/api/raporlar/category/list",
                ListShape::Grouped { children: "raporlar" },
                "raporId",
            ),
            EditMode::Publication => scan(
                format!("{}/find/{id}", publications::BASE),
                "/api/yayinlar/list",
                ListShape::Flat,
                "yayinId",
            ),
            EditMode::Management => scan(
                format!("{}/{id}", management::BASE),
                management::BASE,
                ListShape::Flat,
                "id",
            ),
            EditMode::Corporate => Lookup::CategoryProbe { categories: &Category::PROBE_ORDER },
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditMode::ALL
            .into_iter()
            .find(|m| m.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown edit mode: {s}"))
    }
}

#[derive(Debug)]
pub enum DispatchError {
    /// Every lookup strategy came back empty.
    NotFound,
    /// The record resolved to a table the mode cannot write.
    Mismatch { mode: EditMode, table: TableKind },
    Api(ApiError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NotFound => write!(f, "Kayıt bulunamadı"),
            DispatchError::Mismatch { mode, table } => {
                write!(f, "{table} tablosu {mode} modunda düzenlenemez")
            }
            DispatchError::Api(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<ApiError> for DispatchError {
    fn from(e: ApiError) -> Self {
        if e.is_not_found() {
            DispatchError::NotFound
        } else {
            DispatchError::Api(e)
        }
    }
}

/// A record resolved for editing.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub mode: EditMode,
    pub table: TableKind,
    pub id: i64,
    pub record: Value,
}

impl Loaded {
    pub fn form_state(&self) -> FormState {
        FormState::from_record(self.table, &self.record)
    }
}

/// Find record `id` for `mode` and work out which table it belongs to.
pub async fn load(client: &ApiClient, mode: EditMode, id: i64) -> Result<Loaded, DispatchError> {
    let Found { record, category } = mode.lookup(id).run(client, id).await?;
    let record = normalize(mode, record);

    let table = match mode {
        EditMode::Corporate => record_category(&record)
            .or(category)
            .map(Category::table)
            .unwrap_or(TableKind::Corporate),
        other => other.table(),
    };
    if !mode.accepts(table) {
        return Err(DispatchError::Mismatch { mode, table });
    }
    Ok(Loaded { mode, table, id, record })
}

/// Write a validated draft back through the mode it was loaded with.
pub async fn save(client: &ApiClient, loaded: &Loaded, state: &FormState) -> Result<(), DispatchError> {
    let payload = build_payload(loaded.mode, loaded.table, state)?;
    log::info!("[dispatch] saving {} {} via {}", loaded.table, loaded.id, loaded.mode);
    payload.update(client, loaded.id).await?;
    Ok(())
}

/// Mode-specific write body. Fails when the draft's table is not one the
/// mode writes.
pub fn build_payload(mode: EditMode, table: TableKind, state: &FormState) -> Result<Payload, DispatchError> {
    if !mode.accepts(table) || state.kind() != table {
        return Err(DispatchError::Mismatch { mode, table: state.kind() });
    }
    Ok(Payload::from_state(state))
}

fn record_category(record: &Value) -> Option<Category> {
    ["KATEGORI", "kategori"]
        .iter()
        .find_map(|k| record.get(*k).and_then(Value::as_str))
        .and_then(|s| s.parse().ok())
}

/// Per-mode touch-ups before the record reaches a form.
fn normalize(mode: EditMode, record: Value) -> Value {
    let mut record = crate::resources::unwrap_envelope(record);
    if mode == EditMode::News {
        let nested = record
            .get("kategori")
            .and_then(|k| k.get("id"))
            .and_then(Value::as_i64);
        if let (Some(id), Some(map)) = (nested, record.as_object_mut()) {
            map.entry("kategoriId").or_insert(Value::from(id));
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_paths_follow_priority() {
        let cases = [
            ("/panel/etkinlikler/3/duzenle", Some(EditMode::Event)),
            ("/panel/kurumsal/yonetim/4/edit", Some(EditMode::Management)),
            ("/panel/haberler/5/duzenle", Some(EditMode::News)),
            ("/panel/hizmetler/6/duzenle", Some(EditMode::Service)),
            ("/panel/raporlar/7/duzenle", Some(EditMode::Report)),
            ("/panel/yayinlar/8/duzenle", Some(EditMode::Publication)),
            ("/panel/kurumsal/BMVI/9/edit", Some(EditMode::Corporate)),
            ("/panel/duyurular/1", None),
        ];
        for (path, want) in cases {
            assert_eq!(EditMode::infer_from_path(path), want, "{path}");
        }
    }

    #[test]
    fn mode_slugs_parse_back() {
        for mode in EditMode::ALL {
            assert_eq!(mode.slug().parse::<EditMode>(), Ok(mode));
        }
        assert!("kurumsal".parse::<EditMode>().is_err());
    }

    #[test]
    fn corporate_mode_writes_both_corporate_tables_only() {
        assert!(EditMode::Corporate.accepts(TableKind::EthicsMediation));
        assert!(!EditMode::Corporate.accepts(TableKind::ManagementChart));
        assert!(!EditMode::Event.accepts(TableKind::News));
    }

    #[test]
    fn cross_mode_payload_is_refused() {
        let state = FormState::empty(TableKind::News);
        let err = build_payload(EditMode::Event, TableKind::Event, &state).unwrap_err();
        assert!(matches!(err, DispatchError::Mismatch { table: TableKind::News, .. }));
    }

    #[test]
    fn news_category_is_flattened() {
        let record = normalize(EditMode::News, json!({"id": 1, "kategori": {"id": 4, "ad": "Kültür"}}));
        assert_eq!(record["kategoriId"], 4);
    }

    #[test]
    fn record_category_reads_either_case() {
        assert_eq!(record_category(&json!({"KATEGORI": "vizyon"})), Some(Category::Vizyon));
        assert_eq!(record_category(&json!({"kategori": "etik"})), Some(Category::Etik));
        assert_eq!(record_category(&json!({"kategori": "eskibaskan"})), None);
    }
}
