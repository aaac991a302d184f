//! Static field-configuration registry.
//!
//! Every editable backend resource is a [`TableKind`] variant carrying a
//! `&'static` [`TableConfig`]. Lookups inside the crate go through the enum,
//! so a misspelled key can only fail at the string boundary (`from_key`).

use std::fmt;
use std::str::FromStr;

mod tables;

/// Input widget family of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    /// Rich text. Stored and previewed as HTML.
    Editor,
    /// Image URL, with an upload helper next to the input.
    Image,
    Select,
    Number,
    Date,
    Boolean,
    /// Write-only secret. Never prefilled; blank means unchanged.
    Password,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Editor => "editor",
            FieldKind::Image => "image",
            FieldKind::Select => "select",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Boolean => "boolean",
            FieldKind::Password => "password",
        }
    }
}

/// Where a select field gets its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    Fixed(&'static [&'static str]),
    /// Loaded from the backend when the form is rendered.
    PublicationCategories,
    ReportCategories,
    NewsCategories,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Option<OptionSource>,
    pub placeholder: Option<&'static str>,
    pub max_length: Option<usize>,
}

impl FieldConfig {
    pub(crate) const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: None,
            placeholder: None,
            max_length: None,
        }
    }

    pub(crate) const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(crate) const fn options(mut self, source: OptionSource) -> Self {
        self.options = Some(source);
        self
    }

    pub(crate) const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    pub(crate) const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }
}

#[derive(Debug)]
pub struct TableConfig {
    pub table_name: &'static str,
    pub display_name: &'static str,
    pub api_endpoint: &'static str,
    /// Key of the record id inside the backend JSON.
    pub id_field: &'static str,
    pub fields: &'static [FieldConfig],
}

impl TableConfig {
    pub fn field(&self, name: &str) -> Option<&'static FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldConfig> {
        self.fields.iter().filter(|f| f.required)
    }

    /// The record's own key is shown but never edited.
    pub fn is_identity(&self, field: &FieldConfig) -> bool {
        field.name == self.id_field
    }
}

/// Closed set of editable resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Corporate,
    ManagementChart,
    EthicsMediation,
    Event,
    News,
    CityService,
    Report,
    Publication,
    Announcement,
    Complaint,
    User,
    Directorate,
    Muhtar,
}

impl TableKind {
    pub const ALL: [TableKind; 13] = [
        TableKind::Corporate,
        TableKind::ManagementChart,
        TableKind::EthicsMediation,
        TableKind::Event,
        TableKind::News,
        TableKind::CityService,
        TableKind::Report,
        TableKind::Publication,
        TableKind::Announcement,
        TableKind::Complaint,
        TableKind::User,
        TableKind::Directorate,
        TableKind::Muhtar,
    ];

    pub fn config(self) -> &'static TableConfig {
        match self {
            TableKind::Corporate => &tables::CORPORATE,
            TableKind::ManagementChart => &tables::MANAGEMENT_CHART,
            TableKind::EthicsMediation => &tables::ETHICS_MEDIATION,
            TableKind::Event => &tables::EVENT,
            TableKind::News => &tables::NEWS,
            TableKind::CityService => &tables::CITY_SERVICE,
            TableKind::Report => &tables::REPORT,
            TableKind::Publication => &tables::PUBLICATION,
            TableKind::Announcement => &tables::ANNOUNCEMENT,
            TableKind::Complaint => &tables::COMPLAINT,
            TableKind::User => &tables::USER,
            TableKind::Directorate => &tables::DIRECTORATE,
            TableKind::Muhtar => &tables::MUHTAR,
        }
    }

    /// Parse a table key. Case-insensitive, matching the backend's mix of
    /// `KURUMSAL_YONETIM_SEMASI` and `kurumsal_yonetim_semasi`.
    pub fn from_key(key: &str) -> Option<TableKind> {
        TableKind::ALL
            .into_iter()
            .find(|k| k.config().table_name.eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().table_name)
    }
}

/// Categories of the shared corporate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Baskan,
    Misyon,
    Vizyon,
    Ilkelerimiz,
    Etik,
    Arabuluculuk,
    Yonetim,
}

impl Category {
    /// Fixed probe order used when a corporate record's category is unknown.
    pub const PROBE_ORDER: [Category; 4] = [
        Category::Baskan,
        Category::Misyon,
        Category::Vizyon,
        Category::Ilkelerimiz,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Baskan => "baskan",
            Category::Misyon => "misyon",
            Category::Vizyon => "vizyon",
            Category::Ilkelerimiz => "ilkelerimiz",
            Category::Etik => "etik",
            Category::Arabuluculuk => "arabuluculuk",
            Category::Yonetim => "yonetim",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Baskan => "Başkan",
            Category::Misyon => "Misyon",
            Category::Vizyon => "Vizyon",
            Category::Ilkelerimiz => "İlkelerimiz",
            Category::Etik => "Etik",
            Category::Arabuluculuk => "Arabuluculuk",
            Category::Yonetim => "Yönetim",
        }
    }

    pub fn table(self) -> TableKind {
        match self {
            Category::Baskan | Category::Misyon | Category::Vizyon | Category::Ilkelerimiz => {
                TableKind::Corporate
            }
            Category::Etik | Category::Arabuluculuk => TableKind::EthicsMediation,
            Category::Yonetim => TableKind::ManagementChart,
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baskan" => Ok(Category::Baskan),
            "misyon" => Ok(Category::Misyon),
            "vizyon" => Ok(Category::Vizyon),
            "ilkelerimiz" => Ok(Category::Ilkelerimiz),
            "etik" => Ok(Category::Etik),
            "arabuluculuk" => Ok(Category::Arabuluculuk),
            "yonetim" => Ok(Category::Yonetim),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_table_has_a_required_field() {
        for kind in TableKind::ALL {
            assert!(
                kind.config().required_fields().next().is_some(),
                "{kind} has no required field"
            );
        }
    }

    #[test]
    fn table_keys_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for kind in TableKind::ALL {
            let key = kind.config().table_name;
            assert!(seen.insert(key.to_lowercase()), "duplicate key {key}");
            assert_eq!(TableKind::from_key(key), Some(kind));
        }
        assert_eq!(TableKind::from_key("kurumsal_yonetim_semasi"), Some(TableKind::ManagementChart));
        assert_eq!(TableKind::from_key("NO_SUCH_TABLE"), None);
    }

    #[test]
    fn field_names_are_unique_per_table() {
        for kind in TableKind::ALL {
            let mut names = HashSet::new();
            for f in kind.config().fields {
                assert!(names.insert(f.name), "{kind}: duplicate field {}", f.name);
            }
        }
    }

    #[test]
    fn select_fields_declare_options() {
        for kind in TableKind::ALL {
            for f in kind.config().fields {
                assert_eq!(
                    f.kind == FieldKind::Select,
                    f.options.is_some(),
                    "{kind}.{} options mismatch",
                    f.name
                );
            }
        }
    }

    #[test]
    fn identity_is_the_declared_id_field() {
        let report = TableKind::Report.config();
        assert!(report.is_identity(report.field("raporId").unwrap()));
        assert!(!report.is_identity(report.field("categoryId").unwrap()));
        let publication = TableKind::Publication.config();
        assert!(publication.is_identity(publication.field("yayinId").unwrap()));
        for kind in TableKind::ALL {
            let config = kind.config();
            assert_eq!(config.fields.iter().filter(|f| config.is_identity(f)).count(), 1, "{kind}");
        }
    }

    #[test]
    fn categories_map_to_tables() {
        assert_eq!(Category::Misyon.table(), TableKind::Corporate);
        assert_eq!(Category::Arabuluculuk.table(), TableKind::EthicsMediation);
        assert_eq!(Category::Yonetim.table(), TableKind::ManagementChart);
        assert_eq!("VIZYON".parse::<Category>(), Ok(Category::Vizyon));
        assert!("eskibaskan".parse::<Category>().is_err());
    }
}
