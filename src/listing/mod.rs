//! In-memory filtering, sorting and paging of a fetched collection.
//!
//! List pages fetch the whole collection on every request, then derive the
//! view here: search, date range, status, two-key sort, page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::dates;

pub mod bulk;

pub const DEFAULT_PER_PAGE: i64 = 25;

/// Sortable value of one column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Missing,
    Number(i64),
    Date(NaiveDate),
    Text(String),
}

impl SortValue {
    pub fn text(s: &str) -> Self {
        if s.trim().is_empty() {
            SortValue::Missing
        } else {
            SortValue::Text(s.to_lowercase())
        }
    }

    pub fn date(s: &str) -> Self {
        dates::parse_date(s).map_or(SortValue::Missing, SortValue::Date)
    }
}

/// A row type a list page can derive a view over.
pub trait Listable {
    fn id(&self) -> i64;

    /// Texts the search box matches against.
    fn haystack(&self) -> Vec<&str>;

    /// Value used by the date-range filter.
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Value used by the exact status filter.
    fn status(&self) -> Option<&str> {
        None
    }

    fn sort_value(&self, column: &str) -> SortValue;

    /// Display cells, aligned with the page's columns.
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    pub column: String,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        SortSpec {
            column: sort.unwrap_or("").to_string(),
            dir: if dir == Some("desc") { SortDir::Desc } else { SortDir::Asc },
        }
    }

    pub fn dir_str(&self) -> &'static str {
        match self.dir {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn toggle_dir(&self) -> &'static str {
        match self.dir {
            SortDir::Asc => "desc",
            SortDir::Desc => "asc",
        }
    }
}

/// Column of a list table.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: true }
    }

    pub const fn fixed(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: false }
    }
}

/// Query string of every list page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ListQuery {
    pub fn search(&self) -> Option<&str> {
        present(&self.q)
    }

    pub fn status_filter(&self) -> Option<&str> {
        present(&self.status)
    }

    pub fn sort_spec(&self, default_column: &str) -> SortSpec {
        SortSpec::from_params(
            Some(present(&self.sort).unwrap_or(default_column)),
            self.dir.as_deref(),
        )
    }

    /// Link for a page or a column header, keeping the active filters.
    pub fn href(&self, base: &str, sort: Option<(&str, &str)>, page: Option<i64>) -> String {
        let mut next = self.clone();
        if let Some((column, dir)) = sort {
            next.sort = Some(column.to_string());
            next.dir = Some(dir.to_string());
            next.page = None;
        }
        if page.is_some() {
            next.page = page;
        }
        let pairs: Vec<(&str, String)> = [
            ("q", next.q),
            ("from", next.from),
            ("to", next.to),
            ("status", next.status),
            ("sort", next.sort),
            ("dir", next.dir),
            ("page", next.page.map(|p| p.to_string())),
            ("per_page", next.per_page.map(|p| p.to_string())),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v)))
        .collect();
        match serde_urlencoded::to_string(&pairs) {
            Ok(qs) if !qs.is_empty() => format!("{base}?{qs}"),
            _ => base.to_string(),
        }
    }
}

/// Header cell with its sort link.
pub struct HeaderView {
    pub label: &'static str,
    pub sortable: bool,
    pub href: String,
    pub active: bool,
    pub arrow: &'static str,
}

pub fn headers(columns: &[ColumnDef], query: &ListQuery, sort: &SortSpec, base: &str) -> Vec<HeaderView> {
    columns
        .iter()
        .map(|c| {
            let active = c.key == sort.column;
            let dir = if active { sort.toggle_dir() } else { "asc" };
            HeaderView {
                label: c.label,
                sortable: c.sortable,
                href: query.href(base, Some((c.key, dir)), None),
                active,
                arrow: match (active, &sort.dir) {
                    (false, _) => "",
                    (true, SortDir::Asc) => "▲",
                    (true, SortDir::Desc) => "▼",
                },
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl<T> ListPage<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn matches<T: Listable>(item: &T, query: &ListQuery, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if let Some(needle) = query.search() {
        let needle = needle.to_lowercase();
        if !item.haystack().iter().any(|h| h.to_lowercase().contains(&needle)) {
            return false;
        }
    }
    if let Some(status) = query.status_filter() {
        if item.status() != Some(status) {
            return false;
        }
    }
    if from.is_some() || to.is_some() {
        let Some(d) = item.date() else { return false };
        if from.is_some_and(|f| d < f) || to.is_some_and(|t| d > t) {
            return false;
        }
    }
    true
}

/// Filter, sort and page `items`.
pub fn derive<T: Listable>(items: Vec<T>, query: &ListQuery, sort: &SortSpec) -> ListPage<T> {
    let from = present(&query.from).and_then(dates::parse_date);
    let to = present(&query.to).and_then(dates::parse_date);

    let mut items: Vec<T> = items
        .into_iter()
        .filter(|i| matches(i, query, from, to))
        .collect();

    items.sort_by(|a, b| {
        let ord = a
            .sort_value(&sort.column)
            .cmp(&b.sort_value(&sort.column))
            .then_with(|| a.id().cmp(&b.id()));
        match sort.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });

    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);
    let total_count = items.len() as i64;
    let total_pages = ((total_count + per_page - 1) / per_page).max(1);
    let page = query.page.unwrap_or(1).clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .collect();

    ListPage { items, page, per_page, total_count, total_pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i64,
        title: &'static str,
        date: &'static str,
        status: &'static str,
    }

    impl Listable for Row {
        fn id(&self) -> i64 {
            self.id
        }
        fn haystack(&self) -> Vec<&str> {
            vec![self.title]
        }
        fn date(&self) -> Option<NaiveDate> {
            dates::parse_date(self.date)
        }
        fn status(&self) -> Option<&str> {
            Some(self.status)
        }
        fn sort_value(&self, column: &str) -> SortValue {
            match column {
                "date" => SortValue::date(self.date),
                _ => SortValue::text(self.title),
            }
        }
        fn cells(&self) -> Vec<String> {
            vec![self.title.to_string()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, title: "Bahar Şenliği", date: "2025-04-01", status: "AKTIF" },
            Row { id: 2, title: "Yol Çalışması", date: "2025-05-10", status: "PASIF" },
            Row { id: 3, title: "bahar konseri", date: "2025-05-20T18:00:00", status: "AKTIF" },
            Row { id: 4, title: "Su Kesintisi", date: "", status: "AKTIF" },
        ]
    }

    fn ids(page: &ListPage<Row>) -> Vec<i64> {
        page.items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let q = ListQuery { q: Some("BAHAR".into()), ..Default::default() };
        let page = derive(rows(), &q, &q.sort_spec("title"));
        assert_eq!(ids(&page), vec![3, 1]);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_undated() {
        let q = ListQuery {
            from: Some("2025-05-10".into()),
            to: Some("2025-05-20".into()),
            ..Default::default()
        };
        let page = derive(rows(), &q, &q.sort_spec("date"));
        assert_eq!(ids(&page), vec![2, 3]);
    }

    #[test]
    fn status_filter_and_desc_sort() {
        let q = ListQuery {
            status: Some("AKTIF".into()),
            sort: Some("date".into()),
            dir: Some("desc".into()),
            ..Default::default()
        };
        let page = derive(rows(), &q, &q.sort_spec("title"));
        assert_eq!(ids(&page), vec![3, 1, 4]);
    }

    #[test]
    fn ties_break_on_id() {
        let same = vec![
            Row { id: 9, title: "A", date: "", status: "" },
            Row { id: 2, title: "a", date: "", status: "" },
        ];
        let q = ListQuery::default();
        let page = derive(same, &q, &q.sort_spec("title"));
        assert_eq!(ids(&page), vec![2, 9]);
    }

    #[test]
    fn paging_clamps() {
        let q = ListQuery { per_page: Some(3), page: Some(9), ..Default::default() };
        let page = derive(rows(), &q, &q.sort_spec("title"));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn href_keeps_filters() {
        let q = ListQuery { q: Some("su".into()), page: Some(3), ..Default::default() };
        assert_eq!(
            q.href("/panel/duyurular", Some(("baslik", "desc")), None),
            "/panel/duyurular?q=su&sort=baslik&dir=desc"
        );
        assert_eq!(q.href("/panel/duyurular", None, Some(4)), "/panel/duyurular?q=su&page=4");
    }

    #[test]
    fn sort_spec_from_params() {
        let s = SortSpec::from_params(Some("baslik"), Some("desc"));
        assert_eq!(s.column, "baslik");
        assert_eq!(s.dir, SortDir::Desc);
        assert_eq!(s.toggle_dir(), "asc");
        assert_eq!(SortSpec::from_params(None, None).dir_str(), "asc");
    }
}
