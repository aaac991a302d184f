//! Publications and reports: both are documents grouped in backend categories.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;

use super::records::{self, FormData, ListSpec, permission};
use crate::auth::session::require_permission;
use crate::dispatch::EditMode;
use crate::errors::AppError;
use crate::form::dates;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::TableKind;
use crate::resources::publications::{self, Publication};
use crate::resources::reports::{self, Report};
use crate::state::AppState;

const REPORT_STATES: &[&str] = &["Aktif", "Pasif"];

impl Listable for Publication {
    fn id(&self) -> i64 {
        self.yayin_id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.yayin_baslik.as_str(),
            self.description.as_str(),
            self.category_name.as_deref().unwrap_or(""),
        ]
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "yayinBaslik" => SortValue::text(&self.yayin_baslik),
            "categoryName" => SortValue::text(self.category_name.as_deref().unwrap_or("")),
            _ => SortValue::Number(self.yayin_id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.yayin_id.to_string(),
            self.yayin_baslik.clone(),
            self.category_name
                .clone()
                .unwrap_or_else(|| self.category_id.to_string()),
            self.yayin_url.clone(),
        ]
    }
}

fn report_state(active: bool) -> &'static str {
    if active { REPORT_STATES[0] } else { REPORT_STATES[1] }
}

impl Listable for Report {
    fn id(&self) -> i64 {
        self.rapor_id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.rapor_baslik.as_str(),
            self.category_name.as_deref().unwrap_or(""),
        ]
    }

    fn date(&self) -> Option<NaiveDate> {
        self.rapor_tarihi.as_deref().and_then(dates::parse_date)
    }

    fn status(&self) -> Option<&str> {
        Some(report_state(self.rapor_durum))
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "raporBaslik" => SortValue::text(&self.rapor_baslik),
            "categoryName" => SortValue::text(self.category_name.as_deref().unwrap_or("")),
            "raporTarihi" => SortValue::date(self.rapor_tarihi.as_deref().unwrap_or("")),
            "raporDurum" => SortValue::Number(i64::from(self.rapor_durum)),
            _ => SortValue::Number(self.rapor_id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rapor_id.to_string(),
            self.rapor_baslik.clone(),
            self.category_name.clone().unwrap_or_default(),
            dates::display(self.rapor_tarihi.as_deref().unwrap_or("")),
            report_state(self.rapor_durum).to_string(),
        ]
    }
}

static PUBLICATIONS: ListSpec = ListSpec {
    kind: TableKind::Publication,
    title: "Yayınlar",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("yayinBaslik", "Başlık"),
        ColumnDef::new("categoryName", "Kategori"),
        ColumnDef::fixed("yayinUrl", "Dosya"),
    ],
    default_sort: "id",
    show_dates: false,
    status_options: &[],
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url: publication_edit_url,
};

static REPORTS: ListSpec = ListSpec {
    kind: TableKind::Report,
    title: "Raporlar",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("raporBaslik", "Başlık"),
        ColumnDef::new("categoryName", "Kategori"),
        ColumnDef::new("raporTarihi", "Tarih"),
        ColumnDef::new("raporDurum", "Durum"),
    ],
    default_sort: "raporTarihi",
    show_dates: true,
    status_options: REPORT_STATES,
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url: report_edit_url,
};

fn publication_edit_url(id: i64) -> String {
    EditMode::Publication.edit_url(id)
}

fn report_edit_url(id: i64) -> String {
    EditMode::Report.edit_url(id)
}

pub async fn publication_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::Publication, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/yayinlar")?;
    let fetched = publications::list(&client).await;
    records::render_list(ctx, &PUBLICATIONS, fetched, &query)
}

pub async fn publication_new(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(TableKind::Publication, &state, &session).await
}

pub async fn publication_create(
    state: web::Data<AppState>,
    session: Session,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    records::create(TableKind::Publication, &state, &session, &form).await
}

pub async fn publication_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(TableKind::Publication, &state, &session, &form, |client| async move {
        publications::delete(&client, id).await
    })
    .await
}

pub async fn publication_bulk(
    state: web::Data<AppState>,
    session: Session,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    records::bulk(&PUBLICATIONS, &state, &session, &form, |client, _, id| async move {
        publications::delete(&client, id).await
    })
    .await
}

/// Reports arrive grouped by category and are flattened for the table.
pub async fn report_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::Report, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/raporlar")?;
    let fetched = reports::list(&client).await;
    records::render_list(ctx, &REPORTS, fetched, &query)
}

pub async fn report_new(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(TableKind::Report, &state, &session).await
}

pub async fn report_create(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::create(TableKind::Report, &state, &session, &form).await
}

pub async fn report_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(TableKind::Report, &state, &session, &form, |client| async move {
        reports::delete(&client, id).await
    })
    .await
}

pub async fn report_bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&REPORTS, &state, &session, &form, |client, _, id| async move {
        reports::delete(&client, id).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_state_feeds_the_status_filter() {
        let r = Report { rapor_id: 1, rapor_durum: true, ..Report::default() };
        assert_eq!(r.status(), Some("Aktif"));
        assert_eq!(Report::default().status(), Some("Pasif"));
    }
}
