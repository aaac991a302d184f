use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde_json::Value;

use super::records::{self, FormData, ListSpec, permission};
use crate::auth::session::require_permission;
use crate::errors::AppError;
use crate::form::dates;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::TableKind;
use crate::resources::announcements::{self, Announcement, STATUS_OPTIONS};
use crate::state::AppState;

const KIND: TableKind = TableKind::Announcement;

impl Listable for Announcement {
    fn id(&self) -> i64 {
        self.id.unwrap_or(0)
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.baslik.as_str(), self.icerik.as_str(), self.olusturan_kullanici.as_str()]
    }

    fn date(&self) -> Option<NaiveDate> {
        self.olusturma_tarihi.as_deref().and_then(dates::parse_date)
    }

    fn status(&self) -> Option<&str> {
        Some(self.durum.as_str())
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "baslik" => SortValue::text(&self.baslik),
            "durum" => SortValue::text(&self.durum),
            "olusturanKullanici" => SortValue::text(&self.olusturan_kullanici),
            "olusturmaTarihi" => SortValue::date(self.olusturma_tarihi.as_deref().unwrap_or("")),
            _ => SortValue::Number(Listable::id(self)),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            Listable::id(self).to_string(),
            self.baslik.clone(),
            self.durum.clone(),
            self.olusturan_kullanici.clone(),
            dates::display(self.olusturma_tarihi.as_deref().unwrap_or("")),
        ]
    }
}

static SPEC: ListSpec = ListSpec {
    kind: KIND,
    title: "Duyurular",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("baslik", "Başlık"),
        ColumnDef::new("durum", "Durum"),
        ColumnDef::new("olusturanKullanici", "Oluşturan"),
        ColumnDef::new("olusturmaTarihi", "Tarih"),
    ],
    default_sort: "olusturmaTarihi",
    show_dates: true,
    status_options: STATUS_OPTIONS,
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url,
};

fn edit_url(id: i64) -> String {
    format!("/panel/duyurular/{id}/edit")
}

/// Status and search narrow the fetch on the backend when given; the
/// in-memory view then applies the remaining filters.
pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(KIND, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/duyurular")?;

    let fetched = match (query.status_filter(), query.search()) {
        (Some(durum), Some(q)) => announcements::by_status_and_search(&client, durum, q).await,
        (Some(durum), None) => announcements::by_status(&client, durum).await,
        (None, Some(q)) => announcements::search(&client, q).await,
        (None, None) => announcements::list(&client).await,
    };
    records::render_list(ctx, &SPEC, fetched, &query)
}

pub async fn new_form(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(KIND, &state, &session).await
}

pub async fn create(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::create(KIND, &state, &session, &form).await
}

async fn fetch(state: &AppState, session: &Session, id: i64) -> Result<Result<Value, crate::api::ApiError>, AppError> {
    let client = crate::auth::session::api_client(session, &state.api)?;
    Ok(announcements::get(&client, id)
        .await
        .and_then(|a| serde_json::to_value(a).map_err(Into::into)))
}

pub async fn edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fetched = fetch(&state, &session, id).await?;
    records::edit_form(KIND, id, &state, &session, fetched).await
}

pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fetched = fetch(&state, &session, id).await?;
    records::update(KIND, id, &state, &session, &form, fetched).await
}

pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(KIND, &state, &session, &form, |client| async move {
        announcements::delete(&client, id).await
    })
    .await
}

pub async fn bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&SPEC, &state, &session, &form, |client, _, id| async move {
        announcements::delete(&client, id).await
    })
    .await
}
