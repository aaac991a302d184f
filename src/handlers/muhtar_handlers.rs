//! Neighbourhood heads (muhtarlar).

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::Value;

use super::records::{self, FormData, ListSpec, permission};
use crate::api::ApiError;
use crate::auth::session::{api_client, require_permission};
use crate::errors::AppError;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::TableKind;
use crate::resources::muhtars::{self, Muhtar};
use crate::state::AppState;

const KIND: TableKind = TableKind::Muhtar;
const LIST_URL: &str = "/panel/kurumsal/muhtarlar";

impl Listable for Muhtar {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.ad.as_str(),
            self.soyad.as_str(),
            self.mahalle.as_str(),
            self.eposta.as_str(),
            self.telefon.as_str(),
        ]
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "adSoyad" => SortValue::text(&self.full_name()),
            "mahalle" => SortValue::text(&self.mahalle),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_name(),
            self.mahalle.clone(),
            self.telefon.clone(),
            self.eposta.clone(),
        ]
    }
}

static SPEC: ListSpec = ListSpec {
    kind: KIND,
    title: "Muhtarlar",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("adSoyad", "Ad Soyad"),
        ColumnDef::new("mahalle", "Mahalle"),
        ColumnDef::new("telefon", "Telefon"),
        ColumnDef::new("eposta", "E-posta"),
    ],
    default_sort: "mahalle",
    show_dates: false,
    status_options: &[],
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url,
};

fn edit_url(id: i64) -> String {
    format!("{LIST_URL}/{id}/edit")
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(KIND, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, LIST_URL)?;
    let fetched = muhtars::list(&client).await;
    records::render_list(ctx, &SPEC, fetched, &query)
}

pub async fn new_form(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(KIND, &state, &session).await
}

pub async fn create(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::create(KIND, &state, &session, &form).await
}

async fn fetch(state: &AppState, session: &Session, id: i64) -> Result<Result<Value, ApiError>, AppError> {
    let client = api_client(session, &state.api)?;
    Ok(muhtars::get(&client, id)
        .await
        .and_then(|m| serde_json::to_value(m).map_err(Into::into)))
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
        muhtars::delete(&client, id).await
    })
    .await
}

pub async fn bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&SPEC, &state, &session, &form, |client, _, id| async move {
        muhtars::delete(&client, id).await
    })
    .await
}
