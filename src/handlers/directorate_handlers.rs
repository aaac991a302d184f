//! Directorates (müdürlükler): list with bulk delete, create, edit.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::Value;

use super::records::{self, FormData, ListSpec, permission};
use crate::api::ApiError;
use crate::auth::session::{api_client, require_permission};
use crate::errors::AppError;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::TableKind;
use crate::resources::directorates::{self, Directorate};
use crate::state::AppState;

const KIND: TableKind = TableKind::Directorate;
const LIST_URL: &str = "/panel/kurumsal/mudurlukler";

impl Listable for Directorate {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.manager_name.as_str(), self.email.as_str()]
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "name" => SortValue::text(&self.name),
            "managerName" => SortValue::text(&self.manager_name),
            "email" => SortValue::text(&self.email),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.manager_name.clone(),
            self.email.clone(),
        ]
    }
}

static SPEC: ListSpec = ListSpec {
    kind: KIND,
    title: "Müdürlükler",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("name", "Müdürlük"),
        ColumnDef::new("managerName", "Yönetici"),
        ColumnDef::new("email", "E-posta"),
    ],
    default_sort: "name",
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
    let fetched = directorates::list(&client).await;
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
    Ok(directorates::get(&client, id)
        .await
        .and_then(|d| serde_json::to_value(d).map_err(Into::into)))
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
        directorates::delete(&client, id).await
    })
    .await
}

pub async fn bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&SPEC, &state, &session, &form, |client, _, id| async move {
        directorates::delete(&client, id).await
    })
    .await
}
