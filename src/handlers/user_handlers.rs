use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::Value;

use super::records::{self, FormData, ListSpec, permission};
use crate::api::ApiError;
use crate::auth::session::{api_client, require_permission};
use crate::errors::AppError;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::TableKind;
use crate::resources::users::{self, STATUS_OPTIONS, User};
use crate::state::AppState;

const KIND: TableKind = TableKind::User;

impl Listable for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.isim.as_str(), self.tcno.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "isim" => SortValue::text(&self.isim),
            "tcno" => SortValue::text(&self.tcno),
            "status" => SortValue::text(&self.status),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.isim.clone(),
            mask_tc_no(&self.tcno),
            self.status.clone(),
        ]
    }
}

/// Only the last four digits of a national id are shown in tables.
fn mask_tc_no(tcno: &str) -> String {
    let n = tcno.chars().count();
    if n <= 4 {
        return tcno.to_string();
    }
    let tail: String = tcno.chars().skip(n - 4).collect();
    format!("{}{tail}", "•".repeat(n - 4))
}

static SPEC: ListSpec = ListSpec {
    kind: KIND,
    title: "Kullanıcılar",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("isim", "İsim"),
        ColumnDef::new("tcno", "TC Kimlik No"),
        ColumnDef::new("status", "Durum"),
    ],
    default_sort: "isim",
    show_dates: false,
    status_options: STATUS_OPTIONS,
    bulk_actions: &[],
    creatable: true,
    deletable: true,
    edit_url,
};

fn edit_url(id: i64) -> String {
    format!("/panel/users/{id}/edit")
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(KIND, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/users")?;
    let fetched = users::list(&client).await;
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
    Ok(users::get(&client, id)
        .await
        .and_then(|u| serde_json::to_value(u).map_err(Into::into)))
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
        users::delete(&client, id).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tc_no_is_masked_in_tables() {
        assert_eq!(mask_tc_no("12345678901"), "•••••••8901");
        assert_eq!(mask_tc_no("123"), "123");
    }
}
