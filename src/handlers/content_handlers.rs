//! News, events and city services. Lists, create and delete live here;
//! editing goes through the dispatcher at `/panel/edit/{mode}/{id}`.

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
use crate::resources::city_services::{self, CityService};
use crate::resources::events::{self, Event};
use crate::resources::news::{self, News};
use crate::state::AppState;

impl Listable for News {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.baslik.as_str(),
            self.aciklama.as_str(),
            self.kategori.as_ref().map(|k| k.ad.as_str()).unwrap_or(""),
        ]
    }

    fn date(&self) -> Option<NaiveDate> {
        dates::parse_date(&self.tarih)
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "baslik" => SortValue::text(&self.baslik),
            "kategori" => SortValue::text(self.kategori.as_ref().map(|k| k.ad.as_str()).unwrap_or("")),
            "tarih" => SortValue::date(&self.tarih),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.baslik.clone(),
            self.kategori.as_ref().map(|k| k.ad.clone()).unwrap_or_default(),
            dates::display(&self.tarih),
        ]
    }
}

impl Listable for Event {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.baslik.as_str(), self.aciklama.as_str()]
    }

    fn date(&self) -> Option<NaiveDate> {
        dates::parse_date(&self.tarih)
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "baslik" => SortValue::text(&self.baslik),
            "tarih" => SortValue::date(&self.tarih),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.baslik.clone(), dates::display(&self.tarih)]
    }
}

impl Listable for CityService {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.baslik.as_str(),
            self.kategori.as_str(),
            self.konum.as_str(),
            self.telefon.as_str(),
        ]
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "baslik" => SortValue::text(&self.baslik),
            "kategori" => SortValue::text(&self.kategori),
            "telefon" => SortValue::text(&self.telefon),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.baslik.clone(),
            self.kategori.clone(),
            self.telefon.clone(),
        ]
    }
}

static NEWS: ListSpec = ListSpec {
    kind: TableKind::News,
    title: "Haberler",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("baslik", "Başlık"),
        ColumnDef::new("kategori", "Kategori"),
        ColumnDef::new("tarih", "Tarih"),
    ],
    default_sort: "tarih",
    show_dates: true,
    status_options: &[],
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url: news_edit_url,
};

static EVENTS: ListSpec = ListSpec {
    kind: TableKind::Event,
    title: "Etkinlikler",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("baslik", "Başlık"),
        ColumnDef::new("tarih", "Tarih"),
    ],
    default_sort: "tarih",
    show_dates: true,
    status_options: &[],
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url: event_edit_url,
};

static SERVICES: ListSpec = ListSpec {
    kind: TableKind::CityService,
    title: "Hizmetler",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("baslik", "Başlık"),
        ColumnDef::new("kategori", "Kategori"),
        ColumnDef::new("telefon", "Telefon"),
    ],
    default_sort: "baslik",
    show_dates: false,
    status_options: &[],
    bulk_actions: &[("delete", "Seçilenleri sil")],
    creatable: true,
    deletable: true,
    edit_url: service_edit_url,
};

fn news_edit_url(id: i64) -> String {
    EditMode::News.edit_url(id)
}

fn event_edit_url(id: i64) -> String {
    EditMode::Event.edit_url(id)
}

fn service_edit_url(id: i64) -> String {
    EditMode::Service.edit_url(id)
}

// ---------- news ----------

pub async fn news_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::News, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/haberler")?;
    let fetched = news::list(&client).await;
    records::render_list(ctx, &NEWS, fetched, &query)
}

pub async fn news_new(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(TableKind::News, &state, &session).await
}

pub async fn news_create(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::create(TableKind::News, &state, &session, &form).await
}

pub async fn news_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(TableKind::News, &state, &session, &form, |client| async move {
        news::delete(&client, id).await
    })
    .await
}

pub async fn news_bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&NEWS, &state, &session, &form, |client, _, id| async move {
        news::delete(&client, id).await
    })
    .await
}

// ---------- events ----------

pub async fn event_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::Event, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/etkinlikler")?;
    let fetched = events::list(&client).await;
    records::render_list(ctx, &EVENTS, fetched, &query)
}

pub async fn event_new(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(TableKind::Event, &state, &session).await
}

pub async fn event_create(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::create(TableKind::Event, &state, &session, &form).await
}

pub async fn event_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(TableKind::Event, &state, &session, &form, |client| async move {
        events::delete(&client, id).await
    })
    .await
}

pub async fn event_bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&EVENTS, &state, &session, &form, |client, _, id| async move {
        events::delete(&client, id).await
    })
    .await
}

// ---------- city services ----------

pub async fn service_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::CityService, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/hizmetler")?;
    let fetched = city_services::list(&client).await;
    records::render_list(ctx, &SERVICES, fetched, &query)
}

pub async fn service_new(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(TableKind::CityService, &state, &session).await
}

pub async fn service_create(
    state: web::Data<AppState>,
    session: Session,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    records::create(TableKind::CityService, &state, &session, &form).await
}

pub async fn service_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(TableKind::CityService, &state, &session, &form, |client| async move {
        city_services::delete(&client, id).await
    })
    .await
}

pub async fn service_bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&SERVICES, &state, &session, &form, |client, _, id| async move {
        city_services::delete(&client, id).await
    })
    .await
}
