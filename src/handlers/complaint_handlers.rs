use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde_json::Value;

use super::records::{self, FormData, ListSpec, fixed_options, permission, redirect};
use crate::api::ApiError;
use crate::auth::session::{api_client, get_display_name, get_username, require_permission, set_flash};
use crate::auth::validate::validate_required;
use crate::errors::{AppError, inline, render};
use crate::form::dates;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::TableKind;
use crate::resources::complaints::{self, Complaint, PRIORITY_OPTIONS, STATUS_OPTIONS};
use crate::state::AppState;
use crate::templates_structs::{ComplaintDetailTemplate, ComplaintView, PageContext};

const KIND: TableKind = TableKind::Complaint;
const REPLY_MAX: usize = 4000;
const LIST: &str = "/panel/sikayetler";

impl Listable for Complaint {
    fn id(&self) -> i64 {
        self.id.unwrap_or(0)
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.ad_soyad.as_str(),
            self.konu.as_str(),
            self.mesaj.as_str(),
            self.e_mail.as_deref().unwrap_or(""),
            self.kategori.as_deref().unwrap_or(""),
        ]
    }

    fn date(&self) -> Option<NaiveDate> {
        self.olusturma_tarihi.as_deref().and_then(dates::parse_date)
    }

    fn status(&self) -> Option<&str> {
        self.durum.as_deref()
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "adSoyad" => SortValue::text(&self.ad_soyad),
            "konu" => SortValue::text(&self.konu),
            "kategori" => SortValue::text(self.kategori.as_deref().unwrap_or("")),
            "oncelik" => SortValue::Number(priority_rank(self.oncelik.as_deref())),
            "durum" => SortValue::text(self.durum.as_deref().unwrap_or("")),
            "olusturmaTarihi" => SortValue::date(self.olusturma_tarihi.as_deref().unwrap_or("")),
            _ => SortValue::Number(Listable::id(self)),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            Listable::id(self).to_string(),
            self.ad_soyad.clone(),
            self.konu.clone(),
            self.kategori.clone().unwrap_or_default(),
            self.oncelik.clone().unwrap_or_default(),
            self.durum.clone().unwrap_or_default(),
            dates::display(self.olusturma_tarihi.as_deref().unwrap_or("")),
        ]
    }
}

/// Priorities sort by urgency, not alphabetically.
fn priority_rank(oncelik: Option<&str>) -> i64 {
    oncelik
        .and_then(|p| PRIORITY_OPTIONS.iter().position(|o| *o == p))
        .map(|i| i as i64)
        .unwrap_or(-1)
}

static SPEC: ListSpec = ListSpec {
    kind: KIND,
    title: "Şikayet ve İletişim",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("adSoyad", "Ad Soyad"),
        ColumnDef::new("konu", "Konu"),
        ColumnDef::new("kategori", "Kategori"),
        ColumnDef::new("oncelik", "Öncelik"),
        ColumnDef::new("durum", "Durum"),
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
    format!("/panel/sikayetler/{id}")
}

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(KIND, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/sikayetler")?;

    let fetched = match (query.status_filter(), query.search()) {
        (Some(durum), Some(q)) => complaints::by_status_and_search(&client, durum, q).await,
        (Some(durum), None) => complaints::by_status(&client, durum).await,
        (None, Some(q)) => complaints::search(&client, q).await,
        (None, None) => complaints::list(&client).await,
    };
    records::render_list(ctx, &SPEC, fetched, &query)
}

fn view(c: &Complaint) -> ComplaintView {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    ComplaintView {
        id: c.id.unwrap_or(0),
        ad_soyad: c.ad_soyad.clone(),
        e_mail: text(&c.e_mail),
        telefon: text(&c.telefon),
        konu: c.konu.clone(),
        mesaj: c.mesaj.clone(),
        kategori: text(&c.kategori),
        adres: [c.adres.as_deref(), c.mahalle.as_deref(), c.ilce.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        olusturma_tarihi: dates::display(c.olusturma_tarihi.as_deref().unwrap_or("")),
        yanit: text(&c.yanit),
        yanitlayan_personel: text(&c.yanitlayan_personel),
        yanit_tarihi: dates::display(c.yanit_tarihi.as_deref().unwrap_or("")),
        answered: c.is_answered(),
    }
}

fn render_detail(ctx: PageContext, complaint: &Complaint, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    render(ComplaintDetailTemplate {
        ctx,
        complaint: view(complaint),
        status_options: fixed_options(STATUS_OPTIONS, complaint.durum.as_deref().unwrap_or("")),
        priority_options: fixed_options(PRIORITY_OPTIONS, complaint.oncelik.as_deref().unwrap_or("")),
        errors,
    })
}

async fn load(client: &crate::api::ApiClient, session: &Session, id: i64) -> Result<Option<Complaint>, AppError> {
    match complaints::get(client, id).await {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.is_not_found() => Err(AppError::NotFound),
        Err(e) => {
            set_flash(session, inline(e)?);
            Ok(None)
        }
    }
}

/// GET `/panel/sikayetler/{id}`: the message, its reply and the triage controls.
pub async fn detail(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(KIND, "goruntuleme"))?;
    let id = path.into_inner();
    let client = api_client(&session, &state.api)?;
    let Some(complaint) = load(&client, &session, id).await? else {
        return Ok(redirect(LIST));
    };
    let ctx = PageContext::build(&session, &state.app_name, LIST)?;
    render_detail(ctx, &complaint, vec![])
}

/// POST `/panel/sikayetler/{id}/reply`. The reply is signed with the
/// logged-in user's name.
pub async fn reply(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(KIND, "duzenleme"))?;
    records::check_csrf(&session, &form)?;
    let id = path.into_inner();
    let client = api_client(&session, &state.api)?;
    let text = form.get("yanit").map(|s| s.trim()).unwrap_or("");

    let mut errors: Vec<String> = validate_required(text, "Yanıt", REPLY_MAX).into_iter().collect();
    if errors.is_empty() {
        let staff = get_display_name(&session)
            .or_else(|| get_username(&session).ok())
            .unwrap_or_default();
        match complaints::reply(&client, id, text, &staff).await {
            Ok(_) => {
                log::info!("[complaints] replied to {id}");
                set_flash(&session, "Yanıt gönderildi.");
                return Ok(redirect(&edit_url(id)));
            }
            Err(e) => errors.push(inline(e)?),
        }
    }

    let Some(mut complaint) = load(&client, &session, id).await? else {
        return Ok(redirect(LIST));
    };
    complaint.yanit = Some(text.to_string());
    let ctx = PageContext::build(&session, &state.app_name, LIST)?;
    render_detail(ctx, &complaint, errors)
}

/// Shared body of the status and priority updates: the value must be one
/// of the fixed options.
async fn set_field<F, Fut>(
    state: &AppState,
    session: &Session,
    id: i64,
    form: &std::collections::HashMap<String, String>,
    key: &str,
    allowed: &[&str],
    call: F,
) -> Result<HttpResponse, AppError>
where
    F: FnOnce(crate::api::ApiClient, String) -> Fut,
    Fut: std::future::Future<Output = Result<Complaint, ApiError>>,
{
    require_permission(session, &permission(KIND, "duzenleme"))?;
    records::check_csrf(session, form)?;
    let value = form.get(key).map(|s| s.trim()).unwrap_or("");
    if !allowed.contains(&value) {
        set_flash(session, "Geçersiz seçim.");
        return Ok(redirect(&edit_url(id)));
    }
    let client = api_client(session, &state.api)?;
    match call(client, value.to_string()).await {
        Ok(_) => set_flash(session, "Şikayet güncellendi."),
        Err(e) => set_flash(session, inline(e)?),
    }
    Ok(redirect(&edit_url(id)))
}

pub async fn update_status(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    set_field(&state, &session, id, &form, "durum", STATUS_OPTIONS, |client, v| async move {
        complaints::update_status(&client, id, &v).await
    })
    .await
}

pub async fn update_priority(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    set_field(&state, &session, id, &form, "oncelik", PRIORITY_OPTIONS, |client, v| async move {
        complaints::update_priority(&client, id, &v).await
    })
    .await
}

pub async fn new_form(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    records::new_form(KIND, &state, &session).await
}

pub async fn create(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::create(KIND, &state, &session, &form).await
}

async fn fetch(state: &AppState, session: &Session, id: i64) -> Result<Result<Value, ApiError>, AppError> {
    let client = api_client(session, &state.api)?;
    Ok(complaints::get(&client, id)
        .await
        .and_then(|c| serde_json::to_value(c).map_err(Into::into)))
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
        complaints::delete(&client, id).await
    })
    .await
}

pub async fn bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&SPEC, &state, &session, &form, |client, _, id| async move {
        complaints::delete(&client, id).await
    })
    .await
}
