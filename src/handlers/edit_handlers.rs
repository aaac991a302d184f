//! The generic edit page, `/panel/edit/{mode}/{id}`.
//!
//! The mode in the URL picks how the record is found and which write
//! endpoint receives the draft. Old per-resource edit URLs redirect here.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use super::records::{self, FormData, FormPage, Intent, intent, redirect};
use crate::auth::session::{api_client, require_permission, set_flash};
use crate::dispatch::{self, DispatchError, EditMode, Loaded};
use crate::errors::{AppError, inline, render};
use crate::state::AppState;
use crate::templates_structs::{PageContext, RecordNotFoundTemplate};

#[derive(Deserialize)]
pub struct EditQuery {
    pub preview: Option<String>,
}

fn parse_mode(raw: &str) -> Result<EditMode, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn not_found_page(ctx: PageContext, mode: EditMode, id: i64) -> Result<HttpResponse, AppError> {
    let mut resp = render(RecordNotFoundTemplate {
        ctx,
        message: format!("{} #{id} bulunamadı.", mode.label()),
        links: EditMode::ALL
            .iter()
            .map(|m| (m.back_url().to_string(), m.label().to_string()))
            .collect(),
    })?;
    *resp.status_mut() = StatusCode::NOT_FOUND;
    Ok(resp)
}

/// Outcome of loading for the page: the record, or a finished response.
enum Resolved {
    Record(Loaded),
    Done(HttpResponse),
}

async fn resolve(
    state: &AppState,
    session: &Session,
    mode: EditMode,
    id: i64,
) -> Result<Resolved, AppError> {
    let client = api_client(session, &state.api)?;
    match dispatch::load(&client, mode, id).await {
        Ok(loaded) => Ok(Resolved::Record(loaded)),
        Err(DispatchError::NotFound) => {
            let ctx = PageContext::build(session, &state.app_name, &mode.edit_url(id))?;
            Ok(Resolved::Done(not_found_page(ctx, mode, id)?))
        }
        Err(DispatchError::Api(e)) => {
            set_flash(session, inline(e)?);
            Ok(Resolved::Done(redirect(mode.back_url())))
        }
        Err(e @ DispatchError::Mismatch { .. }) => {
            log::warn!("[edit] {e}");
            set_flash(session, e.to_string());
            Ok(Resolved::Done(redirect(mode.back_url())))
        }
    }
}

fn form_page<'a>(
    loaded: &Loaded,
    draft: &'a crate::form::FormState,
    options: &'a crate::form::widgets::LoadedOptions,
    errors: Vec<String>,
) -> FormPage<'a> {
    FormPage {
        title: format!("{} Düzenle", draft.config().display_name),
        action: loaded.mode.edit_url(loaded.id),
        back_url: loaded.mode.back_url().to_string(),
        state: draft,
        loaded: options,
        errors,
    }
}

/// GET: the form, or with `?preview=1` the read-only rendering.
pub async fn edit_page(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<(String, i64)>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse, AppError> {
    let (raw, id) = path.into_inner();
    let mode = parse_mode(&raw)?;
    require_permission(&session, &format!("{}.duzenleme", mode.module()))?;

    let loaded = match resolve(&state, &session, mode, id).await? {
        Resolved::Record(l) => l,
        Resolved::Done(resp) => return Ok(resp),
    };
    let (client, ctx) = records::page(&session, &state, &mode.edit_url(id))?;
    let draft = loaded.form_state();
    let options = records::load_options(&client, loaded.table).await?;
    let page = form_page(&loaded, &draft, &options, vec![]);

    if query.preview.as_deref().is_some_and(|p| p == "1" || p == "true") {
        records::render_preview(ctx, page)
    } else {
        records::render_form(ctx, page)
    }
}

/// POST: apply the draft over a fresh copy of the record, validate, then
/// write through the loaded mode. A failed save keeps the draft on screen.
pub async fn edit_submit(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<(String, i64)>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let (raw, id) = path.into_inner();
    let mode = parse_mode(&raw)?;
    require_permission(&session, &format!("{}.duzenleme", mode.module()))?;
    records::check_csrf(&session, &form)?;

    let loaded = match resolve(&state, &session, mode, id).await? {
        Resolved::Record(l) => l,
        Resolved::Done(resp) => return Ok(resp),
    };
    let client = api_client(&session, &state.api)?;
    let mut draft = loaded.form_state();
    draft.apply_form(&form);
    let mut errors = draft.validate();
    errors.extend(records::table_checks(&draft, false));
    let action = intent(&form);

    if errors.is_empty() && action == Intent::Save {
        match dispatch::save(&client, &loaded, &draft).await {
            Ok(()) => {
                set_flash(&session, format!("{} güncellendi.", draft.config().display_name));
                return Ok(redirect(mode.back_url()));
            }
            Err(DispatchError::Api(e)) => errors.push(inline(e)?),
            Err(e) => errors.push(e.to_string()),
        }
    }

    let ctx = PageContext::build(&session, &state.app_name, &mode.edit_url(id))?;
    let options = records::load_options(&client, loaded.table).await?;
    let shown = if action == Intent::Save { errors } else { vec![] };
    let page = form_page(&loaded, &draft, &options, shown);
    match action {
        Intent::Preview => records::render_preview(ctx, page),
        _ => records::render_form(ctx, page),
    }
}

/// Old per-resource edit URLs (`/panel/etkinlikler/{id}/duzenle`,
/// `/panel/kurumsal/yonetim/{id}/edit`, ...) redirect to the explicit route.
pub async fn legacy_redirect(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let mode = EditMode::infer_from_path(req.path()).ok_or(AppError::NotFound)?;
    let id: i64 = req
        .match_info()
        .get("id")
        .and_then(|s| s.parse().ok())
        .ok_or(AppError::NotFound)?;
    let mut target = mode.edit_url(id);
    if !req.query_string().is_empty() {
        target.push('?');
        target.push_str(req.query_string());
    }
    Ok(redirect(&target))
}
