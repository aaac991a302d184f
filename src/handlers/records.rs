//! Building blocks shared by the resource handlers: registry-driven create
//! and edit forms, list rendering, bulk actions.

use std::collections::HashMap;

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::auth::{csrf, validate};
use crate::auth::session::{api_client, require_permission, set_flash};
use crate::dispatch::Payload;
use crate::errors::{AppError, inline, render};
use crate::form::FormState;
use crate::form::widgets::{LoadedOptions, SelectOption, field_views, preview_views, draft_inputs};
use crate::listing::bulk::{self, BulkAction};
use crate::listing::{self, ColumnDef, ListQuery, Listable};
use crate::registry::{OptionSource, TableKind};
use crate::resources::{news, publications, reports};
use crate::state::AppState;
use crate::templates_structs::{
    PageContext, Pager, RecordFormTemplate, RecordListTemplate, RecordPreviewTemplate, RowView,
};

pub type FormData = web::Form<HashMap<String, String>>;

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Permission module of a table.
pub fn module(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Corporate
        | TableKind::ManagementChart
        | TableKind::EthicsMediation
        | TableKind::Directorate
        | TableKind::Muhtar => "kurumsal",
        TableKind::Event => "etkinlikler",
        TableKind::News => "haberler",
        TableKind::CityService => "hizmetler",
        TableKind::Report => "raporlar",
        TableKind::Publication => "yayinlar",
        TableKind::Announcement => "duyurular",
        TableKind::Complaint => "sikayetler",
        TableKind::User => "kullanicilar",
    }
}

pub fn list_url(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Corporate | TableKind::EthicsMediation => "/panel/kurumsal/bmvi",
        TableKind::ManagementChart => "/panel/kurumsal/yonetim",
        TableKind::Event => "/panel/etkinlikler",
        TableKind::News => "/panel/haberler",
        TableKind::CityService => "/panel/hizmetler",
        TableKind::Report => "/panel/raporlar",
        TableKind::Publication => "/panel/yayinlar",
        TableKind::Announcement => "/panel/duyurular",
        TableKind::Complaint => "/panel/sikayetler",
        TableKind::User => "/panel/users",
        TableKind::Directorate => "/panel/kurumsal/mudurlukler",
        TableKind::Muhtar => "/panel/kurumsal/muhtarlar",
    }
}

pub fn permission(kind: TableKind, action: &str) -> String {
    format!("{}.{action}", module(kind))
}

/// Session client plus the page context, the preamble of every page.
pub fn page(session: &Session, state: &AppState, path: &str) -> Result<(ApiClient, PageContext), AppError> {
    let client = api_client(session, &state.api)?;
    let ctx = PageContext::build(session, &state.app_name, path)?;
    Ok((client, ctx))
}

pub fn check_csrf(session: &Session, form: &HashMap<String, String>) -> Result<(), AppError> {
    csrf::validate_csrf(session, form.get("csrf_token").map(String::as_str).unwrap_or(""))
}

/// Fixed option list as select options, with `current` marked.
pub fn fixed_options(options: &[&str], current: &str) -> Vec<SelectOption> {
    options
        .iter()
        .map(|o| SelectOption {
            value: o.to_string(),
            label: o.to_string(),
            selected: *o == current,
        })
        .collect()
}

/// Fetch the backend-sourced select options a table needs. A failed fetch
/// leaves that select empty; an expired token escalates.
pub async fn load_options(client: &ApiClient, kind: TableKind) -> Result<LoadedOptions, AppError> {
    let mut loaded = LoadedOptions::new();
    for field in kind.config().fields {
        let result: Result<Vec<(String, String)>, ApiError> = match field.options {
            Some(OptionSource::PublicationCategories) => publications::categories(client)
                .await
                .map(|cs| cs.into_iter().map(|c| (c.category_id.to_string(), c.category_name)).collect()),
            Some(OptionSource::ReportCategories) => reports::categories(client)
                .await
                .map(|cs| cs.into_iter().map(|c| (c.category_id.to_string(), c.category_name)).collect()),
            Some(OptionSource::NewsCategories) => news::categories(client)
                .await
                .map(|cs| cs.into_iter().map(|c| (c.id.to_string(), c.ad)).collect()),
            _ => continue,
        };
        match result {
            Ok(options) => {
                loaded.insert(field.name, options);
            }
            Err(e) => {
                inline(e)?;
                loaded.insert(field.name, vec![]);
            }
        }
    }
    Ok(loaded)
}

pub struct FormPage<'a> {
    pub title: String,
    pub action: String,
    pub back_url: String,
    pub state: &'a FormState,
    pub loaded: &'a LoadedOptions,
    pub errors: Vec<String>,
}

pub fn render_form(ctx: PageContext, page: FormPage<'_>) -> Result<HttpResponse, AppError> {
    render(RecordFormTemplate {
        ctx,
        title: page.title,
        form_action: page.action,
        back_url: page.back_url,
        fields: field_views(page.state, page.loaded),
        errors: page.errors,
        can_preview: true,
    })
}

pub fn render_preview(ctx: PageContext, page: FormPage<'_>) -> Result<HttpResponse, AppError> {
    render(RecordPreviewTemplate {
        ctx,
        title: page.title,
        form_action: page.action,
        rows: preview_views(page.state, page.loaded),
        draft: draft_inputs(page.state),
    })
}

/// What the submit button asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Save,
    Preview,
    /// Back from the preview to the form, keeping the draft.
    Edit,
}

pub fn intent(form: &HashMap<String, String>) -> Intent {
    match form.get("_action").map(String::as_str) {
        Some("preview") => Intent::Preview,
        Some("edit") => Intent::Edit,
        _ => Intent::Save,
    }
}

/// GET `/panel/{resource}/new`.
pub async fn new_form(kind: TableKind, state: &AppState, session: &Session) -> Result<HttpResponse, AppError> {
    require_permission(session, &permission(kind, "ekleme"))?;
    let (client, ctx) = page(session, state, list_url(kind))?;
    let draft = FormState::empty(kind);
    let loaded = load_options(&client, kind).await?;
    render_form(
        ctx,
        FormPage {
            title: format!("Yeni {}", kind.config().display_name),
            action: list_url(kind).to_string(),
            back_url: list_url(kind).to_string(),
            state: &draft,
            loaded: &loaded,
            errors: vec![],
        },
    )
}

/// POST `/panel/{resource}`: validate, then send to the resource's create call.
pub async fn create(
    kind: TableKind,
    state: &AppState,
    session: &Session,
    form: &HashMap<String, String>,
) -> Result<HttpResponse, AppError> {
    require_permission(session, &permission(kind, "ekleme"))?;
    check_csrf(session, form)?;
    let client = api_client(session, &state.api)?;

    let mut draft = FormState::empty(kind);
    draft.apply_form(form);
    let mut errors = draft.validate();
    errors.extend(table_checks(&draft, true));
    let action = intent(form);

    if errors.is_empty() && action == Intent::Save {
        match Payload::from_state(&draft).create(&client).await {
            Ok(()) => {
                log::info!("[records] created {kind}");
                set_flash(session, format!("{} oluşturuldu.", kind.config().display_name));
                return Ok(redirect(list_url(kind)));
            }
            Err(e) => errors.push(inline(e)?),
        }
    }

    let ctx = PageContext::build(session, &state.app_name, list_url(kind))?;
    let loaded = load_options(&client, kind).await?;
    let page = FormPage {
        title: format!("Yeni {}", kind.config().display_name),
        action: list_url(kind).to_string(),
        back_url: list_url(kind).to_string(),
        state: &draft,
        loaded: &loaded,
        errors: if action == Intent::Save { errors } else { vec![] },
    };
    match action {
        Intent::Preview => render_preview(ctx, page),
        _ => render_form(ctx, page),
    }
}

/// Checks beyond required/length that only some tables have.
pub fn table_checks(draft: &FormState, creating: bool) -> Vec<String> {
    match draft.kind() {
        TableKind::User => {
            let mut errors: Vec<String> = vec![];
            if !draft.text("tcno").trim().is_empty() {
                errors.extend(validate::validate_tc_no(&draft.text("tcno")));
            }
            if creating && draft.text("password").is_empty() {
                errors.push("Parola zorunludur".to_string());
            }
            errors
        }
        _ => vec![],
    }
}

/// GET edit page for a table edited outside the dispatcher.
pub async fn edit_form(
    kind: TableKind,
    id: i64,
    state: &AppState,
    session: &Session,
    fetched: Result<Value, ApiError>,
) -> Result<HttpResponse, AppError> {
    require_permission(session, &permission(kind, "duzenleme"))?;
    let (client, ctx) = page(session, state, list_url(kind))?;
    let record = match fetched {
        Ok(record) => record,
        Err(e) if e.is_not_found() => return Err(AppError::NotFound),
        Err(e) => {
            set_flash(session, inline(e)?);
            return Ok(redirect(list_url(kind)));
        }
    };
    let draft = FormState::from_record(kind, &record);
    let loaded = load_options(&client, kind).await?;
    render_form(
        ctx,
        FormPage {
            title: format!("{} Düzenle", kind.config().display_name),
            action: format!("{}/{id}", list_url(kind)),
            back_url: list_url(kind).to_string(),
            state: &draft,
            loaded: &loaded,
            errors: vec![],
        },
    )
}

/// POST edit page: apply the submitted form over the fetched record, then
/// validate and send the update.
pub async fn update(
    kind: TableKind,
    id: i64,
    state: &AppState,
    session: &Session,
    form: &HashMap<String, String>,
    fetched: Result<Value, ApiError>,
) -> Result<HttpResponse, AppError> {
    require_permission(session, &permission(kind, "duzenleme"))?;
    check_csrf(session, form)?;
    let client = api_client(session, &state.api)?;
    let record = match fetched {
        Ok(record) => record,
        Err(e) if e.is_not_found() => return Err(AppError::NotFound),
        Err(e) => {
            set_flash(session, inline(e)?);
            return Ok(redirect(list_url(kind)));
        }
    };

    let mut draft = FormState::from_record(kind, &record);
    draft.apply_form(form);
    let mut errors = draft.validate();
    errors.extend(table_checks(&draft, false));
    let action = intent(form);

    if errors.is_empty() && action == Intent::Save {
        match Payload::from_state(&draft).update(&client, id).await {
            Ok(()) => {
                log::info!("[records] updated {kind} {id}");
                set_flash(session, format!("{} güncellendi.", kind.config().display_name));
                return Ok(redirect(list_url(kind)));
            }
            Err(e) => errors.push(inline(e)?),
        }
    }

    let ctx = PageContext::build(session, &state.app_name, list_url(kind))?;
    let loaded = load_options(&client, kind).await?;
    let page = FormPage {
        title: format!("{} Düzenle", kind.config().display_name),
        action: format!("{}/{id}", list_url(kind)),
        back_url: list_url(kind).to_string(),
        state: &draft,
        loaded: &loaded,
        errors: if action == Intent::Save { errors } else { vec![] },
    };
    match action {
        Intent::Preview => render_preview(ctx, page),
        _ => render_form(ctx, page),
    }
}

/// Static description of a list page.
pub struct ListSpec {
    pub kind: TableKind,
    pub title: &'static str,
    pub columns: &'static [ColumnDef],
    pub default_sort: &'static str,
    pub show_dates: bool,
    pub status_options: &'static [&'static str],
    pub bulk_actions: &'static [(&'static str, &'static str)],
    pub creatable: bool,
    pub deletable: bool,
    /// Empty string for read-only rows.
    pub edit_url: fn(i64) -> String,
}

/// Derive and render the view of a fetched collection. A failed fetch
/// shows an empty table with the error above it.
pub fn render_list<T: Listable>(
    ctx: PageContext,
    spec: &ListSpec,
    fetched: Result<Vec<T>, ApiError>,
    query: &ListQuery,
) -> Result<HttpResponse, AppError> {
    let (items, error) = match fetched {
        Ok(items) => (items, None),
        Err(e) => (vec![], Some(inline(e)?)),
    };
    let base = ctx.current_path.clone();
    let base = base.as_str();
    let sort = query.sort_spec(spec.default_sort);
    let view = listing::derive(items, query, &sort);

    let rows = view
        .items
        .iter()
        .map(|item| RowView {
            id: item.id(),
            cells: item.cells(),
            edit_url: (spec.edit_url)(item.id()),
            delete_url: if spec.deletable { format!("{base}/{}/delete", item.id()) } else { String::new() },
        })
        .collect();
    let pager = Pager {
        page: view.page,
        total_pages: view.total_pages,
        total_count: view.total_count,
        prev_href: if view.has_prev() { query.href(base, None, Some(view.page - 1)) } else { String::new() },
        next_href: if view.has_next() { query.href(base, None, Some(view.page + 1)) } else { String::new() },
    };
    let status = query.status_filter().unwrap_or("");

    render(RecordListTemplate {
        ctx: ctx.with_search(query.search()),
        title: spec.title.to_string(),
        base_url: base.to_string(),
        new_url: if spec.creatable { format!("{base}/new") } else { String::new() },
        headers: listing::headers(spec.columns, query, &sort, base),
        rows,
        pager,
        from: query.from.clone().unwrap_or_default(),
        to: query.to.clone().unwrap_or_default(),
        show_dates: spec.show_dates,
        status_options: fixed_options(spec.status_options, status),
        bulk_actions: spec
            .bulk_actions
            .iter()
            .map(|(v, l)| (v.to_string(), l.to_string()))
            .collect(),
        error,
    })
}

/// POST `{list}/bulk`: run the chosen action for every ticked row and
/// flash what happened per item. Only actions the page offers are accepted.
pub async fn bulk<F, Fut>(
    spec: &ListSpec,
    state: &AppState,
    session: &Session,
    form: &HashMap<String, String>,
    op: F,
) -> Result<HttpResponse, AppError>
where
    F: Fn(ApiClient, BulkAction, i64) -> Fut,
    Fut: std::future::Future<Output = Result<(), ApiError>>,
{
    let kind = spec.kind;
    check_csrf(session, form)?;
    let requested = form.get("bulk_action").map(String::as_str).unwrap_or("");
    let offered = spec.bulk_actions.iter().any(|(v, _)| *v == requested);
    let action: BulkAction = match requested.parse() {
        Ok(a) if offered => a,
        _ => {
            set_flash(session, "Geçersiz toplu işlem.");
            return Ok(redirect(list_url(kind)));
        }
    };
    let code = match action {
        BulkAction::Delete => "silme",
        BulkAction::Archive => "duzenleme",
    };
    require_permission(session, &permission(kind, code))?;

    let ids = bulk::selected_ids(form);
    if ids.is_empty() {
        set_flash(session, "Hiçbir kayıt seçilmedi.");
        return Ok(redirect(list_url(kind)));
    }
    let client = api_client(session, &state.api)?;
    let outcome = bulk::run(&ids, |id| op(client.clone(), action, id)).await?;
    let verb = match action {
        BulkAction::Delete => "silindi",
        BulkAction::Archive => "arşivlendi",
    };
    log::info!(
        "[records] bulk {verb} on {kind}: {} ok, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    set_flash(session, outcome.summary(verb));
    Ok(redirect(list_url(kind)))
}

/// POST `{list}/{id}/delete` for a single row.
pub async fn delete_one<Fut>(
    kind: TableKind,
    state: &AppState,
    session: &Session,
    form: &HashMap<String, String>,
    call: impl FnOnce(ApiClient) -> Fut,
) -> Result<HttpResponse, AppError>
where
    Fut: std::future::Future<Output = Result<(), ApiError>>,
{
    require_permission(session, &permission(kind, "silme"))?;
    check_csrf(session, form)?;
    let client = api_client(session, &state.api)?;
    match call(client).await {
        Ok(()) => set_flash(session, "Kayıt silindi."),
        Err(e) => set_flash(session, format!("Silinemedi: {}", inline(e)?)),
    }
    Ok(redirect(list_url(kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn intent_defaults_to_save() {
        assert_eq!(intent(&form(&[])), Intent::Save);
        assert_eq!(intent(&form(&[("_action", "preview")])), Intent::Preview);
        assert_eq!(intent(&form(&[("_action", "edit")])), Intent::Edit);
    }

    #[test]
    fn every_table_has_a_list_page() {
        for kind in TableKind::ALL {
            assert!(list_url(kind).starts_with("/panel/"), "{kind}");
            assert!(!module(kind).is_empty());
        }
    }
}
