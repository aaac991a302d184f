// Template context structures for Askama templates.

use actix_session::Session;
use askama::Template;

use crate::auth::csrf;
use crate::auth::session::{Permissions, get_display_name, get_permissions, get_username, take_flash};
use crate::errors::AppError;
use crate::form::widgets::{FieldView, PreviewView, SelectOption};
use crate::listing::HeaderView;
use crate::nav::{self, NavModule, NavSidebarItem};

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.nav_modules`, etc.
pub struct PageContext {
    pub username: String,
    pub display_name: String,
    pub avatar_initial: String,
    pub permissions: Permissions,
    pub flash: Option<String>,
    pub nav_modules: Vec<NavModule>,
    pub sidebar_items: Vec<NavSidebarItem>,
    pub app_name: String,
    pub csrf_token: String,
    /// Header search box value, echoed from the `q` parameter.
    pub search_query: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, app_name: &str, current_path: &str) -> Result<Self, AppError> {
        let username = get_username(session)
            .map_err(|e| AppError::Session(format!("Failed to get username: {}", e)))?;
        let permissions = get_permissions(session)
            .map_err(|e| AppError::Session(format!("Failed to get permissions: {}", e)))?;
        let display_name = get_display_name(session).unwrap_or_else(|| username.clone());
        let flash = take_flash(session);
        let (nav_modules, sidebar_items) = nav::find_navigation(&permissions, current_path);
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = display_name.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            username,
            display_name,
            avatar_initial,
            permissions,
            flash,
            nav_modules,
            sidebar_items,
            app_name: app_name.to_string(),
            csrf_token,
            search_query: String::new(),
            current_path: current_path.to_string(),
        })
    }

    pub fn with_search(mut self, q: Option<&str>) -> Self {
        self.search_query = q.unwrap_or("").to_string();
        self
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub username: String,
}

pub struct DashboardCard {
    pub label: &'static str,
    pub value: String,
    pub url: &'static str,
}

pub struct ComplaintSummary {
    pub id: i64,
    pub konu: String,
    pub ad_soyad: String,
    pub oncelik: String,
    pub durum: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub cards: Vec<DashboardCard>,
    pub urgent: Vec<ComplaintSummary>,
    pub warnings: Vec<String>,
}

/// One table row of a list page.
pub struct RowView {
    pub id: i64,
    pub cells: Vec<String>,
    pub edit_url: String,
    pub delete_url: String,
}

/// Link to a neighbouring page, if there is one.
pub struct Pager {
    pub page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub prev_href: String,
    pub next_href: String,
}

#[derive(Template)]
#[template(path = "records/list.html")]
pub struct RecordListTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub base_url: String,
    pub new_url: String,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub pager: Pager,
    pub from: String,
    pub to: String,
    pub show_dates: bool,
    pub status_options: Vec<SelectOption>,
    /// `(value, label)` pairs; empty hides the selection column.
    pub bulk_actions: Vec<(String, String)>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "records/form.html")]
pub struct RecordFormTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub form_action: String,
    pub back_url: String,
    pub fields: Vec<FieldView>,
    pub errors: Vec<String>,
    pub can_preview: bool,
}

#[derive(Template)]
#[template(path = "records/preview.html")]
pub struct RecordPreviewTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub form_action: String,
    pub rows: Vec<PreviewView>,
    pub draft: Vec<(String, String)>,
}

#[derive(Template)]
#[template(path = "records/not_found.html")]
pub struct RecordNotFoundTemplate {
    pub ctx: PageContext,
    pub message: String,
    /// `(url, label)`, one per edit mode.
    pub links: Vec<(String, String)>,
}

pub struct ComplaintView {
    pub id: i64,
    pub ad_soyad: String,
    pub e_mail: String,
    pub telefon: String,
    pub konu: String,
    pub mesaj: String,
    pub kategori: String,
    pub adres: String,
    pub olusturma_tarihi: String,
    pub yanit: String,
    pub yanitlayan_personel: String,
    pub yanit_tarihi: String,
    pub answered: bool,
}

#[derive(Template)]
#[template(path = "complaints/detail.html")]
pub struct ComplaintDetailTemplate {
    pub ctx: PageContext,
    pub complaint: ComplaintView,
    pub status_options: Vec<SelectOption>,
    pub priority_options: Vec<SelectOption>,
    pub errors: Vec<String>,
}

pub struct CorporateSection {
    pub label: &'static str,
    pub id: i64,
    pub baslik: String,
    pub icerik: String,
    pub image: String,
    pub edit_url: String,
    pub present: bool,
}

#[derive(Template)]
#[template(path = "corporate/bmvi.html")]
pub struct CorporateOverviewTemplate {
    pub ctx: PageContext,
    pub sections: Vec<CorporateSection>,
    pub warnings: Vec<String>,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub isim: String,
    pub profil_foto: String,
    pub errors: Vec<String>,
}
