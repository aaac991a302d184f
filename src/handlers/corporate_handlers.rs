//! Corporate pages: the chairman/mission/vision overview, the management
//! roster and the read-only ethics committee list.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use futures::future::join_all;

use super::records::{self, FormData, ListSpec, permission};
use crate::api::public_image_path;
use crate::auth::session::require_permission;
use crate::dispatch::EditMode;
use crate::errors::{AppError, inline, render};
use crate::listing::bulk::BulkAction;
use crate::listing::{ColumnDef, ListQuery, Listable, SortValue};
use crate::registry::{Category, TableKind};
use crate::resources::committees::{self, CommitteeMember};
use crate::resources::corporate;
use crate::resources::management::{self, ManagementMember};
use crate::state::AppState;
use crate::templates_structs::{CorporateOverviewTemplate, CorporateSection};

const ROSTER_STATES: &[&str] = &["Aktif", "Arşiv"];

impl Listable for ManagementMember {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![
            self.isim_soyisim.as_str(),
            self.pozisyon.as_str(),
            self.mudurlukler.as_str(),
            self.email.as_str(),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(if self.archived { ROSTER_STATES[1] } else { ROSTER_STATES[0] })
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "isimSoyisim" => SortValue::text(&self.isim_soyisim),
            "pozisyon" => SortValue::text(&self.pozisyon),
            "siraNo" => SortValue::Number(self.order()),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.sira_no.clone(),
            self.isim_soyisim.clone(),
            self.pozisyon.clone(),
            self.mudurlukler.clone(),
            self.status().unwrap_or("").to_string(),
        ]
    }
}

impl Listable for CommitteeMember {
    fn id(&self) -> i64 {
        self.id
    }

    fn haystack(&self) -> Vec<&str> {
        vec![self.ad.as_str(), self.unvan.as_str(), self.gorev.as_str(), self.tip.as_str()]
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "ad" => SortValue::text(&self.ad),
            "gorev" => SortValue::text(&self.gorev),
            "tip" => SortValue::text(&self.tip),
            _ => SortValue::Number(self.id),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.ad.clone(),
            self.unvan.clone(),
            self.gorev.clone(),
            self.tip.clone(),
        ]
    }
}

static ROSTER: ListSpec = ListSpec {
    kind: TableKind::ManagementChart,
    title: "Yönetim Şeması",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("siraNo", "Sıra"),
        ColumnDef::new("isimSoyisim", "İsim Soyisim"),
        ColumnDef::new("pozisyon", "Pozisyon"),
        ColumnDef::fixed("mudurlukler", "Müdürlükler"),
        ColumnDef::fixed("durum", "Durum"),
    ],
    default_sort: "siraNo",
    show_dates: false,
    status_options: ROSTER_STATES,
    bulk_actions: &[("archive", "Seçilenleri arşivle"), ("delete", "Seçilenleri sil")],
    creatable: false,
    deletable: true,
    edit_url: roster_edit_url,
};

static COMMITTEE: ListSpec = ListSpec {
    kind: TableKind::EthicsMediation,
    title: "Etik Komisyonu",
    columns: &[
        ColumnDef::new("id", "ID"),
        ColumnDef::new("ad", "Ad"),
        ColumnDef::fixed("unvan", "Unvan"),
        ColumnDef::new("gorev", "Görev"),
        ColumnDef::new("tip", "Tip"),
    ],
    default_sort: "id",
    show_dates: false,
    status_options: &[],
    bulk_actions: &[],
    creatable: false,
    deletable: false,
    edit_url: no_edit,
};

fn roster_edit_url(id: i64) -> String {
    EditMode::Management.edit_url(id)
}

fn no_edit(_: i64) -> String {
    String::new()
}

/// GET `/panel/kurumsal/bmvi`: the active record of each corporate category.
/// A category that fails to load shows a warning instead of its card.
pub async fn overview(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::Corporate, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/kurumsal/bmvi")?;

    let results = join_all(
        Category::PROBE_ORDER
            .iter()
            .map(|c| corporate::active_by_category(&client, c.as_str())),
    )
    .await;

    let mut sections = vec![];
    let mut warnings = vec![];
    for (category, result) in Category::PROBE_ORDER.iter().zip(results) {
        match result {
            Ok(Some(rec)) => sections.push(CorporateSection {
                label: category.label(),
                id: rec.id,
                edit_url: EditMode::Corporate.edit_url(rec.id),
                image: if rec.resim_url1.trim().is_empty() {
                    String::new()
                } else {
                    public_image_path(&rec.resim_url1)
                },
                baslik: rec.baslik,
                icerik: rec.icerik,
                present: true,
            }),
            Ok(None) => sections.push(CorporateSection {
                label: category.label(),
                id: 0,
                baslik: String::new(),
                icerik: String::new(),
                image: String::new(),
                edit_url: String::new(),
                present: false,
            }),
            Err(e) => warnings.push(format!("{}: {}", category.label(), inline(e)?)),
        }
    }

    render(CorporateOverviewTemplate { ctx, sections, warnings })
}

pub async fn roster_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::ManagementChart, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/kurumsal/yonetim")?;
    let fetched = management::list(&client).await;
    records::render_list(ctx, &ROSTER, fetched, &query)
}

pub async fn roster_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: FormData,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    records::delete_one(TableKind::ManagementChart, &state, &session, &form, |client| async move {
        management::delete(&client, id).await
    })
    .await
}

pub async fn roster_bulk(state: web::Data<AppState>, session: Session, form: FormData) -> Result<HttpResponse, AppError> {
    records::bulk(&ROSTER, &state, &session, &form, |client, action, id| async move {
        match action {
            BulkAction::Delete => management::delete(&client, id).await,
            BulkAction::Archive => management::archive(&client, id, true).await,
        }
    })
    .await
}

pub async fn committee_list(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &permission(TableKind::EthicsMediation, "goruntuleme"))?;
    let (client, ctx) = records::page(&session, &state, "/panel/kurumsal/komisyonlar")?;
    let fetched = committees::list(&client).await;
    records::render_list(ctx, &COMMITTEE, fetched, &query)
}
