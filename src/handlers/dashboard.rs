use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, Timelike};

use super::records;
use crate::api::ApiError;
use crate::errors::{AppError, inline, render};
use crate::resources::{announcements, complaints, events, news};
use crate::state::AppState;
use crate::templates_structs::{ComplaintSummary, DashboardCard, DashboardTemplate};

const URGENT_SHOWN: usize = 5;

fn time_greeting(name: &str) -> String {
    let hour = Local::now().hour();
    let period = match hour {
        5..=11 => "Günaydın",
        12..=17 => "İyi günler",
        _ => "İyi akşamlar",
    };
    format!("{period}, {name}")
}

/// Card value, or a dash with the failure noted under the cards.
fn card_value<T>(
    label: &str,
    result: Result<T, ApiError>,
    show: impl FnOnce(T) -> String,
    warnings: &mut Vec<String>,
) -> Result<String, AppError> {
    match result {
        Ok(v) => Ok(show(v)),
        Err(e) => {
            warnings.push(format!("{label}: {}", inline(e)?));
            Ok("–".to_string())
        }
    }
}

/// Runs `fut` only when the widget it feeds will be shown.
async fn when<T>(shown: bool, fut: impl Future<Output = T>) -> Option<T> {
    if shown { Some(fut.await) } else { None }
}

/// GET `/panel/mainPage`: counters and the most urgent open complaints.
/// Every widget loads independently; a failed one shows a warning. Widgets
/// the user may not see are never fetched.
pub async fn index(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let (client, ctx) = records::page(&session, &state, "/panel/mainPage")?;
    let greeting = time_greeting(&ctx.display_name);
    let perms = ctx.permissions.clone();
    let can_complaints = perms.has("sikayetler.goruntuleme");

    let (total, waiting, active, news_items, event_items, urgent) = futures::join!(
        when(can_complaints, complaints::count_total(&client)),
        when(can_complaints, complaints::count_by_status(&client, "BEKLEMEDE")),
        when(perms.has("duyurular.goruntuleme"), announcements::active(&client)),
        when(perms.has("haberler.goruntuleme"), news::list(&client)),
        when(perms.has("etkinlikler.goruntuleme"), events::list(&client)),
        when(can_complaints, complaints::urgent(&client)),
    );

    let mut warnings = vec![];
    let mut cards = vec![];
    if let Some(total) = total {
        cards.push(DashboardCard {
            label: "Toplam Şikayet",
            value: card_value("Toplam şikayet", total, |n| n.to_string(), &mut warnings)?,
            url: "/panel/sikayetler",
        });
    }
    if let Some(waiting) = waiting {
        cards.push(DashboardCard {
            label: "Bekleyen Şikayet",
            value: card_value("Bekleyen şikayet", waiting, |n| n.to_string(), &mut warnings)?,
            url: "/panel/sikayetler?status=BEKLEMEDE",
        });
    }
    if let Some(active) = active {
        cards.push(DashboardCard {
            label: "Aktif Duyuru",
            value: card_value("Duyurular", active, |v| v.len().to_string(), &mut warnings)?,
            url: "/panel/duyurular?status=AKTIF",
        });
    }
    if let Some(news_items) = news_items {
        cards.push(DashboardCard {
            label: "Haber",
            value: card_value("Haberler", news_items, |v| v.len().to_string(), &mut warnings)?,
            url: "/panel/haberler",
        });
    }
    if let Some(event_items) = event_items {
        cards.push(DashboardCard {
            label: "Etkinlik",
            value: card_value("Etkinlikler", event_items, |v| v.len().to_string(), &mut warnings)?,
            url: "/panel/etkinlikler",
        });
    }

    let urgent = match urgent {
        Some(Ok(list)) => list
            .into_iter()
            .take(URGENT_SHOWN)
            .map(|c| ComplaintSummary {
                id: c.id.unwrap_or(0),
                konu: c.konu,
                ad_soyad: c.ad_soyad,
                oncelik: c.oncelik.unwrap_or_default(),
                durum: c.durum.unwrap_or_default(),
            })
            .collect(),
        Some(Err(e)) => {
            warnings.push(format!("Acil şikayetler: {}", inline(e)?));
            vec![]
        }
        None => vec![],
    };

    render(DashboardTemplate { ctx, greeting, cards, urgent, warnings })
}
