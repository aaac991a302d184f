use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::form::{FormState, dates};
use crate::registry::TableKind;
use crate::resources::announcements::{self, Announcement};
use crate::resources::city_services::{self, CityServiceRequest};
use crate::resources::complaints::{self, Complaint};
use crate::resources::corporate::{self, CorporateUpdate, EthicsUpdate};
use crate::resources::directorates::{self, DirectorateRequest};
use crate::resources::events::{self, EventRequest};
use crate::resources::management::{self, ManagementUpdate};
use crate::resources::muhtars::{self, MuhtarRequest};
use crate::resources::news::{self, NewsRequest};
use crate::resources::publications::{self, PublicationRequest};
use crate::resources::reports::{self, ReportRequest};
use crate::resources::users::{self, UserRequest};

/// Typed write body for one table. Built only from the fields the table
/// declares, so extra keys of a fetched record never reach the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Event(EventRequest),
    News(NewsRequest),
    Service(CityServiceRequest),
    Report(ReportRequest),
    Publication(PublicationRequest),
    Management(ManagementUpdate),
    Corporate(CorporateUpdate),
    Ethics(EthicsUpdate),
    Announcement(Announcement),
    Complaint(Complaint),
    User(UserRequest),
    Directorate(DirectorateRequest),
    Muhtar(MuhtarRequest),
}

fn optional(state: &FormState, name: &str) -> Option<String> {
    let s = state.text(name);
    (!s.trim().is_empty()).then_some(s)
}

impl Payload {
    pub fn from_state(state: &FormState) -> Self {
        let t = |name: &str| state.text(name);
        match state.kind() {
            TableKind::Event => Payload::Event(EventRequest {
                baslik: t("baslik").trim().to_string(),
                tarih: t("tarih").trim().to_string(),
                resim_url: t("resimUrl"),
                aciklama: t("aciklama"),
            }),
            TableKind::News => {
                let resim1 = t("resim1");
                let resim2 = optional(state, "resim2").unwrap_or_else(|| resim1.clone());
                Payload::News(NewsRequest {
                    baslik: t("baslik").trim().to_string(),
                    aciklama: t("aciklama"),
                    tarih: dates::normalize_dotted(&t("tarih")),
                    resim1,
                    resim2,
                    kategori_id: state.int("kategoriId"),
                })
            }
            TableKind::CityService => Payload::Service(CityServiceRequest {
                baslik: t("baslik").trim().to_string(),
                img_url: t("imgUrl").trim().to_string(),
                telefon: t("telefon"),
                konum: t("konum"),
                button_detay: t("buttonDetay"),
                button_konum: t("buttonKonum"),
                mail: t("mail"),
                kategori: t("kategori"),
            }),
            TableKind::Report => Payload::Report(ReportRequest {
                rapor_baslik: t("raporBaslik"),
                rapor_url: t("raporUrl"),
                category_id: state.int("categoryId"),
                rapor_tarihi: optional(state, "raporTarihi"),
                rapor_durum: state.flag("raporDurum"),
            }),
            TableKind::Publication => Payload::Publication(PublicationRequest {
                yayin_baslik: t("yayinBaslik"),
                yayin_url: t("yayinUrl"),
                description: t("description"),
                category_id: state.int("categoryId"),
            }),
            TableKind::ManagementChart => Payload::Management(ManagementUpdate {
                isim_soyisim: t("isimSoyisim"),
                resim_url: t("resimUrl"),
                pozisyon: t("pozisyon"),
                sira_no: t("siraNo"),
                mudurlukler: t("mudurlukler"),
                delta: t("delta"),
                email: t("email"),
                telefon: t("telefon"),
                biyografi: t("biyografi"),
            }),
            TableKind::Corporate => Payload::Corporate(CorporateUpdate {
                baslik: t("BASLIK"),
                resim_url1: t("resimUrl1"),
                image_url2: t("imageUrl2"),
                icerik: t("ICERIK"),
                kategori: t("KATEGORI"),
                aktif: true,
            }),
            TableKind::EthicsMediation => Payload::Ethics(EthicsUpdate {
                ad: t("Ad"),
                unvan: t("unvan"),
                gorev: t("gorev"),
                tip: t("tip"),
                ilke: t("ilke"),
                delta: t("delta"),
                resim_url: t("resimUrl"),
            }),
            TableKind::Announcement => Payload::Announcement(Announcement {
                id: None,
                baslik: t("baslik").trim().to_string(),
                icerik: t("icerik"),
                durum: t("durum"),
                olusturma_tarihi: None,
                guncelleme_tarihi: None,
                olusturan_kullanici: t("olusturanKullanici"),
            }),
            TableKind::Complaint => Payload::Complaint(Complaint {
                ad_soyad: t("adSoyad"),
                e_mail: optional(state, "eMail"),
                telefon: optional(state, "telefon"),
                konu: t("konu"),
                mesaj: t("mesaj"),
                kategori: optional(state, "kategori"),
                oncelik: optional(state, "oncelik"),
                durum: optional(state, "durum"),
                adres: optional(state, "adres"),
                mahalle: optional(state, "mahalle"),
                ilce: optional(state, "ilce"),
                ..Complaint::default()
            }),
            TableKind::User => Payload::User(UserRequest {
                tcno: t("tcno").trim().to_string(),
                isim: t("isim").trim().to_string(),
                password: optional(state, "password"),
                status: t("status"),
                yetkiler_json: optional(state, "yetkilerJson").unwrap_or_else(|| "{}".to_string()),
            }),
            TableKind::Directorate => Payload::Directorate(DirectorateRequest {
                name: t("name").trim().to_string(),
                manager_name: t("managerName").trim().to_string(),
                email: t("email").trim().to_string(),
                image_url: t("imageUrl").trim().to_string(),
                mud_aciklamasi: t("mudAciklamasi"),
                regulations: t("regulations"),
                biography: t("biography"),
            }),
            TableKind::Muhtar => Payload::Muhtar(MuhtarRequest {
                ad: t("ad").trim().to_string(),
                soyad: t("soyad").trim().to_string(),
                mahalle: t("mahalle").trim().to_string(),
                telefon: t("telefon"),
                eposta: t("eposta"),
                resim_url: t("resimUrl").trim().to_string(),
                konum: t("konum"),
            }),
        }
    }

    pub fn to_json(&self) -> Value {
        let v = match self {
            Payload::Event(r) => serde_json::to_value(r),
            Payload::News(r) => serde_json::to_value(r),
            Payload::Service(r) => serde_json::to_value(r),
            Payload::Report(r) => serde_json::to_value(r),
            Payload::Publication(r) => serde_json::to_value(r),
            Payload::Management(r) => serde_json::to_value(r),
            Payload::Corporate(r) => serde_json::to_value(r),
            Payload::Ethics(r) => serde_json::to_value(r),
            Payload::Announcement(r) => serde_json::to_value(r),
            Payload::Complaint(r) => serde_json::to_value(r),
            Payload::User(r) => serde_json::to_value(r),
            Payload::Directorate(r) => serde_json::to_value(r),
            Payload::Muhtar(r) => serde_json::to_value(r),
        };
        v.unwrap_or(Value::Null)
    }

    /// Send as an update of record `id`.
    pub async fn update(&self, client: &ApiClient, id: i64) -> Result<(), ApiError> {
        match self {
            Payload::Event(r) => events::update(client, id, r).await.map(drop),
            Payload::News(r) => news::update(client, id, r).await,
            Payload::Service(r) => city_services::update(client, id, r).await.map(drop),
            Payload::Report(r) => reports::update(client, id, r).await.map(drop),
            Payload::Publication(r) => publications::update(client, id, r).await.map(drop),
            Payload::Management(r) => management::update(client, id, r).await.map(drop),
            Payload::Corporate(r) => corporate::update(client, id, r).await.map(drop),
            Payload::Ethics(r) => corporate::update_ethics(client, id, r).await.map(drop),
            Payload::Announcement(r) => announcements::update(client, id, r).await.map(drop),
            Payload::Complaint(r) => complaints::update(client, id, r).await.map(drop),
            Payload::User(r) => users::update(client, id, r).await.map(drop),
            Payload::Directorate(r) => directorates::update(client, id, r).await.map(drop),
            Payload::Muhtar(r) => muhtars::update(client, id, r).await.map(drop),
        }
    }

    /// Send as a new record. The corporate tables are edit-only.
    pub async fn create(&self, client: &ApiClient) -> Result<(), ApiError> {
        match self {
            Payload::Event(r) => events::create(client, r).await.map(drop),
            Payload::News(r) => news::create(client, r).await.map(drop),
            Payload::Service(r) => city_services::create(client, r).await.map(drop),
            Payload::Report(r) => reports::create(client, r).await.map(drop),
            Payload::Publication(r) => publications::create(client, r).await.map(drop),
            Payload::Announcement(r) => announcements::create(client, r).await.map(drop),
            Payload::Complaint(r) => complaints::create(client, r).await.map(drop),
            Payload::User(r) => users::create(client, r).await.map(drop),
            Payload::Directorate(r) => directorates::create(client, r).await.map(drop),
            Payload::Muhtar(r) => muhtars::create(client, r).await.map(drop),
            Payload::Management(_) | Payload::Corporate(_) | Payload::Ethics(_) => Err(
                ApiError::Rejected("Bu tablo için yeni kayıt oluşturulamaz".to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn untouched_report_round_trips() {
        let record = json!({
            "raporId": 4, "raporBaslik": "Faaliyet Raporu", "raporUrl": "/r/2024.pdf",
            "raporTarihi": "2024-12-31T00:00:00", "raporDurum": true, "categoryId": 2,
            "categoryName": "Mali"
        });
        let state = FormState::from_record(TableKind::Report, &record);
        let body = Payload::from_state(&state).to_json();
        assert_eq!(
            body,
            json!({
                "raporBaslik": "Faaliyet Raporu", "raporUrl": "/r/2024.pdf", "categoryId": 2,
                "raporTarihi": "2024-12-31T00:00:00", "raporDurum": true
            })
        );
    }

    #[test]
    fn news_date_is_normalized_and_second_image_defaults() {
        let record = json!({"id": 1, "baslik": "Açılış", "tarih": "01.05.2025", "kategoriId": 3,
            "aciklama": "<p>x</p>", "resim1": "/images/resimler/a.png"});
        let body = Payload::from_state(&FormState::from_record(TableKind::News, &record)).to_json();
        assert_eq!(body["tarih"], "2025-05-01");
        assert_eq!(body["resim2"], "/images/resimler/a.png");
        assert_eq!(body["kategoriId"], 3);
    }

    #[test]
    fn corporate_save_is_always_active() {
        let record = json!({"ID": 2, "BASLIK": "Misyon", "ICERIK": "..", "KATEGORI": "misyon"});
        let body = Payload::from_state(&FormState::from_record(TableKind::Corporate, &record)).to_json();
        assert_eq!(body["aktif"], true);
        assert_eq!(body["kategori"], "misyon");
        assert!(body.get("ID").is_none());
    }

    #[test]
    fn blank_password_is_not_sent() {
        let state = FormState::from_record(TableKind::User, &json!({"id": 1, "tcno": "12345678901"}));
        let body = Payload::from_state(&state).to_json();
        assert!(body.get("password").is_none());
        assert_eq!(body["yetkilerJson"], "{}");
    }
}
