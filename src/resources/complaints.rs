use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{logged, null_as_default};
use crate::api::{ApiClient, ApiError};

pub const BASE: &str = "/api/sikayet-iletisim";

pub const CATEGORY_OPTIONS: &[&str] = &[
    "ALTYAPI", "TRAFIK", "TEMIZLIK", "PARK_BAHCE", "AYDINLATMA", "GUVENLIK",
    "SAGLIK", "EGITIM", "KULTUR", "SPOR", "DIGER",
];

pub const PRIORITY_OPTIONS: &[&str] = &["DÜŞÜK", "NORMAL", "YÜKSEK"];

pub const STATUS_OPTIONS: &[&str] = &["BEKLEMEDE", "INCELENIYOR", "YANITLANDI", "KAPANDI"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ad_soyad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub konu: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mesaj: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oncelik: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub olusturma_tarihi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guncelleme_tarihi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yanit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yanitlayan_personel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yanit_tarihi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adres: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mahalle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilce: Option<String>,
}

impl Complaint {
    pub fn is_answered(&self) -> bool {
        self.yanit.as_deref().is_some_and(|y| !y.trim().is_empty())
    }
}

pub async fn list(client: &ApiClient) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints", client.get(BASE).await)
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Complaint, ApiError> {
    logged("Failed to fetch complaint", client.get(&format!("{BASE}/{id}")).await)
}

pub async fn create(client: &ApiClient, dto: &Complaint) -> Result<Complaint, ApiError> {
    logged("Failed to create complaint", client.post(BASE, dto).await)
}

pub async fn update(client: &ApiClient, id: i64, dto: &Complaint) -> Result<Complaint, ApiError> {
    logged("Failed to update complaint", client.put(&format!("{BASE}/{id}"), dto).await)
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let result = client.delete::<Value>(&format!("{BASE}/{id}")).await.map(drop);
    logged("Failed to delete complaint", result)
}

pub async fn by_status(client: &ApiClient, durum: &str) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints by status", client.get(&format!("{BASE}/durum/{durum}")).await)
}

pub async fn update_status(client: &ApiClient, id: i64, yeni_durum: &str) -> Result<Complaint, ApiError> {
    logged(
        "Failed to update complaint status",
        client
            .put_query(&format!("{BASE}/{id}/durum"), &[("yeniDurum", yeni_durum)])
            .await,
    )
}

pub async fn by_category(client: &ApiClient, kategori: &str) -> Result<Vec<Complaint>, ApiError> {
    logged(
        "Failed to fetch complaints by category",
        client.get(&format!("{BASE}/kategori/{kategori}")).await,
    )
}

pub async fn by_priority(client: &ApiClient, oncelik: &str) -> Result<Vec<Complaint>, ApiError> {
    logged(
        "Failed to fetch complaints by priority",
        client.get(&format!("{BASE}/oncelik/{oncelik}")).await,
    )
}

pub async fn update_priority(client: &ApiClient, id: i64, yeni_oncelik: &str) -> Result<Complaint, ApiError> {
    logged(
        "Failed to update complaint priority",
        client
            .put_query(&format!("{BASE}/{id}/oncelik"), &[("yeniOncelik", yeni_oncelik)])
            .await,
    )
}

pub async fn search(client: &ApiClient, q: &str) -> Result<Vec<Complaint>, ApiError> {
    logged(
        "Failed to search complaints",
        client.get_query(&format!("{BASE}/arama"), &[("q", q)]).await,
    )
}

pub async fn by_status_and_search(client: &ApiClient, durum: &str, q: &str) -> Result<Vec<Complaint>, ApiError> {
    logged(
        "Failed to search complaints by status",
        client
            .get_query(&format!("{BASE}/durum-ve-arama"), &[("durum", durum), ("q", q)])
            .await,
    )
}

pub async fn reply(
    client: &ApiClient,
    id: i64,
    yanit: &str,
    yanitlayan_personel: &str,
) -> Result<Complaint, ApiError> {
    logged(
        "Failed to reply to complaint",
        client
            .post_query(
                &format!("{BASE}/{id}/yanit"),
                &[("yanit", yanit), ("yanitlayanPersonel", yanitlayan_personel)],
            )
            .await,
    )
}

pub async fn unanswered(client: &ApiClient) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch unanswered complaints", client.get(&format!("{BASE}/yanitlanmamis")).await)
}

pub async fn answered(client: &ApiClient) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch answered complaints", client.get(&format!("{BASE}/yanitlanmis")).await)
}

pub async fn by_neighbourhood(client: &ApiClient, mahalle: &str) -> Result<Vec<Complaint>, ApiError> {
    logged(
        "Failed to fetch complaints by neighbourhood",
        client.get(&format!("{BASE}/mahalle/{mahalle}")).await,
    )
}

pub async fn by_district(client: &ApiClient, ilce: &str) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints by district", client.get(&format!("{BASE}/ilce/{ilce}")).await)
}

pub async fn last_days(client: &ApiClient, days: u32) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch recent complaints", client.get(&format!("{BASE}/son-gunler/{days}")).await)
}

pub async fn by_email(client: &ApiClient, email: &str) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints by email", client.get(&format!("{BASE}/email/{email}")).await)
}

pub async fn by_phone(client: &ApiClient, telefon: &str) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints by phone", client.get(&format!("{BASE}/telefon/{telefon}")).await)
}

pub async fn by_staff(client: &ApiClient, personel: &str) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints by staff", client.get(&format!("{BASE}/personel/{personel}")).await)
}

pub async fn count_total(client: &ApiClient) -> Result<i64, ApiError> {
    logged("Failed to fetch complaint total", client.get(&format!("{BASE}/istatistik/toplam")).await)
}

pub async fn count_by_status(client: &ApiClient, durum: &str) -> Result<i64, ApiError> {
    logged(
        "Failed to fetch complaint count by status",
        client.get(&format!("{BASE}/istatistik/durum/{durum}")).await,
    )
}

pub async fn count_by_category(client: &ApiClient, kategori: &str) -> Result<i64, ApiError> {
    logged(
        "Failed to fetch complaint count by category",
        client.get(&format!("{BASE}/istatistik/kategori/{kategori}")).await,
    )
}

pub async fn urgent(client: &ApiClient) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch urgent complaints", client.get(&format!("{BASE}/acil")).await)
}

pub async fn sorted_by_priority_and_date(client: &ApiClient) -> Result<Vec<Complaint>, ApiError> {
    logged(
        "Failed to fetch complaints sorted by priority",
        client.get(&format!("{BASE}/sirali/oncelik-tarih")).await,
    )
}

pub async fn sorted_by_date(client: &ApiClient) -> Result<Vec<Complaint>, ApiError> {
    logged("Failed to fetch complaints sorted by date", client.get(&format!("{BASE}/sirali/tarih")).await)
}
