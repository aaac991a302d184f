//! Resource functions against a mocked backend: paths, query parameters
//! and the body shapes the backend answers with.

use mockito::Matcher;
use serde_json::json;

use belpanel::api::{ApiClient, ApiError};
use belpanel::resources::{committees, complaints, corporate, reports};

async fn client(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&server.url())
        .expect("client")
        .with_token(Some("t".to_string()))
}

#[tokio::test]
async fn test_status_update_sends_query_parameter_and_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/sikayet-iletisim/3/durum")
        .match_query(Matcher::UrlEncoded("yeniDurum".into(), "KAPANDI".into()))
        .match_header("authorization", "Bearer t")
        .with_status(200)
        .with_body(json!({"id": 3, "adSoyad": "Ali Veli", "konu": "Yol", "durum": "KAPANDI"}).to_string())
        .create_async()
        .await;

    let updated = complaints::update_status(&client(&server).await, 3, "KAPANDI").await.expect("update");
    assert_eq!(updated.durum.as_deref(), Some("KAPANDI"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_reply_posts_answer_and_staff_name() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/sikayet-iletisim/8/yanit")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("yanit".into(), "Ekip yonlendirildi".into()),
            Matcher::UrlEncoded("yanitlayanPersonel".into(), "Zabita".into()),
        ]))
        .with_status(200)
        .with_body(json!({"id": 8, "yanit": "Ekip yonlendirildi"}).to_string())
        .create_async()
        .await;

    let answered = complaints::reply(&client(&server).await, 8, "Ekip yonlendirildi", "Zabita")
        .await
        .expect("reply");
    assert!(answered.is_answered());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_statistics_decode_plain_numbers() {
    let mut server = mockito::Server::new_async().await;
    let _total = server
        .mock("GET", "/api/sikayet-iletisim/istatistik/toplam")
        .with_status(200)
        .with_body("42")
        .create_async()
        .await;

    assert_eq!(complaints::count_total(&client(&server).await).await.expect("count"), 42);
}

#[tokio::test]
async fn test_committee_list_accepts_wrapped_answer() {
    let mut server = mockito::Server::new_async().await;
    let _list = server
        .mock("GET", "/api/kurumsal/etik-komisyonu")
        .with_status(200)
        .with_body(json!({"etikKomisyonu": [{"id": 1, "ad": "Ayşe Kaya"}, {"id": 2, "ad": "Mehmet Demir"}]}).to_string())
        .create_async()
        .await;

    let members = committees::list(&client(&server).await).await.expect("list");
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn test_report_list_flattens_category_groups() {
    let mut server = mockito::Server::new_async().await;
    let _groups = server
        .mock("GET", "/api/raporlar/category/list")
        .with_status(200)
        .with_body(
            json!([
                {"categoryId": 1, "categoryName": "Mali", "raporlar": [{"raporId": 4, "raporBaslik": "Bütçe"}]},
                {"categoryId": 2, "categoryName": "Faaliyet", "raporlar": [{"raporId": 5, "raporBaslik": "2025"}]}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let all = reports::list(&client(&server).await).await.expect("list");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_active_corporate_record_prefers_flagged_one() {
    let mut server = mockito::Server::new_async().await;
    let _records = server
        .mock("GET", "/api/kurumsal/kategori/vizyon")
        .with_status(200)
        .with_body(
            json!([
                {"ID": 1, "BASLIK": "Eski vizyon", "AKTIF": 0},
                {"ID": 2, "BASLIK": "Yeni vizyon", "AKTIF": 1}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let active = corporate::active_by_category(&client(&server).await, "vizyon")
        .await
        .expect("fetch")
        .expect("record");
    assert_eq!(active.baslik, "Yeni vizyon");
}

#[tokio::test]
async fn test_error_message_comes_from_body() {
    let mut server = mockito::Server::new_async().await;
    let _fail = server
        .mock("DELETE", "/api/raporlar/delete/9")
        .with_status(409)
        .with_body(json!({"error": "Rapor yayında"}).to_string())
        .create_async()
        .await;

    let err = reports::delete(&client(&server).await, 9).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 409, .. }));
    assert_eq!(err.user_message(), "Rapor yayında (status: 409)");
}
