//! Main page widgets against a mocked backend.

mod common;

use actix_web::test;
use common::*;
use serde_json::json;

#[actix_web::test]
async fn test_hidden_widgets_are_not_fetched() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let permissions = json!({"duyurular": {"goruntuleme": true}});
    let browser = login(&app, &mut server, permissions).await;

    let active = mock_json(
        &mut server,
        "GET",
        "/api/duyuru/aktif",
        200,
        json!([{"id": 1, "baslik": "Su kesintisi", "durum": "AKTIF"}]),
    )
    .await;
    let mut hidden = vec![];
    for path in [
        "/api/sikayet-iletisim/istatistik/toplam",
        "/api/sikayet-iletisim/istatistik/durum/BEKLEMEDE",
        "/api/sikayet-iletisim/acil",
        "/api/haberler",
        "/api/etkinlikler",
    ] {
        hidden.push(server.mock("GET", path).expect(0).create_async().await);
    }

    let resp = test::call_service(&app, browser.get("/panel/mainPage")).await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = body_text(resp).await;
    assert!(html.contains("Aktif Duyuru"));
    assert!(!html.contains("Toplam Şikayet"));

    active.assert_async().await;
    for mock in &hidden {
        mock.assert_async().await;
    }
}

#[actix_web::test]
async fn test_failed_widget_shows_warning_and_others_render() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let permissions = json!({
        "haberler": {"goruntuleme": true},
        "etkinlikler": {"goruntuleme": true}
    });
    let browser = login(&app, &mut server, permissions).await;

    let _news = mock_json(&mut server, "GET", "/api/haberler", 500, json!({"message": "Veritabanı hatası"})).await;
    let _events = mock_json(
        &mut server,
        "GET",
        "/api/etkinlikler",
        200,
        json!([{"id": 1, "baslik": "Konser", "tarih": "2026-05-01"}, {"id": 2, "baslik": "Fuar", "tarih": "2026-06-01"}]),
    )
    .await;

    let resp = test::call_service(&app, browser.get("/panel/mainPage")).await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = body_text(resp).await;
    assert!(html.contains("Haberler: Veritabanı hatası"));
    assert!(html.contains(r#"<span class="card-value">2</span>"#));
    assert!(html.contains(r#"<span class="card-label">Etkinlik</span>"#));
}
