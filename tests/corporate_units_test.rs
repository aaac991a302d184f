//! Directorates, neighbourhood heads and the profile settings page.

mod common;

use actix_web::test;
use common::*;
use mockito::Matcher;
use serde_json::json;

#[actix_web::test]
async fn test_create_directorate_posts_declared_fields() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let mut browser = login(&app, &mut server, all_permissions()).await;

    let create = server
        .mock("POST", "/rest/api/mudurlukler/create")
        .match_body(Matcher::Json(json!({
            "name": "Fen İşleri Müdürlüğü",
            "managerName": "Ali Veli",
            "email": "fen@gebze.bel.tr",
            "imageUrl": "/images/resimler/fen.png",
            "mudAciklamasi": "",
            "regulations": "",
            "biography": ""
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": 3}).to_string())
        .expect(1)
        .create_async()
        .await;
    let _list = mock_json(
        &mut server,
        "GET",
        "/rest/api/mudurlukler/list",
        200,
        json!([{"id": 3, "name": "Fen İşleri Müdürlüğü", "managerName": "Ali Veli", "email": "fen@gebze.bel.tr"}]),
    )
    .await;

    let req = browser.post(
        "/panel/kurumsal/mudurlukler",
        &[
            ("name", " Fen İşleri Müdürlüğü "),
            ("managerName", "Ali Veli"),
            ("email", "fen@gebze.bel.tr"),
            ("imageUrl", "/images/resimler/fen.png"),
            ("mudAciklamasi", ""),
            ("regulations", ""),
            ("biography", ""),
        ],
    );
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/panel/kurumsal/mudurlukler");
    browser.update(&resp);
    create.assert_async().await;

    let resp = test::call_service(&app, browser.get("/panel/kurumsal/mudurlukler")).await;
    let html = body_text(resp).await;
    assert!(html.contains("Müdürlük oluşturuldu."));
    assert!(html.contains("/panel/kurumsal/mudurlukler/3/edit"));
}

#[actix_web::test]
async fn test_directorate_bulk_delete_reports_refused_item() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let mut browser = login(&app, &mut server, all_permissions()).await;

    let first = mock_json(&mut server, "DELETE", "/rest/api/mudurlukler/delete/1", 200, json!(true)).await;
    let second = mock_json(&mut server, "DELETE", "/rest/api/mudurlukler/delete/2", 200, json!(false)).await;
    let _list = mock_json(&mut server, "GET", "/rest/api/mudurlukler/list", 200, json!([{"id": 2, "name": "Zabıta"}])).await;

    let req = browser.post(
        "/panel/kurumsal/mudurlukler/bulk",
        &[("bulk_action", "delete"), ("sel_1", "on"), ("sel_2", "on")],
    );
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 303);
    browser.update(&resp);
    first.assert_async().await;
    second.assert_async().await;

    let html = body_text(test::call_service(&app, browser.get("/panel/kurumsal/mudurlukler")).await).await;
    assert!(html.contains("1 kayıt silindi."));
    assert!(html.contains("#2 (Silinemedi)"));
}

#[actix_web::test]
async fn test_muhtar_edit_falls_back_to_list_and_saves() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let mut browser = login(&app, &mut server, all_permissions()).await;

    let _direct = mock_json(&mut server, "GET", "/api/muhtarlar/8", 404, json!({"message": "yok"})).await;
    let _list = mock_json(
        &mut server,
        "GET",
        "/api/muhtarlar",
        200,
        json!({"content": [{
            "id": 8, "ad": "Hasan", "soyad": "Demir", "mahalle": "Osman Yılmaz",
            "telefon": "0262 111 22 33", "eposta": null, "resimUrl": "", "konum": "40.80,29.43"
        }]}),
    )
    .await;
    let put = server
        .mock("PUT", "/api/muhtarlar/update/8")
        .match_body(Matcher::Json(json!({
            "ad": "Hasan",
            "soyad": "Demir",
            "mahalle": "Osman Yılmaz",
            "telefon": "0262 111 22 44",
            "eposta": "",
            "resimUrl": "",
            "konum": "40.80,29.43"
        })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let resp = test::call_service(&app, browser.get("/panel/kurumsal/muhtarlar/8/edit")).await;
    assert_eq!(resp.status().as_u16(), 200);
    browser.update(&resp);
    let mut fields = scrape_form(&body_text(resp).await);
    for (name, value) in fields.iter_mut() {
        if name == "telefon" {
            *value = "0262 111 22 44".to_string();
        }
    }

    let resp = test::call_service(&app, browser.post("/panel/kurumsal/muhtarlar/8", &as_pairs(&fields))).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/panel/kurumsal/muhtarlar");
    put.assert_async().await;
}

#[actix_web::test]
async fn test_muhtar_requires_mahalle() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let browser = login(&app, &mut server, all_permissions()).await;

    let create = server
        .mock("POST", "/api/muhtarlar/create")
        .expect(0)
        .create_async()
        .await;

    let req = browser.post("/panel/kurumsal/muhtarlar", &[("ad", "Hasan"), ("soyad", "Demir"), ("mahalle", " ")]);
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(body_text(resp).await.contains("Mahalle zorunludur"));
    create.assert_async().await;
}

#[actix_web::test]
async fn test_settings_update_refreshes_header_name() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let mut browser = login(&app, &mut server, all_permissions()).await;

    let update = server
        .mock("PUT", "/api/auth/update-profile")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_body(Matcher::Json(json!({
            "isim": "Ayşe Yılmaz",
            "profilFoto": "/images/resimler/ayse.png",
            "password": "eskiparola",
            "newPassword": "yeniparola"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"status": "success"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let req = browser.post(
        "/panel/settings",
        &[
            ("isim", "Ayşe Yılmaz"),
            ("profilFoto", "/images/resimler/ayse.png"),
            ("password", "eskiparola"),
            ("newPassword", "yeniparola"),
            ("confirmPassword", "yeniparola"),
        ],
    );
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/panel/settings");
    browser.update(&resp);
    update.assert_async().await;

    let html = body_text(test::call_service(&app, browser.get("/panel/settings")).await).await;
    assert!(html.contains("Ayarlar başarıyla güncellendi."));
    assert!(html.contains(r#"<a class="name" href="/panel/settings">Ayşe Yılmaz</a>"#));
    assert!(html.contains(r#"value="/images/resimler/ayse.png""#));
}

#[actix_web::test]
async fn test_settings_mismatched_passwords_send_nothing() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let browser = login(&app, &mut server, all_permissions()).await;

    let update = server
        .mock("PUT", "/api/auth/update-profile")
        .expect(0)
        .create_async()
        .await;

    let req = browser.post(
        "/panel/settings",
        &[
            ("isim", "Ayşe"),
            ("password", "eskiparola"),
            ("newPassword", "yeniparola"),
            ("confirmPassword", "baskaparola"),
        ],
    );
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = body_text(resp).await;
    assert!(html.contains("Şifreler eşleşmiyor"));
    assert!(!html.contains("eskiparola"));
    update.assert_async().await;
}

#[actix_web::test]
async fn test_settings_backend_refusal_is_shown() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let browser = login(&app, &mut server, all_permissions()).await;

    let _update = mock_json(
        &mut server,
        "PUT",
        "/api/auth/update-profile",
        200,
        json!({"status": "error", "message": "Mevcut şifre hatalı"}),
    )
    .await;

    let req = browser.post(
        "/panel/settings",
        &[("isim", "Ayşe"), ("password", "yanlis"), ("newPassword", "yeniparola"), ("confirmPassword", "yeniparola")],
    );
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(body_text(resp).await.contains("Mevcut şifre hatalı"));
}
