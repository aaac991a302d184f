//! Login, session guard and routing tests against a mocked backend.

mod common;

use actix_web::test;
use common::*;
use serde_json::json;

#[actix_web::test]
async fn test_panel_requires_login() {
    let server = backend().await;
    let app = init_app(server.url()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/panel/duyurular").to_request()).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_login_success_redirects_to_main_page() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;

    let browser = login(&app, &mut server, all_permissions()).await;

    // Already logged in: the login page sends the user on
    let resp = test::call_service(&app, browser.get("/login")).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/panel/mainPage");
}

#[actix_web::test]
async fn test_login_wrong_credentials_shows_error() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let _rejected = mock_json(&mut server, "POST", "/api/auth/login", 401, json!({"message": "Unauthorized"})).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    let cookie = session_cookie(&resp).expect("cookie");
    let csrf = extract_csrf(&body_text(resp).await);
    let browser = Browser { cookie, csrf };

    let resp = test::call_service(&app, browser.post("/login", &[("username", TC_NO), ("password", "yanlis")])).await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = body_text(resp).await;
    assert!(html.contains("TC kimlik no veya parola hatalı"));
}

#[actix_web::test]
async fn test_malformed_tc_no_never_reaches_backend() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let never = server.mock("POST", "/api/auth/login").expect(0).create_async().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    let cookie = session_cookie(&resp).expect("cookie");
    let csrf = extract_csrf(&body_text(resp).await);
    let browser = Browser { cookie, csrf };

    let resp = test::call_service(&app, browser.post("/login", &[("username", "0123"), ("password", "x")])).await;
    let html = body_text(resp).await;
    assert!(html.contains("11 haneli"));
    never.assert_async().await;
}

#[actix_web::test]
async fn test_login_without_csrf_is_rejected() {
    let server = backend().await;
    let app = init_app(server.url()).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", TC_NO), ("password", PASSWORD), ("csrf_token", "forged")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);
}

#[actix_web::test]
async fn test_backend_401_ends_session() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let mut browser = login(&app, &mut server, all_permissions()).await;
    let _expired = mock_json(&mut server, "GET", "/api/duyuru", 401, json!({})).await;

    let resp = test::call_service(&app, browser.get("/panel/duyurular")).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");
    assert!(resp.headers().get("x-session-expired").is_none());
    browser.update(&resp);

    // The purged session no longer gets past the guard
    let resp = test::call_service(&app, browser.get("/panel/duyurular")).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_missing_permission_is_forbidden() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let perms = json!({"duyurular": {"goruntuleme": true}});
    let browser = login(&app, &mut server, perms).await;

    let resp = test::call_service(&app, browser.get("/panel/haberler")).await;
    assert_eq!(resp.status().as_u16(), 403);
}

#[actix_web::test]
async fn test_logout_clears_session() {
    let mut server = backend().await;
    let app = init_app(server.url()).await;
    let mut browser = login(&app, &mut server, all_permissions()).await;

    let resp = test::call_service(&app, browser.post("/panel/logout", &[])).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");
    browser.update(&resp);

    let resp = test::call_service(&app, browser.get("/panel/mainPage")).await;
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_unknown_path_gets_404_page() {
    let server = backend().await;
    let app = init_app(server.url()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/bilinmeyen/sayfa").to_request()).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_root_redirects_to_main_page() {
    let server = backend().await;
    let app = init_app(server.url()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/panel/mainPage");
}
