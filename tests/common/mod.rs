//! Shared test infrastructure for the HTTP tests.
//!
//! Every test runs the real route table against a mockito server standing in
//! for the municipality backend. Sessions travel as the signed cookie the
//! panel sets, so helpers thread it from one request to the next.

#![allow(dead_code)]

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, body::MessageBody, test, web};
use mockito::{Mock, ServerGuard};
use regex::Regex;
use serde_json::{Value, json};

use belpanel::auth::rate_limit::RateLimiter;
use belpanel::config::AppConfig;
use belpanel::routes;
use belpanel::state::AppState;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TC_NO: &str = "12345678901";
pub const PASSWORD: &str = "parola123";
pub const TOKEN: &str = "test-token";

pub const MODULES: [&str; 9] = [
    "duyurular",
    "sikayetler",
    "haberler",
    "etkinlikler",
    "hizmetler",
    "yayinlar",
    "raporlar",
    "kurumsal",
    "kullanicilar",
];

// ============================================================================
// APP SETUP
// ============================================================================

/// Backend double.
pub async fn backend() -> ServerGuard {
    mockito::Server::new_async().await
}

/// Panel wired against the backend at `url`. Takes the URL by value so the
/// returned service holds no borrow of the mock server.
pub async fn init_app(
    url: String,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let state = AppState::new(&AppConfig::for_backend(&url)).expect("state");
    test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[7u8; 64]))
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(RateLimiter::new()))
            .configure(routes::configure),
    )
    .await
}

/// Every module with every action.
pub fn all_permissions() -> Value {
    let actions = json!({"goruntuleme": true, "duzenleme": true, "silme": true, "ekleme": true});
    let mut map = serde_json::Map::new();
    for module in MODULES {
        map.insert(module.to_string(), actions.clone());
    }
    Value::Object(map)
}

pub async fn mock_login(server: &mut ServerGuard, permissions: Value) -> Mock {
    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"token": TOKEN, "isim": "Test Yönetici", "permissions": permissions}).to_string())
        .create_async()
        .await
}

/// JSON answer for `method path`.
pub async fn mock_json(server: &mut ServerGuard, method: &str, path: &str, status: usize, body: Value) -> Mock {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

// ============================================================================
// SESSION HELPERS
// ============================================================================

/// Session cookie set by a response, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn extract_csrf(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).expect("regex");
    re.captures(html)
        .map(|c| c[1].to_string())
        .expect("csrf token in page")
}

/// A logged-in browser: its cookie and the CSRF token of its session.
pub struct Browser {
    pub cookie: Cookie<'static>,
    pub csrf: String,
}

impl Browser {
    /// Keep the newest cookie the panel handed out.
    pub fn update<B>(&mut self, resp: &ServiceResponse<B>) {
        if let Some(cookie) = session_cookie(resp) {
            self.cookie = cookie;
        }
    }

    pub fn get(&self, uri: &str) -> Request {
        test::TestRequest::get()
            .uri(uri)
            .cookie(self.cookie.clone())
            .to_request()
    }

    /// Form POST with the session's CSRF token added.
    pub fn post(&self, uri: &str, fields: &[(&str, &str)]) -> Request {
        let mut form: Vec<(&str, &str)> = fields.to_vec();
        form.push(("csrf_token", self.csrf.as_str()));
        test::TestRequest::post()
            .uri(uri)
            .cookie(self.cookie.clone())
            .set_form(form)
            .to_request()
    }
}

/// Log in through the real form against the mocked backend.
pub async fn login<S, B>(app: &S, server: &mut ServerGuard, permissions: Value) -> Browser
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let _login = mock_login(server, permissions).await;

    let resp = test::call_service(app, test::TestRequest::get().uri("/login").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie from login page");
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8");
    let csrf = extract_csrf(&html);

    let mut browser = Browser { cookie, csrf };
    let req = browser.post("/login", &[("username", TC_NO), ("password", PASSWORD)]);
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 303, "login should redirect");
    assert_eq!(location(&resp), "/panel/mainPage");
    browser.update(&resp);
    browser
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8")
}

// ============================================================================
// FORM SCRAPING
// ============================================================================

fn unescape(s: &str) -> String {
    let re = Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|quot|amp|lt|gt|apos);").expect("regex");
    re.replace_all(s, |c: &regex::Captures| {
        let ent = &c[1];
        let decoded = match ent {
            "quot" => Some('"'),
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "apos" => Some('\''),
            _ if ent.starts_with("#x") || ent.starts_with("#X") => {
                u32::from_str_radix(&ent[2..], 16).ok().and_then(char::from_u32)
            }
            _ => ent[1..].parse::<u32>().ok().and_then(char::from_u32),
        };
        decoded.map(String::from).unwrap_or_else(|| c[0].to_string())
    })
    .into_owned()
}

fn attr(attrs: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"(?:^|\s){name}(?:="([^"]*)")?(?:\s|$)"#)).expect("regex");
    re.captures(attrs)
        .map(|c| c.get(1).map(|m| unescape(m.as_str())).unwrap_or_default())
}

/// What a browser would submit for the rendered record form, left untouched:
/// enabled inputs with their values, checked checkboxes as `on`, textareas
/// without the newline the parser drops, and each select's selected option
/// (or its first one). Hidden inputs are skipped; `Browser::post` adds the
/// CSRF token.
pub fn scrape_form(html: &str) -> Vec<(String, String)> {
    let form_re = Regex::new(r#"(?s)<form class="record-form".*?</form>"#).expect("regex");
    let form = form_re.find(html).map(|m| m.as_str()).expect("record form in page");
    let mut fields = vec![];

    let input_re = Regex::new(r#"<input ([^>]*)>"#).expect("regex");
    for c in input_re.captures_iter(form) {
        let attrs = &c[1];
        let Some(name) = attr(attrs, "name") else { continue };
        if attr(attrs, "disabled").is_some() {
            continue;
        }
        match attr(attrs, "type").as_deref() {
            Some("hidden") | Some("file") => {}
            Some("checkbox") => {
                if attr(attrs, "checked").is_some() {
                    fields.push((name, "on".to_string()));
                }
            }
            _ => fields.push((name, attr(attrs, "value").unwrap_or_default())),
        }
    }

    let textarea_re = Regex::new(r#"(?s)<textarea ([^>]*)>(.*?)</textarea>"#).expect("regex");
    for c in textarea_re.captures_iter(form) {
        let Some(name) = attr(&c[1], "name") else { continue };
        if attr(&c[1], "disabled").is_some() {
            continue;
        }
        let text = c[2].strip_prefix('\n').unwrap_or(&c[2]);
        fields.push((name, unescape(text)));
    }

    let select_re = Regex::new(r#"(?s)<select ([^>]*)>(.*?)</select>"#).expect("regex");
    let option_re = Regex::new(r#"<option value="([^"]*)"( selected)?>"#).expect("regex");
    for c in select_re.captures_iter(form) {
        let Some(name) = attr(&c[1], "name") else { continue };
        let options: Vec<_> = option_re.captures_iter(&c[2]).collect();
        let chosen = options
            .iter()
            .find(|o| o.get(2).is_some())
            .or(options.first())
            .map(|o| unescape(&o[1]))
            .unwrap_or_default();
        fields.push((name, chosen));
    }
    fields
}

/// Borrowed view of scraped fields for `Browser::post`.
pub fn as_pairs(fields: &[(String, String)]) -> Vec<(&str, &str)> {
    fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}
