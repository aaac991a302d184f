use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::api::ApiError;
use crate::auth::session::{self, get_token};
use crate::auth::validate::{validate_password, validate_tc_no};
use crate::auth::{csrf, login, rate_limit::RateLimiter};
use crate::errors::{AppError, render};
use crate::state::AppState;
use crate::templates_structs::LoginTemplate;

const HOME: &str = "/panel/mainPage";

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(state: &AppState, session: &Session, error: Option<String>, username: &str) -> Result<HttpResponse, AppError> {
    render(LoginTemplate {
        error,
        app_name: state.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
        username: username.to_string(),
    })
}

pub async fn login_page(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    // If already logged in, go straight to the panel
    if get_token(&session).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", HOME))
            .finish());
    }
    login_form(&state, &session, None, "")
}

pub async fn login_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check before anything reaches the backend
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("[auth] login blocked for {ip}");
        let message = "Çok fazla başarısız deneme. Lütfen daha sonra tekrar deneyin.".to_string();
        return login_form(&state, &session, Some(message), &form.username);
    }

    let username = form.username.trim();
    if let Some(error) = validate_tc_no(username).or_else(|| validate_password(&form.password)) {
        return login_form(&state, &session, Some(error), username);
    }

    match login::login(&state.api, username, &form.password).await {
        Ok(profile) => {
            limiter.clear(ip);
            let user = profile.into_session_user(username);
            log::info!("[auth] {} logged in with {} permissions", user.username, user.permissions.0.len());
            session::start(&session, &user)?;
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", HOME))
                .finish())
        }
        Err(e) => {
            let message = match &e {
                // At login a 401 means wrong credentials, not an expired session
                ApiError::Unauthorized | ApiError::Status { status: 400 | 403, .. } => {
                    limiter.record_failure(ip);
                    "TC kimlik no veya parola hatalı".to_string()
                }
                ApiError::Rejected(message) => {
                    limiter.record_failure(ip);
                    message.clone()
                }
                other => other.user_message(),
            };
            log::warn!("[auth] login failed for {username}: {e}");
            login_form(&state, &session, Some(message), username)
        }
    }
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
