use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::api::ApiError;

/// Response header set on the 401 redirect so the auth middleware can
/// drop the dead session before the response leaves.
pub const SESSION_EXPIRED_HEADER: &str = "x-session-expired";

#[derive(Debug)]
pub enum AppError {
    Api(ApiError),
    Template(askama::Error),
    Session(String),
    PermissionDenied(String),
    Csrf,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "Backend error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::PermissionDenied(code) => write!(f, "Permission denied: {code}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            // The one global conversion: an expired token ends the session.
            AppError::Api(ApiError::Unauthorized) => HttpResponse::SeeOther()
                .insert_header(("Location", "/login"))
                .insert_header((SESSION_EXPIRED_HEADER, "1"))
                .finish(),
            AppError::Api(e) => {
                log::error!("{self}");
                HttpResponse::BadGateway()
                    .content_type("text/plain; charset=utf-8")
                    .body(e.user_message())
            }
            AppError::Session(_) => {
                log::warn!("{self}");
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/login"))
                    .finish()
            }
            AppError::PermissionDenied(code) => {
                log::warn!("{self}");
                HttpResponse::Forbidden()
                    .content_type("text/plain; charset=utf-8")
                    .body(format!("Bu işlem için yetkiniz yok ({code})"))
            }
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            AppError::NotFound => not_found_page(),
            AppError::Template(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// Split a backend failure: an expired token escalates, anything else
/// becomes a message for the inline error box.
pub fn inline(e: ApiError) -> Result<String, AppError> {
    if e.is_unauthorized() {
        Err(AppError::Api(e))
    } else {
        Ok(e.user_message())
    }
}

pub fn not_found_page() -> HttpResponse {
    let html = include_str!("../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn unauthorized_becomes_login_redirect() {
        let resp = AppError::Api(ApiError::Unauthorized).error_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/login");
        assert!(resp.headers().contains_key(SESSION_EXPIRED_HEADER));
    }

    #[test]
    fn inline_keeps_status_errors_local() {
        let err = ApiError::Status { status: 500, message: "boom".into() };
        assert_eq!(inline(err).unwrap(), "boom (status: 500)");
        assert!(inline(ApiError::Unauthorized).is_err());
    }
}
