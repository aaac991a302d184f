use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::session::api_client;
use crate::errors::{AppError, inline};
use crate::resources::files;
use crate::state::AppState;

/// Largest image the panel forwards to the backend.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

/// Keep the last path segment and drop anything that is not a plain
/// file-name character.
fn clean_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");
    base.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

fn failure(status: actix_web::http::StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

/// POST `/panel/upload?filename=...` with the raw file as the body.
/// Answers `{"url": "/images/resimler/<name>"}` for the image inputs.
pub async fn upload(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    use actix_web::http::StatusCode;

    crate::auth::csrf::validate_csrf(
        &session,
        req.headers()
            .get("x-csrf-token")
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
    )?;

    let name = clean_name(query.filename.as_deref().unwrap_or(""));
    if name.is_empty() || body.is_empty() {
        return Ok(failure(StatusCode::BAD_REQUEST, "Dosya seçilmedi"));
    }
    if body.len() > MAX_UPLOAD_BYTES {
        return Ok(failure(StatusCode::PAYLOAD_TOO_LARGE, "Dosya çok büyük"));
    }
    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| ct.starts_with("image/"));

    let client = api_client(&session, &state.api)?;
    match files::upload_image(&client, &name, content_type, body.to_vec()).await {
        Ok(url) => {
            log::info!("[upload] stored {name} as {url}");
            Ok(HttpResponse::Ok().json(json!({ "url": url })))
        }
        Err(e) => Ok(failure(StatusCode::BAD_GATEWAY, &inline(e)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_lose_paths_and_odd_characters() {
        assert_eq!(clean_name("../../etc/passwd"), "passwd");
        assert_eq!(clean_name("C:\\foto\\baskan 1.jpg"), "baskan1.jpg");
        assert_eq!(clean_name("çiçek.png"), "çiçek.png");
    }
}
