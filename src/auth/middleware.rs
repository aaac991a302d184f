use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::errors::SESSION_EXPIRED_HEADER;

/// Checks for a backend token in the session and redirects to /login
/// without one. A response marked as session-expired (the backend said 401)
/// purges the session on its way out.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_token = session
        .get::<String>("token")
        .unwrap_or(None)
        .is_some_and(|t| !t.is_empty());

    if !has_token {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    let mut res = next.call(req).await?;
    if res.headers().contains_key(SESSION_EXPIRED_HEADER) {
        log::info!("[auth] backend rejected the token, ending session");
        res.request().get_session().purge();
        res.headers_mut().remove(SESSION_EXPIRED_HEADER);
    }
    Ok(res.map_into_left_body())
}
