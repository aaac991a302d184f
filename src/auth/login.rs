use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::session::{Permissions, SessionUser};
use crate::api::{ApiClient, ApiError};

pub const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Profile returned by a successful login, with or without the
/// `{status, data}` envelope.
#[derive(Debug, Deserialize)]
pub struct LoginProfile {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub tcno: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub isim: Option<String>,
    #[serde(default, rename = "profilFoto")]
    pub profil_foto: Option<String>,
    #[serde(default)]
    pub permissions: Value,
}

impl LoginProfile {
    pub fn into_session_user(self, login_name: &str) -> SessionUser {
        let username = self
            .username
            .or(self.tcno)
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| login_name.to_string());
        SessionUser {
            token: self.token,
            display_name: self.isim.unwrap_or_else(|| username.clone()),
            profile_photo: self.profil_foto.unwrap_or_default(),
            username,
            permissions: Permissions::from_backend(&self.permissions),
        }
    }
}

/// Exchange credentials for a token. A 401 here means wrong credentials,
/// not an expired session.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<LoginProfile, ApiError> {
    let body: Value = client
        .post(LOGIN_PATH, &Credentials { username, password })
        .await?;
    decode_login(body)
}

pub fn decode_login(body: Value) -> Result<LoginProfile, ApiError> {
    if body.get("status").and_then(Value::as_str) == Some("error") {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Giriş başarısız");
        return Err(ApiError::Rejected(message.to_string()));
    }
    let profile: LoginProfile = serde_json::from_value(crate::resources::unwrap_envelope(body))?;
    if profile.token.is_empty() {
        return Err(ApiError::Rejected("Sunucu oturum anahtarı döndürmedi".to_string()));
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enveloped_and_bare_forms_decode() {
        let wrapped = json!({"status": "success", "data": {"token": "t1", "isim": "Ayşe", "profilFoto": "a.png"}});
        let bare = json!({"token": "t2", "username": "12345678901"});
        let profile = decode_login(wrapped).unwrap();
        assert_eq!(profile.token, "t1");
        assert_eq!(profile.into_session_user("x").profile_photo, "a.png");
        let user = decode_login(bare).unwrap().into_session_user("x");
        assert_eq!(user.username, "12345678901");
        assert_eq!(user.display_name, "12345678901");
    }

    #[test]
    fn error_status_and_missing_token_are_rejected() {
        let err = decode_login(json!({"status": "error", "message": "Hatalı şifre"})).unwrap_err();
        assert_eq!(err.user_message(), "Hatalı şifre");
        assert!(decode_login(json!({"data": {}})).is_err());
    }
}
