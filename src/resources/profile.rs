use serde::Serialize;
use serde_json::Value;

use super::logged;
use crate::api::{ApiClient, ApiError};

pub const UPDATE_PATH: &str = "/api/auth/update-profile";

/// Body of the logged-in user's own profile update. The password pair is
/// sent only when the user asked for a new password.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub isim: String,
    pub profil_foto: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// The backend reports the outcome in a `status` field; anything other than
/// `success` is a refusal carrying its `message`.
pub async fn update(client: &ApiClient, req: &ProfileUpdate) -> Result<(), ApiError> {
    let result = client
        .put::<Value, _>(UPDATE_PATH, req)
        .await
        .and_then(check_status);
    logged("Failed to update profile", result)
}

fn check_status(body: Value) -> Result<(), ApiError> {
    match body.get("status").and_then(Value::as_str) {
        Some("success") | None => Ok(()),
        Some(_) => Err(ApiError::Rejected(
            body.get("message")
                .and_then(Value::as_str)
                .unwrap_or("Güncelleme başarısız.")
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_pair_only_when_changing() {
        let plain = ProfileUpdate { isim: "Ayşe".into(), ..ProfileUpdate::default() };
        assert_eq!(serde_json::to_value(&plain).unwrap(), json!({"isim": "Ayşe", "profilFoto": ""}));
    }

    #[test]
    fn error_status_is_a_refusal() {
        assert!(check_status(json!({"status": "success"})).is_ok());
        let err = check_status(json!({"status": "error", "message": "Mevcut şifre hatalı"})).unwrap_err();
        assert_eq!(err.user_message(), "Mevcut şifre hatalı");
    }
}
