use actix_session::Session;
use serde_json::Value;

use crate::api::ApiClient;
use crate::errors::AppError;

/// Actions the backend grants per module, in the order it lists them.
pub const ACTIONS: [&str; 4] = ["goruntuleme", "duzenleme", "silme", "ekleme"];

/// Wrapper around permission codes with a `has()` method for use in Askama templates.
/// Codes are `module.action`, e.g. `kurumsal.duzenleme`.
#[derive(Debug, Clone, Default)]
pub struct Permissions(pub Vec<String>);

impl Permissions {
    pub fn has(&self, code: &str) -> bool {
        self.0.iter().any(|p| p == code)
    }

    pub fn from_csv(csv: &str) -> Self {
        let codes = csv
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Permissions(codes)
    }

    /// Flatten the backend's `{module: {action: bool}}` map.
    pub fn from_backend(map: &Value) -> Self {
        let mut codes = vec![];
        if let Some(modules) = map.as_object() {
            for (module, actions) in modules {
                for action in ACTIONS {
                    if actions.get(action).is_some_and(crate::resources::truthy) {
                        codes.push(format!("{module}.{action}"));
                    }
                }
            }
        }
        codes.sort();
        Permissions(codes)
    }

    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }
}

/// What the panel keeps about a logged-in user.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub token: String,
    pub username: String,
    pub display_name: String,
    pub profile_photo: String,
    pub permissions: Permissions,
}

pub fn start(session: &Session, user: &SessionUser) -> Result<(), AppError> {
    session.renew();
    let store = |key: &str, value: &str| {
        session
            .insert(key, value)
            .map_err(|e| AppError::Session(format!("Failed to store {key}: {e}")))
    };
    store("token", &user.token)?;
    store("username", &user.username)?;
    store("display_name", &user.display_name)?;
    store("profile_photo", &user.profile_photo)?;
    store("permissions", &user.permissions.to_csv())?;
    Ok(())
}

pub fn get_token(session: &Session) -> Option<String> {
    session
        .get::<String>("token")
        .unwrap_or(None)
        .filter(|t| !t.is_empty())
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

/// Name shown in the header; falls back to the login name.
pub fn get_display_name(session: &Session) -> Option<String> {
    session
        .get::<String>("display_name")
        .unwrap_or(None)
        .filter(|n| !n.trim().is_empty())
}

pub fn get_profile_photo(session: &Session) -> String {
    session
        .get::<String>("profile_photo")
        .unwrap_or(None)
        .unwrap_or_default()
}

/// Keep the header in step after the user edits their own profile.
pub fn update_profile(session: &Session, display_name: &str, profile_photo: &str) -> Result<(), AppError> {
    session
        .insert("display_name", display_name)
        .and_then(|_| session.insert("profile_photo", profile_photo))
        .map_err(|e| AppError::Session(format!("Failed to store profile: {e}")))
}

pub fn get_permissions(session: &Session) -> Result<Permissions, String> {
    match session.get::<String>("permissions") {
        Ok(Some(csv)) => Ok(Permissions::from_csv(&csv)),
        Ok(None) => Err("No permissions in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

pub fn set_flash(session: &Session, message: impl Into<String>) {
    let _ = session.insert("flash", message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// Check permission; returns Err(AppError) if denied.
pub fn require_permission(session: &Session, code: &str) -> Result<(), AppError> {
    let permissions = get_permissions(session)
        .map_err(|e| AppError::Session(format!("Failed to get permissions: {}", e)))?;

    if permissions.has(code) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(code.to_string()))
    }
}

/// Backend client carrying this session's bearer token.
pub fn api_client(session: &Session, base: &ApiClient) -> Result<ApiClient, AppError> {
    let token = get_token(session).ok_or_else(|| AppError::Session("No token in session".to_string()))?;
    Ok(base.with_token(Some(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_map_flattens_to_codes() {
        let map = json!({
            "kurumsal": {"goruntuleme": true, "duzenleme": true, "silme": false},
            "duyurular": {"goruntuleme": 1, "ekleme": "true"}
        });
        let perms = Permissions::from_backend(&map);
        assert!(perms.has("kurumsal.duzenleme"));
        assert!(perms.has("duyurular.ekleme"));
        assert!(!perms.has("kurumsal.silme"));
        assert_eq!(Permissions::from_csv(&perms.to_csv()).0, perms.0);
    }

    #[test]
    fn non_object_grants_nothing() {
        assert!(Permissions::from_backend(&json!(null)).0.is_empty());
    }
}
