//! The logged-in user's own profile: display name, photo and password.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::records::redirect;
use crate::auth::session::{api_client, get_display_name, get_profile_photo, set_flash, update_profile};
use crate::auth::{csrf, validate};
use crate::errors::{AppError, inline, render};
use crate::resources::profile::{self, ProfileUpdate};
use crate::state::AppState;
use crate::templates_structs::{PageContext, SettingsTemplate};

const PATH: &str = "/panel/settings";

#[derive(Deserialize)]
pub struct SettingsForm {
    pub csrf_token: String,
    #[serde(default)]
    pub isim: String,
    #[serde(default, rename = "profilFoto")]
    pub profil_foto: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "newPassword")]
    pub new_password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

impl SettingsForm {
    fn to_update(&self) -> ProfileUpdate {
        let changing = !self.new_password.is_empty();
        ProfileUpdate {
            isim: self.isim.trim().to_string(),
            profil_foto: self.profil_foto.trim().to_string(),
            password: changing.then(|| self.password.clone()),
            new_password: changing.then(|| self.new_password.clone()),
        }
    }
}

fn page(ctx: PageContext, isim: String, profil_foto: String, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    render(SettingsTemplate { ctx, isim, profil_foto, errors })
}

pub async fn show(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state.app_name, PATH)?;
    let isim = get_display_name(&session).unwrap_or_default();
    page(ctx, isim, get_profile_photo(&session), vec![])
}

/// Validate, send to the backend, then refresh the name and photo kept in
/// the session. Passwords are never echoed back into the form.
pub async fn submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<SettingsForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let client = api_client(&session, &state.api)?;

    let mut errors = validate::validate_profile(&form.isim, &form.password, &form.new_password, &form.confirm_password);
    if errors.is_empty() {
        let update = form.to_update();
        match profile::update(&client, &update).await {
            Ok(()) => {
                update_profile(&session, &update.isim, &update.profil_foto)?;
                log::info!("[settings] profile updated");
                set_flash(&session, "Ayarlar başarıyla güncellendi.");
                return Ok(redirect(PATH));
            }
            Err(e) => errors.push(inline(e)?),
        }
    }

    let ctx = PageContext::build(&session, &state.app_name, PATH)?;
    page(ctx, form.isim.clone(), form.profil_foto.clone(), errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(new_password: &str) -> SettingsForm {
        SettingsForm {
            csrf_token: String::new(),
            isim: " Ayşe ".into(),
            profil_foto: "/images/resimler/a.png".into(),
            password: "eski".into(),
            new_password: new_password.into(),
            confirm_password: new_password.into(),
        }
    }

    #[test]
    fn current_password_sent_only_with_a_new_one() {
        let unchanged = form("").to_update();
        assert_eq!(unchanged.isim, "Ayşe");
        assert_eq!(unchanged.password, None);

        let changed = form("yenisifre").to_update();
        assert_eq!(changed.password.as_deref(), Some("eski"));
        assert_eq!(changed.new_password.as_deref(), Some("yenisifre"));
    }
}
