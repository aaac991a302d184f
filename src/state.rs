use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;

/// Shared by every worker through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// Token-less client; handlers derive a per-session clone from it.
    pub api: ApiClient,
    pub app_name: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(&config.api_base_url)?,
            app_name: config.app_name.clone(),
        })
    }
}
