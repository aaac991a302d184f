use actix_web::cookie::Key;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_APP_NAME: &str = "Belediye Yönetim Paneli";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the municipality REST backend.
    pub api_base_url: String,
    pub bind_addr: String,
    pub app_name: String,
    session_key: Option<String>,
}

impl AppConfig {
    /// Load from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            api_base_url: env_or("API_BASE_URL", DEFAULT_API_BASE_URL),
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            app_name: env_or("APP_NAME", DEFAULT_APP_NAME),
            session_key: std::env::var("SESSION_KEY").ok(),
        }
    }

    /// Config pointing at a given backend, used by tests and tooling.
    pub fn for_backend(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            session_key: None,
        }
    }

    /// Cookie signing key. SESSION_KEY must be at least 64 bytes to be used;
    /// otherwise a random key is generated and sessions die with the process.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_backend_uses_defaults() {
        let cfg = AppConfig::for_backend("http://127.0.0.1:9999");
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.bind_addr, "127.0.0.1:3000");
        assert_eq!(cfg.app_name, "Belediye Yönetim Paneli");
    }
}
