use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// Failure of a single call to the backend REST API.
#[derive(Debug)]
pub enum ApiError {
    /// No response arrived (connection refused, DNS, broken stream).
    Transport(reqwest::Error),
    /// The backend rejected the bearer token. Handled globally by the web layer.
    Unauthorized,
    /// Any other non-2xx answer, with the best message the body offered.
    Status { status: u16, message: String },
    /// A 2xx answer whose body did not match the expected shape.
    Decode(String),
    /// A 2xx answer that reports the write did not happen (`false`, missing file name).
    Rejected(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message suitable for an inline error box.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Sunucuya ulaşılamadı".to_string(),
            ApiError::Unauthorized => "Oturum süresi doldu".to_string(),
            ApiError::Status { status, message } => format!("{message} (status: {status})"),
            ApiError::Decode(_) => "Sunucudan beklenmeyen yanıt alındı".to_string(),
            ApiError::Rejected(message) => message.clone(),
        }
    }

    /// Build a status error from a failed response body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }
        let fallback = status.canonical_reason().unwrap_or("İstek başarısız");
        ApiError::Status {
            status: status.as_u16(),
            message: extract_message(body).unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// Pull a human-readable message out of an error body.
/// Order: `message` field, `error` field, JSON string body, plain-text body.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(String::from),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Transport error: {e}"),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Status { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::Decode(e) => write!(f, "Decode error: {e}"),
            ApiError::Rejected(e) => write!(f, "Rejected: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
