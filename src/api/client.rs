use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

pub const UPLOAD_PATH: &str = "/api/files/upload";
pub const IMAGE_PREFIX: &str = "/images/resimler/";

/// Public URL path of an uploaded image.
pub fn public_image_path(name: &str) -> String {
    if name.starts_with(IMAGE_PREFIX) {
        name.to_string()
    } else {
        format!("{IMAGE_PREFIX}{}", name.trim_start_matches('/'))
    }
}

/// Thin wrapper over `reqwest` bound to the backend base URL.
///
/// One request, one failure path: no retries and no circuit breaking.
/// A token set with [`ApiClient::with_token`] is sent as `Authorization: Bearer`.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Clone sharing the connection pool, carrying the given bearer token.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, self.request(Method::GET, path)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path).query(query);
        self.send(Method::GET, path, req).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, req).await
    }

    /// POST without a body, parameters in the query string.
    pub async fn post_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::POST, path).query(query);
        self.send(Method::POST, path, req).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, req).await
    }

    /// PUT without a body, parameters in the query string.
    pub async fn put_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::PUT, path).query(query);
        self.send(Method::PUT, path, req).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path)).await
    }

    /// POST a multipart form. Content-Type (with boundary) is set by reqwest.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let req = self.request(Method::POST, path).multipart(form);
        self.send(Method::POST, path, req).await
    }

    /// Upload one file as the `file` field of `/api/files/upload`.
    /// Returns the stored file name reported by the backend.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        if let Some(ct) = content_type {
            part = part.mime_str(ct)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);
        let body: Value = self.post_multipart(UPLOAD_PATH, form).await?;

        match body.get("fileName").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            _ => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Dosya yüklenemedi");
                Err(ApiError::Rejected(message.to_string()))
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        log::debug!("[api] -> {} {} auth={}", method, self.url(path), self.token.is_some());

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::debug!("[api] <- {} {} {}", method, path, status);
            return Err(ApiError::from_response(status, &body));
        }

        // Empty 2xx bodies decode as `null`, plain-text bodies as a JSON string.
        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body))
        };
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:8080/").expect("client");
        assert_eq!(client.url("/api/duyuru"), "http://localhost:8080/api/duyuru");
        assert_eq!(client.url("api/duyuru"), "http://localhost:8080/api/duyuru");
        assert_eq!(client.url("http://other/x"), "http://other/x");
    }

    #[test]
    fn image_path_is_prefixed_once() {
        assert_eq!(public_image_path("a.png"), "/images/resimler/a.png");
        assert_eq!(public_image_path("/images/resimler/a.png"), "/images/resimler/a.png");
    }

    #[test]
    fn empty_token_is_dropped() {
        let client = ApiClient::new("http://localhost:8080").expect("client");
        assert!(!client.with_token(Some(String::new())).has_token());
        assert!(client.with_token(Some("abc".into())).has_token());
        assert!(!client.with_token(None).has_token());
    }
}
