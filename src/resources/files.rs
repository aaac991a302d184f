use super::logged;
use crate::api::{ApiClient, ApiError, public_image_path};

/// Upload an image and return its public path under `/images/resimler/`.
pub async fn upload_image(
    client: &ApiClient,
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let stored = logged("Failed to upload file", client.upload(file_name, content_type, bytes).await)?;
    Ok(public_image_path(&stored))
}
