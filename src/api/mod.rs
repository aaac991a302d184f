//! HTTP client for the municipality backend REST API.

pub mod client;
pub mod error;

pub use client::{ApiClient, public_image_path};
pub use error::ApiError;
