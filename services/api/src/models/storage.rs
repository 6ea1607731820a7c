//! Storage payloads

use serde::Serialize;

/// Response for a completed upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
    pub key: String,
}
