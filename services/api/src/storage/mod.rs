//! File storage behind a provider trait
//!
//! Uploaded files are addressed by an opaque key of the form `<uuid>.<ext>`.
//! The HTTP layer turns keys into URLs; providers only store bytes.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{StorageConfig, StorageDriver};

pub mod local;
pub mod s3;

pub use local::LocalStorageProvider;
pub use s3::S3StorageProvider;

/// Storage error type
#[derive(Error, Debug)]
pub enum StorageError {
    /// No file stored under the key
    #[error("File not found: {0}")]
    NotFound(String),

    /// Key contains characters that could escape the storage namespace
    #[error("Invalid file key: {0}")]
    InvalidKey(String),

    /// Local filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Object storage failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A file read back from storage
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Backend able to store, serve and delete uploaded files
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store `file` and return the key it can be fetched by
    async fn upload_file(&self, file: Vec<u8>, filename: &str, mime_type: &str)
    -> StorageResult<String>;

    /// Remove the file stored under `key`
    async fn delete_file(&self, key: &str) -> StorageResult<()>;

    /// Fetch the file stored under `key`
    async fn get_file(&self, key: &str) -> StorageResult<StoredFile>;
}

/// Construct the provider selected by configuration
pub async fn build_provider(config: &StorageConfig) -> StorageResult<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match &config.driver {
        StorageDriver::Local(root) => Arc::new(LocalStorageProvider::new(root).await?),
        StorageDriver::S3 { bucket } => Arc::new(S3StorageProvider::from_env(bucket.clone()).await),
    };
    Ok(provider)
}

/// File extension for an accepted image content type
pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Content type implied by a key's extension
pub fn content_type_for(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Generate a fresh key, keeping the extension implied by the content type or filename
pub fn generate_key(filename: &str, mime_type: &str) -> String {
    let extension = extension_for(mime_type)
        .map(str::to_string)
        .or_else(|| {
            filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        });

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// Reject keys that are empty or contain anything but `[A-Za-z0-9._-]`
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
