//! S3-compatible object storage

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tracing::{error, info};

use super::{
    StorageError, StorageProvider, StorageResult, StoredFile, content_type_for, generate_key,
    validate_key,
};

/// Stores uploads as objects in a single bucket
#[derive(Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default AWS credential chain
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let bucket = bucket.into();
        info!("S3 storage initialized for bucket {}", bucket);
        Self::new(Client::new(&config), bucket)
    }
}

fn backend<E: std::fmt::Display>(operation: &'static str) -> impl FnOnce(E) -> StorageError {
    move |e| {
        error!("S3 {} failed: {}", operation, e);
        StorageError::Backend(format!("{} failed", operation))
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    async fn upload_file(
        &self,
        file: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> StorageResult<String> {
        let key = generate_key(filename, mime_type);
        info!("Uploading {} bytes to S3: {}", file.len(), key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(file))
            .content_type(mime_type)
            .send()
            .await
            .map_err(backend("put_object"))?;

        Ok(key)
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;

        // head first: delete_object succeeds for missing keys
        let exists = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        if let Err(e) = exists {
            if e.as_service_error().is_some_and(|e| e.is_not_found()) {
                return Err(StorageError::NotFound(key.to_string()));
            }
            return Err(backend("head_object")(e));
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(backend("delete_object"))?;

        Ok(())
    }

    async fn get_file(&self, key: &str) -> StorageResult<StoredFile> {
        validate_key(key)?;

        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) if e.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(backend("get_object")(e)),
        };

        let content_type = output
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(key).to_string());

        let bytes = output
            .body
            .collect()
            .await
            .map_err(backend("read object body"))?
            .into_bytes()
            .to_vec();

        Ok(StoredFile {
            bytes,
            content_type,
        })
    }
}
