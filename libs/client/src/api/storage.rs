use reqwest::{
    Method,
    header::CONTENT_TYPE,
    multipart::{Form, Part},
};

use super::ApiClient;
use crate::{
    dto::{DownloadedFile, UploadResponse},
    error::{ClientError, ClientResult},
};

/// `/storage` endpoints
#[derive(Clone)]
pub struct StorageApi {
    client: ApiClient,
}

impl StorageApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload an image as the multipart field `file`
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> ClientResult<UploadResponse> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::Transport(format!("Invalid content type: {}", e)))?;

        let builder = self
            .client
            .request(Method::POST, &["storage", "upload"])
            .multipart(Form::new().part("file", part));
        self.client.send(builder).await
    }

    /// Fetch a stored file's bytes and content type
    pub async fn get_file(&self, key: &str) -> ClientResult<DownloadedFile> {
        let builder = self.client.request(Method::GET, &["storage", "files", key]);
        let response = self.client.send_raw(builder).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedFile {
            bytes,
            content_type,
        })
    }

    pub async fn delete_file(&self, key: &str) -> ClientResult<()> {
        let builder = self
            .client
            .request(Method::DELETE, &["storage", "files", key]);
        self.client.send_empty(builder).await
    }
}
