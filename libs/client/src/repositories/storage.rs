use crate::{api::StorageApi, dto::DownloadedFile, error::ClientResult};

#[derive(Clone)]
pub struct StorageRepository {
    api: StorageApi,
}

impl StorageRepository {
    pub fn new(api: StorageApi) -> Self {
        Self { api }
    }

    /// Upload an image and return its public URL
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> ClientResult<String> {
        let response = self.api.upload(bytes, filename, content_type).await?;
        Ok(response.url)
    }

    pub async fn download(&self, key: &str) -> ClientResult<DownloadedFile> {
        self.api.get_file(key).await
    }

    pub async fn delete_file(&self, key: &str) -> ClientResult<()> {
        self.api.delete_file(key).await
    }
}
