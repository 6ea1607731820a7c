//! Filesystem-backed storage, used in development and tests

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{
    StorageError, StorageProvider, StorageResult, StoredFile, content_type_for, generate_key,
    validate_key,
};

/// Stores each upload as a file named by its key
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create the provider, creating `root` if needed
    pub async fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        info!("Local storage initialized at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

fn not_found(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |e| {
        if e.kind() == ErrorKind::NotFound {
            StorageError::NotFound(key.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn upload_file(
        &self,
        file: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> StorageResult<String> {
        let key = generate_key(filename, mime_type);
        let path = self.path_for(&key)?;

        info!("Writing {} bytes to {}", file.len(), path.display());
        tokio::fs::write(&path, file).await?;

        Ok(key)
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::remove_file(&path).await.map_err(not_found(key))
    }

    async fn get_file(&self, key: &str) -> StorageResult<StoredFile> {
        let path = self.path_for(key)?;
        let bytes = tokio::fs::read(&path).await.map_err(not_found(key))?;

        Ok(StoredFile {
            bytes,
            content_type: content_type_for(key).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageProvider::new(dir.path()).await.unwrap();

        let key = storage
            .upload_file(vec![0x89, b'P', b'N', b'G'], "pic.png", "image/png")
            .await
            .unwrap();

        let file = storage.get_file(&key).await.unwrap();
        assert_eq!(file.bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(file.content_type, "image/png");

        storage.delete_file(&key).await.unwrap();
        assert!(matches!(
            storage.get_file(&key).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_and_invalid_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageProvider::new(dir.path().join("nested"))
            .await
            .unwrap();

        assert!(matches!(
            storage.get_file("missing.png").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.delete_file("missing.png").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.get_file("../secret").await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
