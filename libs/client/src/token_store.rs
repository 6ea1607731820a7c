//! Durable session storage
//!
//! The bearer token and the user id decoded from it live in a small JSON
//! file. An in-memory copy is kept on a watch channel: reads are snapshots of
//! that copy, writes hit the disk first and then publish.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// Persisted session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub token: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize)]
struct IdClaim {
    id: Uuid,
}

/// Read the `id` claim without checking the signature or expiry
///
/// The server is the authority on validity; the client only needs to know who
/// it is logged in as.
pub fn decode_user_id(token: &str) -> Option<Uuid> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<IdClaim>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims.id)
        .ok()
}

pub struct TokenStore {
    path: PathBuf,
    state: watch::Sender<StoredAuth>,
    write_lock: Mutex<()>,
}

impl TokenStore {
    /// Open the store at `path`, loading an existing session if there is one
    ///
    /// An unreadable session file is discarded: the store opens logged out and
    /// the next login overwrites it.
    pub async fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();

        let stored = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Discarding corrupt session file {}: {}", path.display(), e);
                StoredAuth::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => StoredAuth::default(),
            Err(e) => return Err(e.into()),
        };

        let (state, _) = watch::channel(stored);

        Ok(Self {
            path,
            state,
            write_lock: Mutex::new(()),
        })
    }

    pub fn get_token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn get_user_id(&self) -> Option<Uuid> {
        self.state.borrow().user_id
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().token.is_some()
    }

    /// Stream of session changes, starting with the current one
    pub fn subscribe(&self) -> watch::Receiver<StoredAuth> {
        self.state.subscribe()
    }

    /// Persist `token` along with the user id it carries
    pub async fn save_token(&self, token: &str) -> ClientResult<()> {
        let user_id = decode_user_id(token);
        if user_id.is_none() {
            warn!("Saved token carries no readable user id");
        }

        self.persist(StoredAuth {
            token: Some(token.to_string()),
            user_id,
        })
        .await
    }

    /// Forget the session
    pub async fn clear_token(&self) -> ClientResult<()> {
        self.persist(StoredAuth::default()).await
    }

    async fn persist(&self, stored: StoredAuth) -> ClientResult<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(&stored)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Session written to {}", self.path.display());
        self.state.send_replace(stored);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    /// A token shaped like the server's, signed with a throwaway secret
    pub(crate) fn token_for(user_id: Uuid) -> String {
        encode(
            &Header::default(),
            &json!({"id": user_id, "iat": 1_700_000_000u64, "exp": 1_700_003_600u64}),
            &EncodingKey::from_secret(b"client-test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_user_id_ignores_signature_and_expiry() {
        let user_id = Uuid::new_v4();
        assert_eq!(decode_user_id(&token_for(user_id)), Some(user_id));
        assert_eq!(decode_user_id("not-a-jwt"), None);
        assert_eq!(decode_user_id(""), None);
    }

    #[tokio::test]
    async fn test_save_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("auth.json");
        let user_id = Uuid::new_v4();
        let token = token_for(user_id);

        let store = TokenStore::open(&path).await.unwrap();
        assert!(!store.is_logged_in());
        store.save_token(&token).await.unwrap();

        let reopened = TokenStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_token(), Some(token));
        assert_eq!(reopened.get_user_id(), Some(user_id));
    }

    #[tokio::test]
    async fn test_clear_publishes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        let store = TokenStore::open(&path).await.unwrap();
        let mut changes = store.subscribe();

        store.save_token(&token_for(Uuid::new_v4())).await.unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().token.is_some());

        store.clear_token().await.unwrap();
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), StoredAuth::default());

        let reopened = TokenStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_token(), None);
        assert_eq!(reopened.get_user_id(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_opens_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        tokio::fs::write(&path, br#"{"token": "abc""#).await.unwrap();

        let store = TokenStore::open(&path).await.unwrap();
        assert!(!store.is_logged_in());
        assert_eq!(store.get_user_id(), None);

        let user_id = Uuid::new_v4();
        store.save_token(&token_for(user_id)).await.unwrap();

        let reopened = TokenStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_user_id(), Some(user_id));
    }
}
