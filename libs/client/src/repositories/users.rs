use std::sync::Arc;
use uuid::Uuid;

use super::current_user_id;
use crate::{
    api::UserApi,
    dto::{UpdateUserRequest, User},
    error::ClientResult,
    token_store::TokenStore,
};

#[derive(Clone)]
pub struct UserRepository {
    api: UserApi,
    store: Arc<TokenStore>,
}

impl UserRepository {
    pub fn new(api: UserApi, store: Arc<TokenStore>) -> Self {
        Self { api, store }
    }

    pub async fn get_users(&self) -> ClientResult<Vec<User>> {
        self.api.get_users().await
    }

    pub async fn get_user(&self, id: Uuid) -> ClientResult<User> {
        self.api.get_user(id).await
    }

    pub async fn get_current_user(&self) -> ClientResult<User> {
        self.api.get_user(current_user_id(&self.store)?).await
    }

    pub async fn update_current_user(&self, changes: &UpdateUserRequest) -> ClientResult<User> {
        self.api
            .update_user(current_user_id(&self.store)?, changes)
            .await
    }

    /// Delete the current user's account and end the session
    pub async fn delete_current_user(&self) -> ClientResult<()> {
        self.api.delete_user(current_user_id(&self.store)?).await?;
        self.store.clear_token().await
    }
}
