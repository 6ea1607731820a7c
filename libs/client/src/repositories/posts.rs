use std::sync::Arc;
use uuid::Uuid;

use super::current_user_id;
use crate::{
    api::PostApi,
    dto::{CreatePostRequest, Post, UpdatePostRequest},
    error::ClientResult,
    token_store::TokenStore,
};

#[derive(Clone)]
pub struct PostsRepository {
    api: PostApi,
    store: Arc<TokenStore>,
}

impl PostsRepository {
    pub fn new(api: PostApi, store: Arc<TokenStore>) -> Self {
        Self { api, store }
    }

    pub fn current_user_id(&self) -> ClientResult<Uuid> {
        current_user_id(&self.store)
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> ClientResult<Post> {
        self.api.create_post(request).await
    }

    pub async fn get_posts(&self) -> ClientResult<Vec<Post>> {
        self.api.get_posts().await
    }

    pub async fn get_group_posts(&self, group_id: Uuid) -> ClientResult<Vec<Post>> {
        self.api.get_group_posts(group_id).await
    }

    pub async fn get_post(&self, id: Uuid) -> ClientResult<Post> {
        self.api.get_post(id).await
    }

    pub async fn update_post(&self, id: Uuid, changes: &UpdatePostRequest) -> ClientResult<Post> {
        self.api.update_post(id, changes).await
    }

    pub async fn delete_post(&self, id: Uuid) -> ClientResult<()> {
        self.api.delete_post(id).await
    }
}
