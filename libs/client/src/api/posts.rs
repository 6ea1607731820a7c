use reqwest::Method;
use uuid::Uuid;

use super::ApiClient;
use crate::{
    dto::{CreatePostRequest, Post, UpdatePostRequest},
    error::ClientResult,
};

/// `/posts` endpoints
#[derive(Clone)]
pub struct PostApi {
    client: ApiClient,
}

impl PostApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> ClientResult<Post> {
        let builder = self.client.request(Method::POST, &["posts"]).json(request);
        self.client.send(builder).await
    }

    pub async fn get_posts(&self) -> ClientResult<Vec<Post>> {
        let builder = self.client.request(Method::GET, &["posts"]);
        self.client.send(builder).await
    }

    pub async fn get_group_posts(&self, group_id: Uuid) -> ClientResult<Vec<Post>> {
        let builder = self
            .client
            .request(Method::GET, &["posts", "group", group_id.to_string().as_str()]);
        self.client.send(builder).await
    }

    pub async fn get_post(&self, id: Uuid) -> ClientResult<Post> {
        let builder = self
            .client
            .request(Method::GET, &["posts", id.to_string().as_str()]);
        self.client.send(builder).await
    }

    pub async fn update_post(&self, id: Uuid, request: &UpdatePostRequest) -> ClientResult<Post> {
        let builder = self
            .client
            .request(Method::PUT, &["posts", id.to_string().as_str()])
            .json(request);
        self.client.send(builder).await
    }

    pub async fn delete_post(&self, id: Uuid) -> ClientResult<()> {
        let builder = self
            .client
            .request(Method::DELETE, &["posts", id.to_string().as_str()]);
        self.client.send_empty(builder).await
    }
}
