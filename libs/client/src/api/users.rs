use reqwest::Method;
use uuid::Uuid;

use super::ApiClient;
use crate::{
    dto::{UpdateUserRequest, User},
    error::ClientResult,
};

/// `/users` endpoints
#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_users(&self) -> ClientResult<Vec<User>> {
        let builder = self.client.request(Method::GET, &["users"]);
        self.client.send(builder).await
    }

    pub async fn get_user(&self, id: Uuid) -> ClientResult<User> {
        let builder = self
            .client
            .request(Method::GET, &["users", id.to_string().as_str()]);
        self.client.send(builder).await
    }

    pub async fn update_user(&self, id: Uuid, request: &UpdateUserRequest) -> ClientResult<User> {
        let builder = self
            .client
            .request(Method::PUT, &["users", id.to_string().as_str()])
            .json(request);
        self.client.send(builder).await
    }

    pub async fn delete_user(&self, id: Uuid) -> ClientResult<()> {
        let builder = self
            .client
            .request(Method::DELETE, &["users", id.to_string().as_str()]);
        self.client.send_empty(builder).await
    }
}
