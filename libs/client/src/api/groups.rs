use reqwest::Method;
use uuid::Uuid;

use super::ApiClient;
use crate::{
    dto::{CreateGroupRequest, Group, Membership, UpdateGroupRequest},
    error::ClientResult,
};

/// `/groups` endpoints
#[derive(Clone)]
pub struct GroupApi {
    client: ApiClient,
}

impl GroupApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_group(&self, request: &CreateGroupRequest) -> ClientResult<Group> {
        let builder = self
            .client
            .request(Method::POST, &["groups"])
            .json(request);
        self.client.send(builder).await
    }

    pub async fn get_groups(&self) -> ClientResult<Vec<Group>> {
        let builder = self.client.request(Method::GET, &["groups"]);
        self.client.send(builder).await
    }

    /// Groups `user_id` has not joined
    pub async fn explore_groups(&self, user_id: Uuid) -> ClientResult<Vec<Group>> {
        let builder = self
            .client
            .request(Method::GET, &["groups", "explore", user_id.to_string().as_str()]);
        self.client.send(builder).await
    }

    pub async fn search_groups(&self, name: &str) -> ClientResult<Vec<Group>> {
        let builder = self
            .client
            .request(Method::GET, &["groups", "search", name]);
        self.client.send(builder).await
    }

    pub async fn search_user_groups(&self, user_id: Uuid, name: &str) -> ClientResult<Vec<Group>> {
        let user_id = user_id.to_string();
        let builder = self
            .client
            .request(Method::GET, &["groups", "user", user_id.as_str(), "search", name]);
        self.client.send(builder).await
    }

    pub async fn get_group(&self, id: Uuid) -> ClientResult<Group> {
        let builder = self
            .client
            .request(Method::GET, &["groups", id.to_string().as_str()]);
        self.client.send(builder).await
    }

    pub async fn update_group(&self, id: Uuid, request: &UpdateGroupRequest) -> ClientResult<Group> {
        let builder = self
            .client
            .request(Method::PUT, &["groups", id.to_string().as_str()])
            .json(request);
        self.client.send(builder).await
    }

    pub async fn delete_group(&self, id: Uuid) -> ClientResult<()> {
        let builder = self
            .client
            .request(Method::DELETE, &["groups", id.to_string().as_str()]);
        self.client.send_empty(builder).await
    }

    pub async fn add_user(&self, group_id: Uuid, user_id: Uuid) -> ClientResult<Membership> {
        let (group_id, user_id) = (group_id.to_string(), user_id.to_string());
        let builder = self
            .client
            .request(Method::POST, &["groups", group_id.as_str(), "users", user_id.as_str()]);
        self.client.send(builder).await
    }

    pub async fn remove_user(&self, group_id: Uuid, user_id: Uuid) -> ClientResult<()> {
        let (group_id, user_id) = (group_id.to_string(), user_id.to_string());
        let builder = self
            .client
            .request(Method::DELETE, &["groups", group_id.as_str(), "users", user_id.as_str()]);
        self.client.send_empty(builder).await
    }
}
