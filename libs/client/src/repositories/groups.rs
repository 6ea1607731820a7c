use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use super::current_user_id;
use crate::{
    api::{GroupApi, UserApi},
    dto::{CreateGroupRequest, Group, Membership, UpdateGroupRequest},
    error::{ClientError, ClientResult},
    token_store::TokenStore,
};

#[derive(Clone)]
pub struct GroupsRepository {
    api: GroupApi,
    users: UserApi,
    store: Arc<TokenStore>,
}

impl GroupsRepository {
    pub fn new(api: GroupApi, users: UserApi, store: Arc<TokenStore>) -> Self {
        Self { api, users, store }
    }

    pub async fn get_group(&self, id: Uuid) -> ClientResult<Group> {
        self.api.get_group(id).await
    }

    /// Groups the current user belongs to, in the order the profile lists them
    ///
    /// A group deleted between the two calls is skipped.
    pub async fn my_groups(&self) -> ClientResult<Vec<Group>> {
        let user = self.users.get_user(current_user_id(&self.store)?).await?;

        let mut groups = Vec::with_capacity(user.groups.len());
        for summary in user.groups {
            match self.api.get_group(summary.id).await {
                Ok(group) => groups.push(group),
                Err(ClientError::Http { status: 404, .. }) => {
                    warn!("Group {} vanished while loading my groups", summary.id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(groups)
    }

    /// Groups the current user has not joined
    pub async fn explore_groups(&self) -> ClientResult<Vec<Group>> {
        self.api
            .explore_groups(current_user_id(&self.store)?)
            .await
    }

    /// All groups matching `name`; a blank term lists every group
    pub async fn search_groups(&self, name: &str) -> ClientResult<Vec<Group>> {
        let name = name.trim();
        if name.is_empty() {
            return self.api.get_groups().await;
        }
        self.api.search_groups(name).await
    }

    /// The current user's groups matching `name`; a blank term lists all of them
    pub async fn search_my_groups(&self, name: &str) -> ClientResult<Vec<Group>> {
        let name = name.trim();
        if name.is_empty() {
            return self.my_groups().await;
        }
        self.api
            .search_user_groups(current_user_id(&self.store)?, name)
            .await
    }

    pub async fn create_group(
        &self,
        name: &str,
        description: Option<String>,
        image_url: Option<String>,
    ) -> ClientResult<Group> {
        current_user_id(&self.store)?;
        self.api
            .create_group(&CreateGroupRequest {
                name: name.to_string(),
                description,
                image_url,
            })
            .await
    }

    pub async fn update_group(
        &self,
        id: Uuid,
        changes: &UpdateGroupRequest,
    ) -> ClientResult<Group> {
        current_user_id(&self.store)?;
        self.api.update_group(id, changes).await
    }

    pub async fn delete_group(&self, id: Uuid) -> ClientResult<()> {
        current_user_id(&self.store)?;
        self.api.delete_group(id).await
    }

    pub async fn join_group(&self, group_id: Uuid) -> ClientResult<Membership> {
        self.api
            .add_user(group_id, current_user_id(&self.store)?)
            .await
    }

    pub async fn leave_group(&self, group_id: Uuid) -> ClientResult<()> {
        self.api
            .remove_user(group_id, current_user_id(&self.store)?)
            .await
    }
}
