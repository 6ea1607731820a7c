use uuid::Uuid;

use crate::{
    dto::{Group, Membership},
    repositories::{GroupsRepository, StorageRepository},
};

use super::{Action, ImageUpload, UiState};

pub struct GroupsViewModel {
    groups: GroupsRepository,
    storage: StorageRepository,
    pub my_groups_state: Action<Vec<Group>>,
    pub explore_state: Action<Vec<Group>>,
    pub create_group_state: Action<Group>,
    pub join_group_state: Action<Membership>,
    pub leave_group_state: Action<()>,
}

impl GroupsViewModel {
    pub fn new(groups: GroupsRepository, storage: StorageRepository) -> Self {
        Self {
            groups,
            storage,
            my_groups_state: Action::loading(),
            explore_state: Action::loading(),
            create_group_state: Action::new(),
            join_group_state: Action::new(),
            leave_group_state: Action::new(),
        }
    }

    pub async fn load_my_groups(&self) -> UiState<Vec<Group>> {
        self.my_groups_state.run(self.groups.my_groups()).await
    }

    pub async fn load_explore_groups(&self) -> UiState<Vec<Group>> {
        self.explore_state.run(self.groups.explore_groups()).await
    }

    /// Search all groups; a blank query lists every group
    pub async fn search_groups(&self, query: &str) -> UiState<Vec<Group>> {
        self.explore_state.run(self.groups.search_groups(query)).await
    }

    /// Search the current user's groups; a blank query lists all of them
    pub async fn search_my_groups(&self, query: &str) -> UiState<Vec<Group>> {
        self.my_groups_state
            .run(self.groups.search_my_groups(query))
            .await
    }

    /// Upload the cover image, if any, then create the group
    pub async fn create_group(
        &self,
        name: &str,
        description: Option<String>,
        image: Option<ImageUpload>,
    ) -> UiState<Group> {
        let name = name.trim();
        if name.is_empty() {
            return self.create_group_state.fail("Group name is required");
        }

        let description = description.filter(|d| !d.trim().is_empty());

        let state = self
            .create_group_state
            .run(async {
                let image_url = match image {
                    Some(image) => Some(
                        self.storage
                            .upload_image(image.bytes, &image.filename, &image.content_type)
                            .await?,
                    ),
                    None => None,
                };
                self.groups.create_group(name, description, image_url).await
            })
            .await;

        if state.success().is_some() {
            self.load_my_groups().await;
        }
        state
    }

    /// Join a group and refresh both lists
    pub async fn join_group(&self, group_id: Uuid) -> UiState<Membership> {
        let state = self
            .join_group_state
            .run(self.groups.join_group(group_id))
            .await;

        if state.success().is_some() {
            self.load_my_groups().await;
            self.load_explore_groups().await;
        }
        state
    }

    /// Leave a group and refresh both lists
    pub async fn leave_group(&self, group_id: Uuid) -> UiState<()> {
        let state = self
            .leave_group_state
            .run(self.groups.leave_group(group_id))
            .await;

        if state.success().is_some() {
            self.load_my_groups().await;
            self.load_explore_groups().await;
        }
        state
    }

    pub fn reset_create_group_state(&self) {
        self.create_group_state.reset();
    }

    pub fn reset_join_group_state(&self) {
        self.join_group_state.reset();
    }

    pub fn reset_leave_group_state(&self) {
        self.leave_group_state.reset();
    }
}
