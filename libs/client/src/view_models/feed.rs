use uuid::Uuid;

use crate::{dto::Post, repositories::PostsRepository};

use super::{Action, UiState};

pub struct FeedViewModel {
    posts: PostsRepository,
    pub feed_state: Action<Vec<Post>>,
}

impl FeedViewModel {
    pub fn new(posts: PostsRepository) -> Self {
        Self {
            posts,
            feed_state: Action::loading(),
        }
    }

    /// Every post, newest first
    pub async fn load_feed(&self) -> UiState<Vec<Post>> {
        self.feed_state.run(self.posts.get_posts()).await
    }

    /// One group's posts, newest first
    pub async fn load_group_feed(&self, group_id: Uuid) -> UiState<Vec<Post>> {
        self.feed_state
            .run(self.posts.get_group_posts(group_id))
            .await
    }
}
