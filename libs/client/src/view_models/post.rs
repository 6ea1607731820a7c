use uuid::Uuid;

use crate::{
    dto::{CreatePostRequest, Post, UpdatePostRequest},
    error::{ClientError, ClientResult},
    repositories::{PostsRepository, StorageRepository},
};

use super::{Action, ImageUpload, UiState};

/// A post plus whether the current user wrote it
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    pub post: Post,
    pub is_owner: bool,
}

pub struct PostViewModel {
    posts: PostsRepository,
    storage: StorageRepository,
    pub post_state: Action<PostDetail>,
    pub create_state: Action<Post>,
    pub update_state: Action<Post>,
    pub delete_state: Action<()>,
}

const NOT_OWNER: &str = "Only the author can change this post";

impl PostViewModel {
    pub fn new(posts: PostsRepository, storage: StorageRepository) -> Self {
        Self {
            posts,
            storage,
            post_state: Action::loading(),
            create_state: Action::new(),
            update_state: Action::new(),
            delete_state: Action::new(),
        }
    }

    async fn detail(&self, id: Uuid) -> ClientResult<PostDetail> {
        let post = self.posts.get_post(id).await?;
        let is_owner = self
            .posts
            .current_user_id()
            .is_ok_and(|user_id| post.user.id == user_id);
        Ok(PostDetail { post, is_owner })
    }

    /// Fail unless the current user wrote post `id`
    async fn ensure_owner(&self, id: Uuid) -> ClientResult<()> {
        let user_id = self.posts.current_user_id()?;

        let author = match self.post_state.state() {
            UiState::Success(detail) if detail.post.id == id => detail.post.user.id,
            _ => self.posts.get_post(id).await?.user.id,
        };

        if author != user_id {
            return Err(ClientError::Http {
                status: 403,
                message: NOT_OWNER.to_string(),
            });
        }
        Ok(())
    }

    pub async fn load_post(&self, id: Uuid) -> UiState<PostDetail> {
        self.post_state.run(self.detail(id)).await
    }

    /// Upload the photo, if any, then publish the post
    pub async fn create_post(
        &self,
        mut request: CreatePostRequest,
        image: Option<ImageUpload>,
    ) -> UiState<Post> {
        if request.title.trim().is_empty() {
            return self.create_state.fail("Title is required");
        }

        self.create_state
            .run(async {
                if let Some(image) = image {
                    let url = self
                        .storage
                        .upload_image(image.bytes, &image.filename, &image.content_type)
                        .await?;
                    request.image_url = Some(url);
                }
                self.posts.create_post(&request).await
            })
            .await
    }

    /// Apply `changes` to one of the current user's posts
    pub async fn update_post(&self, id: Uuid, changes: UpdatePostRequest) -> UiState<Post> {
        if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return self.update_state.fail("Title is required");
        }

        let state = self
            .update_state
            .run(async {
                self.ensure_owner(id).await?;
                self.posts.update_post(id, &changes).await
            })
            .await;

        if let UiState::Success(post) = &state {
            self.post_state.succeed(PostDetail {
                post: post.clone(),
                is_owner: true,
            });
        }
        state
    }

    /// Delete one of the current user's posts
    pub async fn delete_post(&self, id: Uuid) -> UiState<()> {
        self.delete_state
            .run(async {
                self.ensure_owner(id).await?;
                self.posts.delete_post(id).await
            })
            .await
    }

    pub fn reset_update_state(&self) {
        self.update_state.reset();
    }
}
