//! Typed client for the Workit API
//!
//! Layers, from the wire up:
//! - [`token_store::TokenStore`] persists the session and publishes changes
//! - [`interceptor::AuthInterceptor`] adds the bearer token to protected calls
//! - [`api`] has one HTTP client per resource
//! - [`repositories`] combine calls with the session and return `Result<T, ClientError>`
//! - [`view_models`] expose each user action as an observable [`view_models::UiState`]
//!
//! # Example
//!
//! ```no_run
//! use client::{WorkitClient, config::ClientConfig};
//!
//! async fn example_usage() -> Result<(), client::error::ClientError> {
//!     let client = WorkitClient::connect(ClientConfig::from_env()?).await?;
//!
//!     let login = client.login_view_model();
//!     login.login("ana@example.com", "minhasenha123").await;
//!
//!     let feed = client.feed_view_model();
//!     if let Some(posts) = feed.load_feed().await.success() {
//!         println!("{} posts", posts.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod interceptor;
pub mod repositories;
pub mod token_store;
pub mod view_models;

use crate::{
    api::{ApiClient, AuthApi, GroupApi, PostApi, StorageApi, UserApi},
    config::ClientConfig,
    error::ClientResult,
    interceptor::AuthInterceptor,
    repositories::{
        AuthRepository, GroupsRepository, PostsRepository, StorageRepository, UserRepository,
    },
    token_store::TokenStore,
    view_models::{
        FeedViewModel, GroupsViewModel, LoginViewModel, PostViewModel, ProfileViewModel,
        RegisterViewModel,
    },
};

/// Everything wired together for one API and one session file
#[derive(Clone)]
pub struct WorkitClient {
    pub store: Arc<TokenStore>,
    pub auth: AuthRepository,
    pub users: UserRepository,
    pub groups: GroupsRepository,
    pub posts: PostsRepository,
    pub storage: StorageRepository,
}

impl WorkitClient {
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        let store = Arc::new(TokenStore::open(&config.token_path).await?);
        let api = ApiClient::new(&config.base_url, AuthInterceptor::new(store.clone()))?;

        Ok(Self {
            auth: AuthRepository::new(AuthApi::new(api.clone()), store.clone()),
            users: UserRepository::new(UserApi::new(api.clone()), store.clone()),
            groups: GroupsRepository::new(
                GroupApi::new(api.clone()),
                UserApi::new(api.clone()),
                store.clone(),
            ),
            posts: PostsRepository::new(PostApi::new(api.clone()), store.clone()),
            storage: StorageRepository::new(StorageApi::new(api)),
            store,
        })
    }

    pub fn login_view_model(&self) -> LoginViewModel {
        LoginViewModel::new(self.auth.clone())
    }

    pub fn register_view_model(&self) -> RegisterViewModel {
        RegisterViewModel::new(self.auth.clone())
    }

    pub fn groups_view_model(&self) -> GroupsViewModel {
        GroupsViewModel::new(self.groups.clone(), self.storage.clone())
    }

    pub fn feed_view_model(&self) -> FeedViewModel {
        FeedViewModel::new(self.posts.clone())
    }

    pub fn post_view_model(&self) -> PostViewModel {
        PostViewModel::new(self.posts.clone(), self.storage.clone())
    }

    pub fn profile_view_model(&self) -> ProfileViewModel {
        ProfileViewModel::new(self.users.clone(), self.auth.clone(), self.storage.clone())
    }
}
