//! Application state shared across handlers

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{GroupRepository, PostRepository, UserRepository},
    storage::StorageProvider,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub group_repository: GroupRepository,
    pub post_repository: PostRepository,
    pub storage: Arc<dyn StorageProvider>,
    /// Base URL that file URLs are built from, without a trailing slash
    pub public_url: String,
}

impl AppState {
    pub fn new(
        db_pool: PgPool,
        jwt_service: JwtService,
        storage: Arc<dyn StorageProvider>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            user_repository: UserRepository::new(db_pool.clone()),
            group_repository: GroupRepository::new(db_pool.clone()),
            post_repository: PostRepository::new(db_pool.clone()),
            db_pool,
            jwt_service,
            storage,
            public_url: public_url.into(),
        }
    }
}

impl FromRef<AppState> for JwtService {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_service.clone()
    }
}
