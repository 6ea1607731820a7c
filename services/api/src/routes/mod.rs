//! API service routes

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod groups;
pub mod posts;
pub mod storage;
pub mod users;


/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(users::get_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/groups",
            get(groups::get_groups).post(groups::create_group),
        )
        .route("/groups/explore/:user_id", get(groups::explore_groups))
        .route("/groups/search/:name", get(groups::search_groups))
        .route(
            "/groups/user/:user_id/search/:name",
            get(groups::search_user_groups),
        )
        .route(
            "/groups/:id",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
        .route(
            "/groups/:id/users/:user_id",
            post(groups::add_member).delete(groups::remove_member),
        )
        .route("/posts", get(posts::get_posts).post(posts::create_post))
        .route("/posts/group/:group_id", get(posts::get_group_posts))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/storage/upload",
            post(storage::upload_file).layer(DefaultBodyLimit::max(storage::BODY_LIMIT)),
        )
        .route(
            "/storage/files/:key",
            get(storage::get_file).delete(storage::delete_file),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": "ok",
        "service": "api-service",
        "database": database,
    }))
}
