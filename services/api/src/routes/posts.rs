//! Activity post routes

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::error::DatabaseError;
use tracing::error;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::{JsonBody, PathParams},
    middleware::AuthUser,
    models::{CreatePostRequest, UpdatePostRequest},
    state::AppState,
    validation::{validate_optional, validate_required},
};

fn post_not_found() -> ApiError {
    ApiError::NotFound("Post not found".to_string())
}

fn missing_reference(e: DatabaseError) -> ApiError {
    match e {
        DatabaseError::ForeignKeyViolation(_) => {
            ApiError::NotFound("Group or user not found".to_string())
        }
        other => other.into(),
    }
}

/// Fail unless `user` wrote post `id`
async fn ensure_owner(state: &AppState, id: Uuid, user: AuthUser) -> ApiResult<()> {
    let owner = state
        .post_repository
        .get_owner(id)
        .await?
        .ok_or_else(post_not_found)?;

    if owner != user.id {
        return Err(ApiError::Forbidden(
            "Only the author can modify this post".to_string(),
        ));
    }

    Ok(())
}

/// Create a post, authored by the caller unless `userId` says otherwise
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_required("title", &payload.title).map_err(ApiError::Validation)?;

    let author = payload.user_id.unwrap_or(user.id);

    let post = state
        .post_repository
        .create(&payload, author)
        .await
        .map_err(missing_reference)?
        .ok_or_else(|| {
            error!("Post vanished right after creation");
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Get all posts, newest first
pub async fn get_posts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.post_repository.get_all().await?))
}

/// Get a group's posts, newest first
pub async fn get_group_posts(
    State(state): State<AppState>,
    PathParams(group_id): PathParams<Uuid>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.post_repository.get_by_group(group_id).await?))
}

/// Get a post by ID
pub async fn get_post(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .post_repository
        .get_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(Json(post))
}

/// Update the provided fields of the caller's post
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    PathParams(id): PathParams<Uuid>,
    JsonBody(changes): JsonBody<UpdatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_optional(changes.title.as_deref(), |title| {
        validate_required("title", title)
    })
    .map_err(ApiError::Validation)?;

    ensure_owner(&state, id, user).await?;

    let post = state
        .post_repository
        .update(id, &changes)
        .await
        .map_err(missing_reference)?
        .ok_or_else(post_not_found)?;

    Ok(Json(post))
}

/// Delete the caller's post
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<StatusCode> {
    ensure_owner(&state, id, user).await?;

    if state.post_repository.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(post_not_found())
    }
}
