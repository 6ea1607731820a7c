//! Group and membership routes

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::error::DatabaseError;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::{JsonBody, PathParams},
    middleware::AuthUser,
    models::{CreateGroupRequest, UpdateGroupRequest},
    state::AppState,
    validation::{validate_optional, validate_required},
};

fn group_not_found() -> ApiError {
    ApiError::NotFound("Group not found".to_string())
}

/// Create a group with the caller as its first member
pub async fn create_group(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CreateGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_required("name", &payload.name).map_err(ApiError::Validation)?;

    let group = state
        .group_repository
        .create(&payload, user.id)
        .await
        .map_err(|e| match e {
            // the token outlived its user
            DatabaseError::ForeignKeyViolation(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(group)))
}

/// Get all groups
pub async fn get_groups(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.group_repository.get_all().await?))
}

/// Groups the user has not joined yet
pub async fn explore_groups(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<Uuid>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.group_repository.get_not_joined(user_id).await?))
}

/// Groups whose name contains the search term
pub async fn search_groups(
    State(state): State<AppState>,
    PathParams(name): PathParams<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.group_repository.search_by_name(&name).await?))
}

/// The user's groups whose name contains the search term
pub async fn search_user_groups(
    State(state): State<AppState>,
    PathParams((user_id, name)): PathParams<(Uuid, String)>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state
            .group_repository
            .search_user_groups(user_id, &name)
            .await?,
    ))
}

/// Get a group by ID
pub async fn get_group(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let group = state
        .group_repository
        .get_by_id(id)
        .await?
        .ok_or_else(group_not_found)?;

    Ok(Json(group))
}

/// Update the provided group fields
pub async fn update_group(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(changes): JsonBody<UpdateGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_optional(changes.name.as_deref(), |name| validate_required("name", name))
        .map_err(ApiError::Validation)?;

    let group = state
        .group_repository
        .update(id, &changes)
        .await?
        .ok_or_else(group_not_found)?;

    Ok(Json(group))
}

/// Delete a group with its memberships and posts
pub async fn delete_group(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<StatusCode> {
    if state.group_repository.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(group_not_found())
    }
}

/// Join a user to a group
pub async fn add_member(
    State(state): State<AppState>,
    PathParams((group_id, user_id)): PathParams<(Uuid, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    let membership = state
        .group_repository
        .add_member(group_id, user_id)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => {
                ApiError::Conflict("User is already a member of this group".to_string())
            }
            DatabaseError::ForeignKeyViolation(_) => {
                ApiError::NotFound("Group or user not found".to_string())
            }
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// Remove a user from a group
pub async fn remove_member(
    State(state): State<AppState>,
    PathParams((group_id, user_id)): PathParams<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    if state
        .group_repository
        .remove_member(group_id, user_id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(
            "User is not a member of this group".to_string(),
        ))
    }
}
