use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::error::DatabaseError;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::{JsonBody, PathParams},
    middleware::AuthUser,
    models::UpdateUserRequest,
    state::AppState,
    validation::{validate_email, validate_name, validate_optional},
};

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// Accounts can only be changed by their owner
fn ensure_self(user: AuthUser, id: Uuid) -> ApiResult<()> {
    if user.id != id {
        return Err(ApiError::Forbidden(
            "You can only modify your own account".to_string(),
        ));
    }
    Ok(())
}

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.user_repository.get_all().await?))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .get(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(user))
}

/// Update the provided profile fields
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    PathParams(id): PathParams<Uuid>,
    JsonBody(changes): JsonBody<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    ensure_self(user, id)?;
    validate_optional(changes.name.as_deref(), validate_name).map_err(ApiError::Validation)?;
    validate_optional(changes.email.as_deref(), validate_email).map_err(ApiError::Validation)?;

    let user = state
        .user_repository
        .update(id, &changes)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => {
                ApiError::Conflict("Email already in use".to_string())
            }
            other => other.into(),
        })?
        .ok_or_else(user_not_found)?;

    Ok(Json(user))
}

/// Delete the caller's own account
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult<StatusCode> {
    ensure_self(user, id)?;
    if state.user_repository.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(user_not_found())
    }
}
