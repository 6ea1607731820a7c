//! Registration and login

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::error::DatabaseError;
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    models::{LoginRequest, RegisterRequest, TokenResponse},
    password::{hash_password, verify_password},
    state::AppState,
    validation::{validate_email, validate_name, validate_password},
};

fn issue_token(state: &AppState, user_id: uuid::Uuid) -> ApiResult<TokenResponse> {
    let token = state.jwt_service.generate_token(user_id).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(TokenResponse { token })
}

/// Create an account and return a token for it
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_name(&payload.name).map_err(ApiError::Validation)?;
    validate_email(&payload.email).map_err(ApiError::Validation)?;
    validate_password(&payload.password).map_err(ApiError::Validation)?;

    info!("Registration attempt for {}", payload.email);

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;

    let user = state
        .user_repository
        .create(payload.name.trim(), &payload.email, &password_hash)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => {
                ApiError::Conflict("Email already registered".to_string())
            }
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, user.id)?)))
}

/// Exchange credentials for a token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for {}", payload.email);

    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(invalid)?;

    let matches = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        warn!("Unreadable password hash for user {}: {}", user.id, e);
        invalid()
    })?;

    if !matches {
        return Err(invalid());
    }

    Ok(Json(issue_token(&state, user.id)?))
}
