//! Upload and serve image files

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::PathParams,
    models::UploadResponse,
    state::AppState,
};

/// Largest accepted file: 5 MiB
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for uploads, leaving room for multipart framing
pub const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

fn multipart_error(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("File exceeds the 5 MiB limit".to_string())
    } else {
        ApiError::BadRequest(message)
    }
}

/// Store the multipart field `file` and return where it can be fetched
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let mut multipart =
        multipart.map_err(|rejection| multipart_error(rejection.status(), rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "Unsupported file type '{}'; allowed: {}",
                content_type,
                ALLOWED_CONTENT_TYPES.join(", ")
            )));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text()))?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("File is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::PayloadTooLarge(
                "File exceeds the 5 MiB limit".to_string(),
            ));
        }

        info!("Uploading {} ({} bytes, {})", filename, bytes.len(), content_type);

        let key = state
            .storage
            .upload_file(bytes.to_vec(), &filename, &content_type)
            .await?;

        let response = UploadResponse {
            message: "File uploaded successfully".to_string(),
            url: format!("{}/storage/files/{}", state.public_url, key),
            key,
        };

        return Ok((StatusCode::CREATED, Json(response)));
    }

    Err(ApiError::BadRequest("Missing file field 'file'".to_string()))
}

/// Serve a stored file
pub async fn get_file(
    State(state): State<AppState>,
    PathParams(key): PathParams<String>,
) -> ApiResult<impl IntoResponse> {
    let file = state.storage.get_file(&key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        file.bytes,
    ))
}

/// Delete a stored file
pub async fn delete_file(
    State(state): State<AppState>,
    PathParams(key): PathParams<String>,
) -> ApiResult<StatusCode> {
    state.storage.delete_file(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
