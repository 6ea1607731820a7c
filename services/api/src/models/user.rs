//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Reshape into the public DTO, dropping the password hash
    pub fn into_response(self, groups: Vec<GroupSummary>) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email,
            name: self.name,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            groups,
        }
    }
}

/// Group a user belongs to
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct GroupSummary {
    pub id: Uuid,
    pub name: String,
}

/// Response for user operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub groups: Vec<GroupSummary>,
}

/// User update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub avatar_url: Option<Option<String>>,
}
