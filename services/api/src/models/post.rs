//! Post model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::group::{GroupResponse, UserSummary};

/// Kind of workout a post records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "activity_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    WeightTraining,
    Swimming,
    Other,
}

/// Post joined with its author and group
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub activity_type: ActivityType,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: String,
    pub group_id: Uuid,
    pub group_name: String,
    pub group_description: Option<String>,
    pub group_image_url: Option<String>,
    pub group_created_at: DateTime<Utc>,
    pub group_updated_at: DateTime<Utc>,
}

impl PostRow {
    pub fn into_response(self, members: Vec<UserSummary>) -> PostResponse {
        PostResponse {
            id: self.id,
            title: self.title,
            activity_type: self.activity_type,
            body: self.body,
            image_url: self.image_url,
            location: self.location,
            created_at: self.created_at,
            updated_at: self.updated_at,
            user: UserSummary {
                id: self.user_id,
                name: self.user_name,
            },
            group: GroupResponse {
                id: self.group_id,
                name: self.group_name,
                image_url: self.group_image_url,
                description: self.group_description,
                created_at: self.group_created_at,
                updated_at: self.group_updated_at,
                users: members,
            },
        }
    }
}

/// Response for post operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub activity_type: ActivityType,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
    pub group: GroupResponse,
}

/// New post creation payload
///
/// `user_id` falls back to the authenticated user when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostRequest {
    pub title: String,
    pub activity_type: ActivityType,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub group_id: Uuid,
    pub user_id: Option<Uuid>,
}

/// Post update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub activity_type: Option<ActivityType>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub body: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub location: Option<Option<String>>,
    pub group_id: Option<Uuid>,
}
