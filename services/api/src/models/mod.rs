//! API models for request and response payloads

pub mod auth;
pub mod group;
pub mod post;
pub mod storage;
pub mod user;

use serde::{Deserialize, Deserializer};

// Re-export for convenience
pub use auth::{LoginRequest, RegisterRequest, TokenResponse};
pub use group::{
    CreateGroupRequest, Group, GroupResponse, MembershipResponse, UpdateGroupRequest, UserSummary,
};
pub use post::{ActivityType, CreatePostRequest, PostResponse, PostRow, UpdatePostRequest};
pub use storage::UploadResponse;
pub use user::{GroupSummary, UpdateUserRequest, User, UserResponse};

/// Deserialize a clearable field: absent stays `None`, an explicit `null` becomes `Some(None)`
///
/// Use with `#[serde(default, deserialize_with = "crate::models::nullable")]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
