//! Authentication payloads

use serde::{Deserialize, Serialize};

/// Request for user login
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request for user registration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Bearer token returned by login and registration
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
