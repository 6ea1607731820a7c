//! Client error type

use thiserror::Error;

/// Everything a client call can fail with
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// No token or user id is stored locally
    #[error("User not authenticated")]
    Unauthenticated,

    /// The server answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never got a response
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The local token file could not be read or written
    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
