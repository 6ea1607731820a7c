//! Client configuration

use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ClientError;

/// Where the API lives and where the session is persisted
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://localhost:3000`
    pub base_url: String,
    /// JSON file holding the bearer token and user id
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ClientEnv {
    api_url: Option<String>,
    token_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            token_path: token_path.into(),
        }
    }

    /// Load from environment variables
    ///
    /// # Environment Variables
    /// - `WORKIT_API_URL`: API base URL (default: `http://localhost:3000`)
    /// - `WORKIT_TOKEN_PATH`: Session file (default: `<config dir>/workit/auth.json`)
    pub fn from_env() -> Result<Self, ClientError> {
        let env: ClientEnv = Config::builder()
            .add_source(Environment::with_prefix("WORKIT"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ClientError::Storage(format!("Invalid client configuration: {}", e)))?;

        Ok(Self {
            base_url: env
                .api_url
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            token_path: env.token_path.unwrap_or_else(default_token_path),
        })
    }
}

/// `<config dir>/workit/auth.json`, falling back to the working directory
pub fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("workit")
        .join("auth.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults_and_overrides() {
        unsafe {
            std::env::remove_var("WORKIT_API_URL");
            std::env::remove_var("WORKIT_TOKEN_PATH");
        }
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.token_path.ends_with("workit/auth.json"));

        unsafe {
            std::env::set_var("WORKIT_API_URL", "https://api.workit.app");
            std::env::set_var("WORKIT_TOKEN_PATH", "/tmp/workit-session.json");
        }
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://api.workit.app");
        assert_eq!(config.token_path, PathBuf::from("/tmp/workit-session.json"));

        unsafe {
            std::env::remove_var("WORKIT_API_URL");
            std::env::remove_var("WORKIT_TOKEN_PATH");
        }
    }
}
