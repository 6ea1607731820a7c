//! Service configuration loaded from environment variables

use anyhow::Result;
use config::{Config, Environment};
use serde::{Deserialize, de::DeserializeOwned};
use std::path::PathBuf;

use common::database::DatabaseConfig;

use crate::jwt::JwtConfig;

/// Deserialize the process environment into `T`, matching lowercased variable names
pub(crate) fn load_env<T: DeserializeOwned>() -> Result<T> {
    let env = Config::builder()
        .add_source(Environment::default())
        .build()?
        .try_deserialize()?;
    Ok(env)
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Externally visible base URL, used to build file URLs
    pub public_url: String,
}

#[derive(Debug, Deserialize)]
struct ServerEnv {
    port: Option<u16>,
    public_url: Option<String>,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: Listening port (default: 3000)
    /// - `PUBLIC_URL`: Base URL clients use to reach the service (default: `http://localhost:<PORT>`)
    pub fn from_env() -> Result<Self> {
        let env: ServerEnv = load_env()?;
        let port = env.port.unwrap_or(3000);
        let public_url = env
            .public_url
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        Ok(Self {
            port,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Which storage backend serves uploads
#[derive(Debug, Clone, PartialEq)]
pub enum StorageDriver {
    Local(PathBuf),
    S3 { bucket: String },
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub driver: StorageDriver,
}

#[derive(Debug, Deserialize)]
struct StorageEnv {
    storage_driver: Option<String>,
    storage_local_dir: Option<PathBuf>,
    storage_bucket: Option<String>,
}

impl StorageConfig {
    /// Create a new StorageConfig from environment variables
    ///
    /// # Environment Variables
    /// - `STORAGE_DRIVER`: `local` or `s3` (default: `local`)
    /// - `STORAGE_LOCAL_DIR`: Upload directory for the local driver (default: `./uploads`)
    /// - `STORAGE_BUCKET`: Bucket name for the S3 driver (default: `workit-uploads`)
    pub fn from_env() -> Result<Self> {
        let env: StorageEnv = load_env()?;

        let driver = match env.storage_driver.as_deref().unwrap_or("local") {
            "local" => StorageDriver::Local(
                env.storage_local_dir
                    .unwrap_or_else(|| PathBuf::from("./uploads")),
            ),
            "s3" => StorageDriver::S3 {
                bucket: env
                    .storage_bucket
                    .unwrap_or_else(|| "workit-uploads".to_string()),
            },
            other => anyhow::bail!("Unknown STORAGE_DRIVER: {}", other),
        };

        Ok(Self { driver })
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}
