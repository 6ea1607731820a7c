//! Shared infrastructure for the Workit services
//!
//! Database configuration, pooling, migrations and the database error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! # async fn run() -> Result<(), common::error::DatabaseError> {
//! let pool = init_pool(&DatabaseConfig::from_env()?).await?;
//! assert!(health_check(&pool).await?);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
