//! Workit API service
//!
//! REST backend for the Workit fitness groups app: accounts and JWT auth,
//! groups and memberships, activity posts and image uploads.

use sqlx::migrate::Migrator;

pub mod config;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod storage;
pub mod validation;

pub use state::AppState;

/// Schema migrations embedded from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!();
