//! Database library providing PostgreSQL connectivity for the catalog services
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::{common::RetryConfig, postgres};
//! use migration::Migrator;
//!
//! let retry = RetryConfig::fixed(10, std::time::Duration::from_secs(2));
//! let db = postgres::connect_from_config_with_retry(config, Some(retry)).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
