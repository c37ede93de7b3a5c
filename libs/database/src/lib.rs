//! Database connection management for MySQL
//!
//! Wraps SeaORM's connection handle with config loading, startup retry,
//! health checks, and identifier quoting.
//!
//! # Features
//!
//! - `mysql` (default) - MySQL support with SeaORM
//! - `config` - `core_config::FromEnv` for `MySqlConfig`
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mysql::{self, MySqlConfig};
//!
//! let config = MySqlConfig::from_env()?;
//! let db = mysql::connect_from_config_with_retry(config, None).await?;
//! mysql::check_health(&db).await?;
//! ```

pub mod common;

#[cfg(feature = "mysql")]
pub mod mysql;

pub use common::{DatabaseError, DatabaseResult};
