//! MySQL connector and helpers
//!
//! Provides the shared connection handle, health checks, and identifier
//! quoting for statements that interpolate table or column names.

mod config;
mod connector;
mod health;
mod identifier;

pub use config::{DEFAULT_DATABASE, MySqlConfig, database_from_url};
pub use connector::{connect, connect_from_config, connect_from_config_with_retry, connect_with_options};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use identifier::{MAX_IDENTIFIER_LEN, quote_identifier};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseBackend, DatabaseConnection, DbErr};

/// Backend used to build raw statements against this database
pub const BACKEND: DatabaseBackend = DatabaseBackend::MySql;
