use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::MySqlConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Connect to MySQL with the default pool settings
///
/// ```ignore
/// let db = database::mysql::connect("mysql://root@localhost:3306/goocampus_db").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(MySqlConfig::new(database_url)).await
}

/// Connect using a `MySqlConfig`
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::mysql::{MySqlConfig, connect_from_config};
///
/// let db = connect_from_config(MySqlConfig::from_env()?).await?;
/// ```
pub async fn connect_from_config(config: MySqlConfig) -> Result<DatabaseConnection, DbErr> {
    let database = config.database.clone();
    let db = Database::connect(config.into_connect_options()).await?;
    info!(database = %database, "Connected to MySQL database");
    Ok(db)
}

/// Connect with caller-supplied connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to MySQL database with custom options");
    Ok(db)
}

/// Connect from config, retrying with exponential backoff on failure
///
/// `None` uses `RetryConfig::default()`.
///
/// ```ignore
/// let retry = RetryConfig::new().with_max_retries(10);
/// let db = connect_from_config_with_retry(config, Some(retry)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: MySqlConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let database = config.database.clone();
    let options = config.into_connect_options();

    let db = retry_with_backoff(
        || Database::connect(options.clone()),
        retry_config.unwrap_or_default(),
    )
    .await?;

    info!(database = %database, "Connected to MySQL database");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires a running MySQL server
    async fn test_connect() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mysql://root@localhost:3306/test_db".to_string());

        assert!(connect(&url).await.is_ok());
    }
}
