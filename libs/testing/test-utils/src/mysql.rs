//! MySQL test infrastructure
//!
//! Provides a `TestDatabase` helper that starts a MySQL container and seeds
//! it with plain SQL.

use database::common::RetryConfig;
use database::mysql::{self, MySqlConfig};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;

/// Schema created by the MySQL image
pub const TEST_DATABASE: &str = "test";

/// Table with a primary key and text columns used for row descriptions
pub const STUDENTS_FIXTURE: &str = r#"
CREATE TABLE students (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(255) UNIQUE,
    bio TEXT,
    gpa DECIMAL(3,2),
    cohort YEAR,
    active BIT(1) NOT NULL DEFAULT b'1',
    enrolled_at DATETIME DEFAULT CURRENT_TIMESTAMP
);
INSERT INTO students (name, email, bio, gpa, cohort, active) VALUES
    ('Ada Lovelace', 'ada@example.com', 'Wrote the first published algorithm', 3.95, 2019, b'1'),
    ('Alan Turing', 'alan@example.com', NULL, 3.70, 2020, b'0'),
    ('Grace Hopper', 'grace@example.com', 'Built the first compiler', 3.88, 2021, b'1');
"#;

/// Table without a primary key
pub const AUDIT_LOG_FIXTURE: &str = r#"
CREATE TABLE audit_log (
    happened_at DATETIME NOT NULL,
    action VARCHAR(50) NOT NULL,
    INDEX idx_action (action)
);
INSERT INTO audit_log (happened_at, action) VALUES ('2024-01-01 10:00:00', 'login');
"#;

/// Test database wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
pub struct TestDatabase {
    #[allow(dead_code)]
    container: ContainerAsync<Mysql>,
    pub connection: DatabaseConnection,
    pub connection_string: String,
}

impl TestDatabase {
    /// Start an empty MySQL 8 database.
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// db.execute_script(test_utils::STUDENTS_FIXTURE).await;
    /// # }
    /// ```
    pub async fn new() -> Self {
        let container = Mysql::default()
            .with_tag("8.4")
            .start()
            .await
            .expect("Failed to start MySQL container");

        let host_port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get host port");

        let connection_string = format!("mysql://root@127.0.0.1:{}/{}", host_port, TEST_DATABASE);

        // mysqld restarts once during init; retry until it accepts connections
        let retry = RetryConfig::new()
            .with_max_retries(20)
            .with_initial_delay(250)
            .with_max_delay(2000);
        let connection = mysql::connect_from_config_with_retry(
            MySqlConfig::new(&connection_string).with_pool_size(5, 1),
            Some(retry),
        )
        .await
        .expect("Failed to connect to test database");

        tracing::info!(port = host_port, "Test database ready (MySQL 8.4)");

        Self {
            container,
            connection,
            connection_string,
        }
    }

    /// Start a database seeded with the `students` and `audit_log` fixtures.
    pub async fn with_fixtures() -> Self {
        let db = Self::new().await;
        db.execute_script(STUDENTS_FIXTURE).await;
        db.execute_script(AUDIT_LOG_FIXTURE).await;
        db
    }

    /// Run a `;`-separated SQL script. Statements must not contain `;` in literals.
    pub async fn execute_script(&self, sql: &str) {
        for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            self.connection
                .execute_unprepared(statement)
                .await
                .unwrap_or_else(|e| panic!("Failed to run statement `{}`: {}", statement, e));
        }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test database container");
    }
}
