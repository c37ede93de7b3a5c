//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: MySQL container with automatic cleanup (feature: "mysql")
//! - SQL fixtures for a table with a primary key and one without
//! - `TestDataBuilder`: deterministic names for tables and rows
//!
//! Container-backed tests need Docker and are marked `#[ignore]`; run them
//! with `cargo test -- --ignored`.
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mysql_test() {
//!     let db = TestDatabase::with_fixtures().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let table = builder.table_name("notes");
//! }
//! ```

#[cfg(feature = "mysql")]
mod mysql;

#[cfg(feature = "mysql")]
pub use mysql::{AUDIT_LOG_FIXTURE, STUDENTS_FIXTURE, TEST_DATABASE, TestDatabase};

/// Builder for deterministic test data
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_describe_table");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A table name unique to this test, at most 64 characters.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(7).table_name("notes");
    /// assert_eq!(name, "t_notes_7");
    /// ```
    pub fn table_name(&self, prefix: &str) -> String {
        let name = format!("t_{}_{}", prefix, self.seed);
        name.chars().take(64).collect()
    }

    /// A row label unique to this test
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);
        assert_eq!(a.table_name("notes"), b.table_name("notes"));
        assert_eq!(a.name("row", "x"), b.name("row", "x"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");
        assert_ne!(a.table_name("notes"), b.table_name("notes"));
    }

    #[test]
    fn test_table_name_fits_mysql_limit() {
        let name = TestDataBuilder::new(u64::MAX).table_name(&"x".repeat(80));
        assert!(name.chars().count() <= 64);
    }
}
