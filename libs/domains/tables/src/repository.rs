use async_trait::async_trait;
use axum_helpers::PageRequest;

use crate::error::TableResult;
use crate::models::{ColumnInfo, DatabaseInfo, Row, TableName};

/// Read access to the tables of the connected schema.
///
/// Implementations take names that the caller has already matched against
/// [`list_tables`](TableRepository::list_tables).
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Tables and views of the current schema, sorted by name
    async fn list_tables(&self) -> TableResult<Vec<TableName>>;

    /// Column metadata in ordinal order
    async fn describe(&self, table: &TableName) -> TableResult<Vec<ColumnInfo>>;

    async fn count_rows(&self, table: &TableName) -> TableResult<u64>;

    /// Rows in storage order; every row when `page` is `None`
    async fn fetch_rows(&self, table: &TableName, page: Option<PageRequest>)
    -> TableResult<Vec<Row>>;

    /// Current schema name and server version
    async fn server_info(&self) -> TableResult<(Option<String>, String)>;
}
