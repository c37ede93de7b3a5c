use axum_helpers::{PageQuery, PageRequest, Pagination};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{TableError, TableResult};
use crate::models::{
    ColumnInfo, DatabaseInfo, Row, TableName, TableOverview, TablePage, TableRecords,
    TableSample, TableStatus, TablesOverview, TablesSample,
};
use crate::repository::TableRepository;

/// Rows per table returned by the sample listing when no limit is given
pub const DEFAULT_SAMPLE_LIMIT: u64 = 5;

/// Rows returned by the single-table page when no limit is given
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Table introspection on top of a [`TableRepository`].
///
/// Every operation that takes a caller-supplied name resolves it through
/// [`ensure_exists`](Self::ensure_exists) first.
pub struct TableService<R: TableRepository> {
    repository: Arc<R>,
}

impl<R: TableRepository> Clone for TableService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TableRepository> TableService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn table_names(&self) -> TableResult<Vec<TableName>> {
        self.repository.list_tables().await
    }

    /// Validate `raw` and match it exactly against the live table list.
    pub async fn ensure_exists(&self, raw: &str) -> TableResult<TableName> {
        let requested = TableName::parse(raw)?;
        let tables = self.repository.list_tables().await?;

        tables
            .into_iter()
            .find(|table| *table == requested)
            .ok_or_else(|| TableError::NotFound(requested.to_string()))
    }

    pub async fn describe(&self, table: &TableName) -> TableResult<Vec<ColumnInfo>> {
        self.repository.describe(table).await
    }

    pub async fn count_rows(&self, table: &TableName) -> TableResult<u64> {
        self.repository.count_rows(table).await
    }

    pub async fn fetch_rows(
        &self,
        table: &TableName,
        page: Option<PageRequest>,
    ) -> TableResult<Vec<Row>> {
        self.repository.fetch_rows(table, page).await
    }

    /// Column and row counts for every table. A table that cannot be
    /// inspected is reported with `status: Error` instead of failing the call.
    pub async fn overview(&self) -> TableResult<TablesOverview> {
        let tables = self.repository.list_tables().await?;
        let mut overviews = Vec::with_capacity(tables.len());

        for table in tables {
            let counts = async {
                let columns = self.repository.describe(&table).await?.len() as u64;
                let rows = self.repository.count_rows(&table).await?;
                Ok::<_, TableError>((columns, rows))
            }
            .await;

            overviews.push(match counts {
                Ok((columns, rows)) => TableOverview {
                    table_name: table,
                    columns: Some(columns),
                    rows: Some(rows),
                    status: TableStatus::Ok,
                    error: None,
                },
                Err(e) => {
                    warn!(table = %table, error = %e, "Failed to inspect table");
                    TableOverview {
                        table_name: table,
                        columns: None,
                        rows: None,
                        status: TableStatus::Error,
                        error: Some(e.to_string()),
                    }
                }
            });
        }

        Ok(TablesOverview {
            total_tables: overviews.len(),
            tables: overviews,
        })
    }

    /// Structure, row count and the first rows of every table.
    pub async fn samples(&self, query: &PageQuery) -> TableResult<TablesSample> {
        let limit = query.limit().unwrap_or(DEFAULT_SAMPLE_LIMIT);
        let tables = self.repository.list_tables().await?;
        let mut samples = Vec::with_capacity(tables.len());

        for table in tables {
            info!(table = %table, "Processing table");

            let sample = async {
                let structure = self.repository.describe(&table).await?;
                let row_count = self.repository.count_rows(&table).await?;
                let rows = self
                    .repository
                    .fetch_rows(&table, Some(PageRequest::new(limit, 0)))
                    .await?;
                Ok::<_, TableError>((structure, row_count, rows))
            }
            .await;

            samples.push(match sample {
                Ok((structure, row_count, rows)) => TableSample {
                    table_name: table,
                    structure: Some(structure),
                    row_count: Some(row_count),
                    sample_data: Some(rows),
                    status: TableStatus::Ok,
                    error: None,
                },
                Err(e) => {
                    warn!(table = %table, error = %e, "Failed to sample table");
                    TableSample {
                        table_name: table,
                        structure: None,
                        row_count: None,
                        sample_data: None,
                        status: TableStatus::Error,
                        error: Some(e.to_string()),
                    }
                }
            });
        }

        Ok(TablesSample {
            total_tables: samples.len(),
            sample_limit: limit,
            tables: samples,
        })
    }

    /// Structure plus one page of rows with page arithmetic.
    pub async fn page(&self, raw: &str, query: &PageQuery) -> TableResult<TablePage> {
        let table = self.ensure_exists(raw).await?;
        let page = query.page(DEFAULT_PAGE_LIMIT);

        let structure = self.repository.describe(&table).await?;
        let total = self.repository.count_rows(&table).await?;
        let records = self.repository.fetch_rows(&table, Some(page)).await?;

        info!(table = %table, total, returned = records.len(), "Retrieved table page");

        Ok(TablePage {
            table_name: table,
            structure,
            records,
            pagination: Pagination::new(page, total),
        })
    }

    /// Every row of the table, or one window of it when a limit is given.
    pub async fn records(&self, raw: &str, query: &PageQuery) -> TableResult<TableRecords> {
        let table = self.ensure_exists(raw).await?;

        let (records, pagination) = match query.limit() {
            Some(limit) => {
                let page = PageRequest::new(limit, query.offset());
                let total = self.repository.count_rows(&table).await?;
                let records = self.repository.fetch_rows(&table, Some(page)).await?;
                (records, Some(Pagination::new(page, total)))
            }
            None => (self.repository.fetch_rows(&table, None).await?, None),
        };

        Ok(TableRecords {
            table_name: table,
            records,
            pagination,
        })
    }

    pub async fn info(&self) -> TableResult<DatabaseInfo> {
        let (current_database, mysql_version) = self.repository.server_info().await?;
        let tables = self.repository.list_tables().await?;

        Ok(DatabaseInfo {
            current_database,
            mysql_version,
            tables,
        })
    }
}
