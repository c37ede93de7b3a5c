use axum_helpers::{PageQuery, PageRequest, Pagination};
use chrono::Utc;
use core_config::{ConfigError, FromEnv, env_parse};
use database::mysql::DEFAULT_DATABASE;
use domain_tables::{ColumnInfo, Row, TableError, TableName, TableRepository, TableService};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::content::{row_content, schema_content};
use crate::embedding::EmbeddingProvider;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{
    AllEmbeddings, EMBEDDINGS_COLUMN, EMBEDDINGS_TABLE, EmbeddingStatistics, FailedRowEmbedding,
    FailedTable, NewEmbedding, NumberDouble, NumberInt, RowEmbeddingOutcome, RowEmbeddingReport,
    RowEmbeddingsSummary, RowMetadata, SchemaEmbeddingsSummary, SchemaMetadata, StoredMetadata,
    StoredRowEmbedding, TableEmbeddings, TableRowSummary, TableSchemaEmbedding,
    TableSchemaOutcome,
};
use crate::store::EmbeddingStore;

/// Embeddings listed per table when no limit is given
pub const DEFAULT_TABLE_EMBEDDINGS_LIMIT: u64 = 10;

/// Embeddings listed across all tables when no limit is given
pub const DEFAULT_ALL_EMBEDDINGS_LIMIT: u64 = 20;

pub const DEFAULT_ROW_DELAY_MS: u64 = 150;

/// Tunables for the row embedding workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingSettings {
    /// Pause after each successfully embedded row
    pub row_delay: Duration,
    /// Reported as `databaseName` in embedding metadata
    pub database_name: String,
}

impl EmbeddingSettings {
    pub fn with_database_name(mut self, database_name: impl Into<String>) -> Self {
        self.database_name = database_name.into();
        self
    }

    pub fn with_row_delay(mut self, row_delay: Duration) -> Self {
        self.row_delay = row_delay;
        self
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            row_delay: Duration::from_millis(DEFAULT_ROW_DELAY_MS),
            database_name: DEFAULT_DATABASE.to_string(),
        }
    }
}

/// Reads `EMBEDDING_ROW_DELAY_MS` (default 150). The database name is left at
/// its default; callers set it from the connection config.
impl FromEnv for EmbeddingSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let delay_ms = env_parse("EMBEDDING_ROW_DELAY_MS", DEFAULT_ROW_DELAY_MS)?;
        Ok(Self::default().with_row_delay(Duration::from_millis(delay_ms)))
    }
}

/// Schema and row embedding workflows.
///
/// Rows are processed one at a time. A failure on one row (or, in the bulk
/// operations, one table) is recorded in the result and processing continues.
pub struct EmbeddingService<R: TableRepository, S: EmbeddingStore> {
    tables: TableService<R>,
    store: Arc<S>,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    settings: EmbeddingSettings,
}

impl<R: TableRepository, S: EmbeddingStore> Clone for EmbeddingService<R, S> {
    fn clone(&self) -> Self {
        Self {
            tables: self.tables.clone(),
            store: Arc::clone(&self.store),
            provider: self.provider.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<R: TableRepository, S: EmbeddingStore> EmbeddingService<R, S> {
    pub fn new(tables: TableService<R>, store: S, settings: EmbeddingSettings) -> Self {
        Self {
            tables,
            store: Arc::new(store),
            provider: None,
            settings,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> EmbeddingResult<&Arc<dyn EmbeddingProvider>> {
        self.provider.as_ref().ok_or_else(|| {
            EmbeddingError::Config("OPENAI_API_KEY environment variable is required".to_string())
        })
    }

    /// Embed a description of one table's columns and row count.
    pub async fn schema_embedding(&self, raw: &str) -> EmbeddingResult<TableSchemaEmbedding> {
        let table = self.tables.ensure_exists(raw).await?;
        self.embed_schema(table).await
    }

    /// Schema embeddings for every table except `vector_embeddings`.
    pub async fn all_schema_embeddings(&self) -> EmbeddingResult<SchemaEmbeddingsSummary> {
        self.provider()?;
        let tables = self.embeddable_tables().await?;
        let mut outcomes = Vec::with_capacity(tables.len());

        for table in tables {
            info!(table = %table, "Generating schema embedding");
            let outcome = match self.embed_schema(table.clone()).await {
                Ok(embedding) => TableSchemaOutcome::Generated(embedding),
                Err(e) => {
                    warn!(table = %table, error = %e, "Schema embedding failed");
                    TableSchemaOutcome::Failed(FailedTable::new(table, e.to_string()))
                }
            };
            outcomes.push(outcome);
        }

        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, TableSchemaOutcome::Failed(_)))
            .count();

        Ok(SchemaEmbeddingsSummary {
            total_tables: outcomes.len(),
            successful: outcomes.len() - failed,
            failed,
            tables: outcomes,
        })
    }

    /// Embed a window of rows and persist each vector in both
    /// `vector_embeddings` and the source row's `embeddings` column.
    pub async fn row_embeddings(
        &self,
        raw: &str,
        query: &PageQuery,
    ) -> EmbeddingResult<RowEmbeddingReport> {
        let table = self.tables.ensure_exists(raw).await?;
        self.embed_rows(table, query).await
    }

    /// Row embeddings for every table except `vector_embeddings`, reduced to
    /// per-table counts.
    pub async fn all_row_embeddings(
        &self,
        query: &PageQuery,
    ) -> EmbeddingResult<RowEmbeddingsSummary> {
        self.provider()?;
        let tables = self.embeddable_tables().await?;
        let mut summaries = Vec::with_capacity(tables.len());

        for table in tables {
            let summary = match self.embed_rows(table.clone(), query).await {
                Ok(report) => TableRowSummary::completed(&report),
                Err(e) => {
                    warn!(table = %table, error = %e, "Row embeddings failed");
                    TableRowSummary::failed(table, e.to_string())
                }
            };
            summaries.push(summary);
        }

        Ok(RowEmbeddingsSummary::new(summaries))
    }

    /// Stored embeddings of one table, newest first.
    ///
    /// The name is validated but need not exist: a dropped table may still
    /// have embeddings.
    pub async fn table_embeddings(
        &self,
        raw: &str,
        query: &PageQuery,
    ) -> EmbeddingResult<TableEmbeddings> {
        let table = TableName::parse(raw)?;
        self.store.ensure_embeddings_table().await?;

        let page = query.page(DEFAULT_TABLE_EMBEDDINGS_LIMIT);
        let embeddings = self.store.list_embeddings(Some(table.clone()), page).await?;
        let total = self.store.count_embeddings(Some(table.clone())).await?;

        Ok(TableEmbeddings {
            table_name: table,
            embeddings,
            pagination: Pagination::window(page, total),
        })
    }

    /// Stored embeddings across all tables, newest first, with per-table counts.
    pub async fn all_embeddings(&self, query: &PageQuery) -> EmbeddingResult<AllEmbeddings> {
        self.store.ensure_embeddings_table().await?;

        let page = query.page(DEFAULT_ALL_EMBEDDINGS_LIMIT);
        let embeddings = self.store.list_embeddings(None, page).await?;
        let total = self.store.count_embeddings(None).await?;
        let by_table = self.store.counts_by_table().await?;

        Ok(AllEmbeddings {
            embeddings,
            statistics: EmbeddingStatistics {
                total_embeddings: total,
                by_table,
            },
            pagination: Pagination::window(page, total),
        })
    }

    async fn embeddable_tables(&self) -> EmbeddingResult<Vec<TableName>> {
        let tables = self.tables.table_names().await?;
        Ok(tables
            .into_iter()
            .filter(|table| table.as_str() != EMBEDDINGS_TABLE)
            .collect())
    }

    async fn embed_schema(&self, table: TableName) -> EmbeddingResult<TableSchemaEmbedding> {
        let provider = self.provider()?;
        let columns = self.tables.describe(&table).await?;
        let row_count = self.tables.count_rows(&table).await?;

        let content = schema_content(&table, &columns, row_count);
        let embedding = provider.embed(&content).await?;
        let now = epoch_millis();

        info!(
            table = %table,
            columns = columns.len(),
            dimension = embedding.values.len(),
            "Generated schema embedding"
        );

        Ok(TableSchemaEmbedding {
            content,
            embedding: embedding
                .values
                .iter()
                .map(|v| NumberDouble {
                    value: v.to_string(),
                })
                .collect(),
            metadata: SchemaMetadata {
                database_name: self.settings.database_name.clone(),
                description: format!("Table {table} with {} columns", columns.len()),
                table_name: table,
                record_count: NumberInt {
                    value: row_count.to_string(),
                },
            },
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn embed_rows(
        &self,
        table: TableName,
        query: &PageQuery,
    ) -> EmbeddingResult<RowEmbeddingReport> {
        self.store.ensure_embeddings_table().await?;

        let columns = self.tables.describe(&table).await?;
        if !columns.iter().any(|c| c.field == EMBEDDINGS_COLUMN) {
            self.store.add_embeddings_column(&table).await?;
        }

        let key_column = columns
            .iter()
            .find(|c| c.is_primary_key())
            .map(|c| c.field.clone())
            .ok_or_else(|| TableError::MissingPrimaryKey(table.to_string()))?;

        let offset = query.offset();
        let window = match query.limit() {
            Some(limit) => Some(PageRequest::new(limit, offset)),
            None if offset > 0 => Some(PageRequest::new(u64::MAX, offset)),
            None => None,
        };
        let rows = self.tables.fetch_rows(&table, window).await?;

        if rows.is_empty() {
            info!(table = %table, offset, "No rows to embed");
            return Ok(RowEmbeddingReport::new(table, offset, Vec::new()));
        }

        let provider = self.provider()?;
        info!(
            table = %table,
            rows = rows.len(),
            model = %provider.model(),
            "Generating row embeddings"
        );

        let mut outcomes = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row_index = offset + i as u64;
            let primary_key = row.get(&key_column).cloned().unwrap_or(Value::Null);

            let target = RowTarget {
                table: &table,
                columns: &columns,
                key_column: &key_column,
                row,
                row_index,
            };

            match self.embed_row(&**provider, target).await {
                Ok(stored) => {
                    info!(
                        table = %table,
                        row = i + 1,
                        total = rows.len(),
                        embedding_id = stored.embedding_id,
                        "Stored row embedding"
                    );
                    outcomes.push(RowEmbeddingOutcome::Stored(stored));
                    tokio::time::sleep(self.settings.row_delay).await;
                }
                Err(e) => {
                    warn!(table = %table, row = i + 1, error = %e, "Row embedding failed");
                    outcomes.push(RowEmbeddingOutcome::Failed(FailedRowEmbedding::new(
                        table.clone(),
                        row_index,
                        primary_key,
                        e.to_string(),
                    )));
                }
            }
        }

        Ok(RowEmbeddingReport::new(table, offset, outcomes))
    }

    async fn embed_row(
        &self,
        provider: &dyn EmbeddingProvider,
        target: RowTarget<'_>,
    ) -> EmbeddingResult<StoredRowEmbedding> {
        let RowTarget {
            table,
            columns,
            key_column,
            row,
            row_index,
        } = target;

        let primary_key = row.get(key_column).cloned().unwrap_or(Value::Null);
        if primary_key.is_null() {
            return Err(EmbeddingError::Internal(format!(
                "Row has no value for primary key column '{key_column}'"
            )));
        }

        let content = row_content(table, columns, row, row_index);
        let embedding = provider.embed(&content).await?;
        let description = format!("Row data from table {table}");

        let new = NewEmbedding {
            table_name: table.clone(),
            row_id: row_id(&primary_key),
            content: content.clone(),
            embedding: embedding.values.clone(),
            metadata: StoredMetadata {
                database_name: self.settings.database_name.clone(),
                table_name: table.clone(),
                row_index,
                primary_key_column: key_column.to_string(),
                primary_key_value: primary_key.clone(),
                description: description.clone(),
            },
        };

        let embedding_id = self.store.store_embedding(&new).await?;
        let updated = self
            .store
            .write_row_embedding(table, key_column, &primary_key, &embedding)
            .await?;
        if updated == 0 {
            warn!(table = %table, key = %primary_key, "Source row was not updated");
        }

        let now = epoch_millis();
        Ok(StoredRowEmbedding {
            embedding_id,
            content,
            embedding: embedding.values,
            metadata: RowMetadata {
                database_name: self.settings.database_name.clone(),
                table_name: table.clone(),
                row_index,
                primary_key,
                description,
                stored_in_table: updated > 0,
                stored_in_embeddings_table: true,
            },
            created_at: now.clone(),
            updated_at: now,
        })
    }
}

struct RowTarget<'a> {
    table: &'a TableName,
    columns: &'a [ColumnInfo],
    key_column: &'a str,
    row: &'a Row,
    row_index: u64,
}

/// `row_id` as stored: strings verbatim, everything else in its JSON form.
fn row_id(primary_key: &Value) -> String {
    match primary_key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn epoch_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}
