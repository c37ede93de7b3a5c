use axum_helpers::Pagination;
use chrono::{DateTime, Utc};
use domain_tables::TableName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Table that holds one embedding per `(table_name, row_id)`
pub const EMBEDDINGS_TABLE: &str = "vector_embeddings";

/// JSON column added to every source table whose rows are embedded
pub const EMBEDDINGS_COLUMN: &str = "embeddings";

/// OpenAI embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum EmbeddingModel {
    /// text-embedding-3-small (1536 dimensions)
    #[default]
    #[serde(rename = "text-embedding-3-small")]
    TextEmbedding3Small,
    /// text-embedding-3-large (3072 dimensions)
    #[serde(rename = "text-embedding-3-large")]
    TextEmbedding3Large,
    /// text-embedding-ada-002 (1536 dimensions, legacy)
    #[serde(rename = "text-embedding-ada-002")]
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub fn model_name(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

impl FromStr for EmbeddingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text-embedding-3-small" => Ok(EmbeddingModel::TextEmbedding3Small),
            "text-embedding-3-large" => Ok(EmbeddingModel::TextEmbedding3Large),
            "text-embedding-ada-002" => Ok(EmbeddingModel::TextEmbeddingAda002),
            other => Err(format!("unknown embedding model '{other}'")),
        }
    }
}

/// Vector returned by a provider for one input text
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
    pub tokens_used: u32,
}

/// Metadata persisted next to a row embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMetadata {
    pub database_name: String,
    pub table_name: TableName,
    pub row_index: u64,
    pub primary_key_column: String,
    pub primary_key_value: Value,
    pub description: String,
}

/// Insert/update payload for `vector_embeddings`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmbedding {
    pub table_name: TableName,
    pub row_id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: StoredMetadata,
}

/// A row of `vector_embeddings` as listed by the read endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredEmbedding {
    pub id: i32,
    pub table_name: String,
    pub row_id: String,
    pub content: String,
    #[schema(value_type = Vec<f64>)]
    pub embedding: Value,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TableEmbeddingCount {
    pub table_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableEmbeddings {
    pub table_name: TableName,
    pub embeddings: Vec<StoredEmbedding>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingStatistics {
    pub total_embeddings: u64,
    pub by_table: Vec<TableEmbeddingCount>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AllEmbeddings {
    pub embeddings: Vec<StoredEmbedding>,
    pub statistics: EmbeddingStatistics,
    pub pagination: Pagination,
}

/// `{"$numberDouble": "0.0123"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumberDouble {
    #[serde(rename = "$numberDouble")]
    pub value: String,
}

/// `{"$numberInt": "42"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumberInt {
    #[serde(rename = "$numberInt")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    pub database_name: String,
    pub table_name: TableName,
    pub record_count: NumberInt,
    pub description: String,
}

/// Embedding of a table's schema description. Not persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSchemaEmbedding {
    pub content: String,
    pub embedding: Vec<NumberDouble>,
    pub metadata: SchemaMetadata,
    /// Epoch milliseconds
    pub created_at: String,
    /// Epoch milliseconds
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowMetadata {
    pub database_name: String,
    pub table_name: TableName,
    pub row_index: u64,
    #[schema(value_type = Object)]
    pub primary_key: Value,
    pub description: String,
    pub stored_in_table: bool,
    pub stored_in_embeddings_table: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredRowEmbedding {
    pub embedding_id: u64,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: RowMetadata,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedRowEmbedding {
    pub table_name: TableName,
    pub row_index: u64,
    #[schema(value_type = Object)]
    pub primary_key: Value,
    pub error: String,
    /// Always `failed`
    pub status: String,
}

impl FailedRowEmbedding {
    pub fn new(table_name: TableName, row_index: u64, primary_key: Value, error: String) -> Self {
        Self {
            table_name,
            row_index,
            primary_key,
            error,
            status: "failed".to_string(),
        }
    }
}

/// Result for one row; failures sit in the same list as successes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RowEmbeddingOutcome {
    Stored(StoredRowEmbedding),
    Failed(FailedRowEmbedding),
}

impl RowEmbeddingOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, RowEmbeddingOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummary {
    pub original_table: String,
    pub embeddings_table: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedWindow {
    pub offset: u64,
    pub processed_rows: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowEmbeddingReport {
    pub table_name: TableName,
    pub total_processed: u64,
    pub successful_embeddings: u64,
    pub failed_embeddings: u64,
    pub storage: StorageSummary,
    pub pagination: ProcessedWindow,
    pub embeddings: Vec<RowEmbeddingOutcome>,
}

impl RowEmbeddingReport {
    pub fn new(table_name: TableName, offset: u64, embeddings: Vec<RowEmbeddingOutcome>) -> Self {
        let total = embeddings.len() as u64;
        let failed = embeddings.iter().filter(|e| e.is_failed()).count() as u64;

        Self {
            storage: StorageSummary {
                original_table: format!(
                    "Updated '{table_name}' table with '{EMBEDDINGS_COLUMN}' column"
                ),
                embeddings_table: format!("Stored in '{EMBEDDINGS_TABLE}' table"),
            },
            table_name,
            total_processed: total,
            successful_embeddings: total - failed,
            failed_embeddings: failed,
            pagination: ProcessedWindow {
                offset,
                processed_rows: total,
            },
            embeddings,
        }
    }
}

/// Schema embedding result for one table in a bulk run.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TableSchemaOutcome {
    Generated(TableSchemaEmbedding),
    Failed(FailedTable),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedTable {
    pub table_name: TableName,
    pub error: String,
    /// Always `failed`
    pub status: String,
}

impl FailedTable {
    pub fn new(table_name: TableName, error: String) -> Self {
        Self {
            table_name,
            error,
            status: "failed".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEmbeddingsSummary {
    pub total_tables: usize,
    pub successful: usize,
    pub failed: usize,
    pub tables: Vec<TableSchemaOutcome>,
}

/// Counts for one table in a bulk row-embedding run.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableRowSummary {
    pub table_name: TableName,
    /// `completed` or `failed`
    pub status: String,
    pub total_processed: u64,
    pub successful_embeddings: u64,
    pub failed_embeddings: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableRowSummary {
    pub fn completed(report: &RowEmbeddingReport) -> Self {
        Self {
            table_name: report.table_name.clone(),
            status: "completed".to_string(),
            total_processed: report.total_processed,
            successful_embeddings: report.successful_embeddings,
            failed_embeddings: report.failed_embeddings,
            error: None,
        }
    }

    pub fn failed(table_name: TableName, error: String) -> Self {
        Self {
            table_name,
            status: "failed".to_string(),
            total_processed: 0,
            successful_embeddings: 0,
            failed_embeddings: 0,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowEmbeddingsSummary {
    pub total_tables: usize,
    pub total_processed: u64,
    pub successful_embeddings: u64,
    pub failed_embeddings: u64,
    pub tables: Vec<TableRowSummary>,
}

impl RowEmbeddingsSummary {
    pub fn new(tables: Vec<TableRowSummary>) -> Self {
        Self {
            total_tables: tables.len(),
            total_processed: tables.iter().map(|t| t.total_processed).sum(),
            successful_embeddings: tables.iter().map(|t| t.successful_embeddings).sum(),
            failed_embeddings: tables.iter().map(|t| t.failed_embeddings).sum(),
            tables,
        }
    }
}
