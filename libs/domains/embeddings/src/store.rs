use async_trait::async_trait;
use axum_helpers::PageRequest;
use domain_tables::TableName;
use serde_json::Value;

use crate::error::EmbeddingResult;
use crate::models::{Embedding, NewEmbedding, StoredEmbedding, TableEmbeddingCount};

/// Persistence for row embeddings: the `vector_embeddings` table and the
/// `embeddings` column on embedded source tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Create `vector_embeddings` when it does not exist yet.
    async fn ensure_embeddings_table(&self) -> EmbeddingResult<()>;

    /// Add the `embeddings` JSON column to a source table.
    async fn add_embeddings_column(&self, table: &TableName) -> EmbeddingResult<()>;

    /// Upsert keyed by `(table_name, row_id)`; returns the row's id.
    async fn store_embedding(&self, embedding: &NewEmbedding) -> EmbeddingResult<u64>;

    /// Write the vector into the source row identified by `key_column = key`.
    /// Returns the number of rows updated.
    async fn write_row_embedding(
        &self,
        table: &TableName,
        key_column: &str,
        key: &Value,
        embedding: &Embedding,
    ) -> EmbeddingResult<u64>;

    /// Newest first. `None` lists every table.
    async fn list_embeddings(
        &self,
        table: Option<TableName>,
        page: PageRequest,
    ) -> EmbeddingResult<Vec<StoredEmbedding>>;

    async fn count_embeddings(&self, table: Option<TableName>) -> EmbeddingResult<u64>;

    async fn counts_by_table(&self) -> EmbeddingResult<Vec<TableEmbeddingCount>>;
}
