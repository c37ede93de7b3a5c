use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::{DateTime, Utc};
use database::mysql::{BACKEND, quote_identifier};
use domain_tables::TableName;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};
use serde_json::Value;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{
    EMBEDDINGS_COLUMN, EMBEDDINGS_TABLE, Embedding, NewEmbedding, StoredEmbedding,
    TableEmbeddingCount,
};
use crate::store::EmbeddingStore;

const CREATE_EMBEDDINGS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS vector_embeddings (
    id INT AUTO_INCREMENT PRIMARY KEY,
    table_name VARCHAR(255) NOT NULL,
    row_id VARCHAR(255) NOT NULL,
    content TEXT NOT NULL,
    embedding JSON NOT NULL,
    metadata JSON,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
    UNIQUE KEY uniq_table_row (table_name, row_id),
    INDEX idx_table_name (table_name)
)";

// LAST_INSERT_ID(id) makes the update branch report the existing id.
const UPSERT_EMBEDDING_SQL: &str = "INSERT INTO vector_embeddings \
     (table_name, row_id, content, embedding, metadata) VALUES (?, ?, ?, ?, ?) \
     ON DUPLICATE KEY UPDATE id = LAST_INSERT_ID(id), content = VALUES(content), \
     embedding = VALUES(embedding), metadata = VALUES(metadata), \
     updated_at = CURRENT_TIMESTAMP";

const SELECT_EMBEDDINGS_SQL: &str = "SELECT id, table_name, row_id, content, embedding, \
     metadata, created_at, updated_at FROM vector_embeddings";

const COUNTS_BY_TABLE_SQL: &str = "SELECT table_name, COUNT(*) AS count \
     FROM vector_embeddings GROUP BY table_name ORDER BY table_name";

#[derive(Debug, FromQueryResult)]
struct EmbeddingRow {
    id: i32,
    table_name: String,
    row_id: String,
    content: String,
    embedding: Value,
    metadata: Option<Value>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<EmbeddingRow> for StoredEmbedding {
    fn from(row: EmbeddingRow) -> Self {
        Self {
            id: row.id,
            table_name: row.table_name,
            row_id: row.row_id,
            content: row.content,
            embedding: row.embedding,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct TableCountRow {
    table_name: String,
    count: i64,
}

/// Bind a primary key read back from a JSON row in its native SQL type.
fn key_value(key: &Value) -> sea_orm::Value {
    match key {
        Value::Null => sea_orm::Value::String(None),
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.into(),
            (None, Some(u)) => u.into(),
            (None, None) => n.as_f64().into(),
        },
        Value::String(s) => s.as_str().into(),
        other => other.to_string().into(),
    }
}

/// [`EmbeddingStore`] over a live MySQL connection using raw statements.
#[derive(Clone)]
pub struct MySqlEmbeddingStore {
    db: DatabaseConnection,
}

impl MySqlEmbeddingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn execute(&self, stmt: Statement) -> EmbeddingResult<u64> {
        Ok(self.db.execute_raw(stmt).await?.rows_affected())
    }
}

#[async_trait]
impl EmbeddingStore for MySqlEmbeddingStore {
    async fn ensure_embeddings_table(&self) -> EmbeddingResult<()> {
        self.execute(Statement::from_string(BACKEND, CREATE_EMBEDDINGS_TABLE_SQL))
            .await?;
        tracing::debug!(table = EMBEDDINGS_TABLE, "Embeddings table ensured");
        Ok(())
    }

    async fn add_embeddings_column(&self, table: &TableName) -> EmbeddingResult<()> {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} JSON",
            table.quoted(),
            quote_identifier(EMBEDDINGS_COLUMN)
        );
        self.execute(Statement::from_string(BACKEND, sql)).await?;
        tracing::info!(table = %table, column = EMBEDDINGS_COLUMN, "Added embeddings column");
        Ok(())
    }

    async fn store_embedding(&self, embedding: &NewEmbedding) -> EmbeddingResult<u64> {
        let stmt = Statement::from_sql_and_values(
            BACKEND,
            UPSERT_EMBEDDING_SQL,
            [
                embedding.table_name.as_str().into(),
                embedding.row_id.as_str().into(),
                embedding.content.as_str().into(),
                serde_json::to_string(&embedding.embedding)?.into(),
                serde_json::to_string(&embedding.metadata)?.into(),
            ],
        );

        let result = self.db.execute_raw(stmt).await?;
        Ok(result.last_insert_id())
    }

    async fn write_row_embedding(
        &self,
        table: &TableName,
        key_column: &str,
        key: &Value,
        embedding: &Embedding,
    ) -> EmbeddingResult<u64> {
        let sql = format!(
            "UPDATE {} SET {} = ? WHERE {} = ?",
            table.quoted(),
            quote_identifier(EMBEDDINGS_COLUMN),
            quote_identifier(key_column)
        );
        let stmt = Statement::from_sql_and_values(
            BACKEND,
            sql,
            [serde_json::to_string(&embedding.values)?.into(), key_value(key)],
        );

        self.execute(stmt).await
    }

    async fn list_embeddings(
        &self,
        table: Option<TableName>,
        page: PageRequest,
    ) -> EmbeddingResult<Vec<StoredEmbedding>> {
        let order = "ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?";
        let stmt = match table {
            Some(table) => Statement::from_sql_and_values(
                BACKEND,
                format!("{SELECT_EMBEDDINGS_SQL} WHERE table_name = ? {order}"),
                [table.as_str().into(), page.limit.into(), page.offset.into()],
            ),
            None => Statement::from_sql_and_values(
                BACKEND,
                format!("{SELECT_EMBEDDINGS_SQL} {order}"),
                [page.limit.into(), page.offset.into()],
            ),
        };

        let rows = EmbeddingRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(StoredEmbedding::from).collect())
    }

    async fn count_embeddings(&self, table: Option<TableName>) -> EmbeddingResult<u64> {
        let stmt = match table {
            Some(table) => Statement::from_sql_and_values(
                BACKEND,
                "SELECT COUNT(*) AS count FROM vector_embeddings WHERE table_name = ?",
                [table.as_str().into()],
            ),
            None => Statement::from_string(
                BACKEND,
                "SELECT COUNT(*) AS count FROM vector_embeddings",
            ),
        };

        let row = CountRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| EmbeddingError::Internal("COUNT(*) returned no row".to_string()))?;

        Ok(row.count.max(0) as u64)
    }

    async fn counts_by_table(&self) -> EmbeddingResult<Vec<TableEmbeddingCount>> {
        let stmt = Statement::from_string(BACKEND, COUNTS_BY_TABLE_SQL);
        let rows = TableCountRow::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| TableEmbeddingCount {
                table_name: row.table_name,
                count: row.count.max(0) as u64,
            })
            .collect())
    }
}
