use async_trait::async_trait;
use axum_helpers::PageRequest;
use database::mysql::{BACKEND, quote_identifier};
use sea_orm::{DatabaseConnection, FromQueryResult, JsonValue, Statement};

use crate::{
    error::{TableError, TableResult},
    models::{ColumnInfo, ColumnKey, Row, TableName},
    repository::TableRepository,
};

const LIST_TABLES_SQL: &str = "SELECT CAST(TABLE_NAME AS CHAR) AS table_name \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() \
     ORDER BY TABLE_NAME";

// Same rows and keys as `DESCRIBE`, but bindable.
const DESCRIBE_SQL: &str = "SELECT CAST(COLUMN_NAME AS CHAR) AS field, \
     CAST(COLUMN_TYPE AS CHAR) AS column_type, \
     CAST(IS_NULLABLE AS CHAR) AS is_nullable, \
     CAST(COLUMN_KEY AS CHAR) AS column_key, \
     CAST(COLUMN_DEFAULT AS CHAR) AS column_default, \
     CAST(EXTRA AS CHAR) AS extra \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

const SERVER_INFO_SQL: &str =
    "SELECT DATABASE() AS current_database, VERSION() AS mysql_version";

#[derive(Debug, FromQueryResult)]
struct TableNameRow {
    table_name: String,
}

#[derive(Debug, FromQueryResult)]
struct ColumnRow {
    field: String,
    column_type: String,
    is_nullable: String,
    column_key: String,
    column_default: Option<String>,
    extra: String,
}

impl From<ColumnRow> for ColumnInfo {
    fn from(row: ColumnRow) -> Self {
        Self {
            field: row.field,
            column_type: row.column_type,
            null: row.is_nullable,
            key: ColumnKey::parse(&row.column_key),
            default: row.column_default,
            extra: row.extra,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct ServerInfoRow {
    current_database: Option<String>,
    mysql_version: String,
}

/// Projection for `SELECT`: `*` unless a column needs converting.
///
/// The JSON row decoder has no mapping for `YEAR`, `BIT` or spatial types and
/// would drop those columns, so they are selected as integers or WKT text.
fn select_list(columns: &[ColumnInfo]) -> String {
    if !columns.iter().any(|c| converted_column(c).is_some()) {
        return "*".to_string();
    }

    columns
        .iter()
        .map(|c| converted_column(c).unwrap_or_else(|| quote_identifier(&c.field)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn converted_column(column: &ColumnInfo) -> Option<String> {
    let quoted = quote_identifier(&column.field);
    let base = column
        .column_type
        .split(['(', ' '])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match base.as_str() {
        "year" => Some(format!("CAST({quoted} AS SIGNED) AS {quoted}")),
        "bit" => Some(format!("CAST({quoted} AS UNSIGNED) AS {quoted}")),
        "geometry" | "point" | "linestring" | "polygon" | "multipoint" | "multilinestring"
        | "multipolygon" | "geometrycollection" | "geomcollection" => {
            Some(format!("ST_AsText({quoted}) AS {quoted}"))
        }
        _ => None,
    }
}

/// [`TableRepository`] over a live MySQL connection using raw statements.
#[derive(Clone)]
pub struct MySqlTableRepository {
    db: DatabaseConnection,
}

impl MySqlTableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TableRepository for MySqlTableRepository {
    async fn list_tables(&self) -> TableResult<Vec<TableName>> {
        let stmt = Statement::from_string(BACKEND, LIST_TABLES_SQL);
        let rows = TableNameRow::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| TableName::from_catalog(row.table_name))
            .collect())
    }

    async fn describe(&self, table: &TableName) -> TableResult<Vec<ColumnInfo>> {
        let stmt = Statement::from_sql_and_values(BACKEND, DESCRIBE_SQL, [table.as_str().into()]);
        let rows = ColumnRow::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows.into_iter().map(ColumnInfo::from).collect())
    }

    async fn count_rows(&self, table: &TableName) -> TableResult<u64> {
        let sql = format!("SELECT COUNT(*) AS count FROM {}", table.quoted());
        let row = CountRow::find_by_statement(Statement::from_string(BACKEND, sql))
            .one(&self.db)
            .await?
            .ok_or_else(|| TableError::Internal(format!("COUNT(*) on '{table}' returned no row")))?;

        Ok(row.count.max(0) as u64)
    }

    async fn fetch_rows(
        &self,
        table: &TableName,
        page: Option<PageRequest>,
    ) -> TableResult<Vec<Row>> {
        let columns = self.describe(table).await?;
        let select = format!("SELECT {} FROM {}", select_list(&columns), table.quoted());
        let stmt = match page {
            Some(page) => Statement::from_sql_and_values(
                BACKEND,
                format!("{select} LIMIT ? OFFSET ?"),
                [page.limit.into(), page.offset.into()],
            ),
            None => Statement::from_string(BACKEND, select),
        };

        let rows = JsonValue::find_by_statement(stmt).all(&self.db).await?;
        tracing::debug!(table = %table, rows = rows.len(), "Fetched rows");

        Ok(rows
            .into_iter()
            .map(|row| match row {
                JsonValue::Object(map) => map,
                _ => Row::new(),
            })
            .collect())
    }

    async fn server_info(&self) -> TableResult<(Option<String>, String)> {
        let row = ServerInfoRow::find_by_statement(Statement::from_string(BACKEND, SERVER_INFO_SQL))
            .one(&self.db)
            .await?
            .ok_or_else(|| TableError::Internal("Server info query returned no row".to_string()))?;

        Ok((row.current_database, row.mysql_version))
    }
}
