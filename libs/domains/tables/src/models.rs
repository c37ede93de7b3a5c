use axum_helpers::Pagination;
use database::mysql::{MAX_IDENTIFIER_LEN, quote_identifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::{TableError, TableResult};

/// One row of table data, keyed by column name in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A table name taken from a request path or from the live catalog.
///
/// A parsed name has only been checked for shape. It must still be matched
/// against the catalog (see `TableService::ensure_exists`) before it is
/// interpolated into SQL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Validate a caller-supplied name. The name is kept exactly as given.
    pub fn parse(raw: &str) -> TableResult<Self> {
        if raw.trim().is_empty() {
            return Err(TableError::MissingName);
        }
        if raw.chars().count() > MAX_IDENTIFIER_LEN {
            return Err(TableError::NameTooLong);
        }
        Ok(Self(raw.to_string()))
    }

    /// Wrap a name read from `information_schema`.
    pub fn from_catalog(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backtick-quoted form for interpolation into statements.
    pub fn quoted(&self) -> String {
        quote_identifier(&self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for TableName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Index participation of a column, as reported in `DESCRIBE`'s `Key` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ColumnKey {
    #[serde(rename = "PRI")]
    Primary,
    #[serde(rename = "UNI")]
    Unique,
    #[serde(rename = "MUL")]
    Multiple,
    #[default]
    #[serde(rename = "")]
    Plain,
}

impl ColumnKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PRI" => Self::Primary,
            "UNI" => Self::Unique,
            "MUL" => Self::Multiple,
            _ => Self::Plain,
        }
    }

    /// Label used when describing a column in prose.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Primary => Some("PRIMARY KEY"),
            Self::Unique => Some("UNIQUE"),
            Self::Multiple => Some("INDEX"),
            Self::Plain => None,
        }
    }
}

/// Column metadata with the same keys MySQL's `DESCRIBE` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColumnInfo {
    #[serde(rename = "Field")]
    pub field: String,
    #[serde(rename = "Type")]
    pub column_type: String,
    /// `YES` or `NO`
    #[serde(rename = "Null")]
    pub null: String,
    #[serde(rename = "Key")]
    pub key: ColumnKey,
    #[serde(rename = "Default")]
    pub default: Option<String>,
    #[serde(rename = "Extra")]
    pub extra: String,
}

impl ColumnInfo {
    pub fn is_primary_key(&self) -> bool {
        self.key == ColumnKey::Primary
    }

    /// `field (type[, key label][, extra])`
    pub fn summary(&self) -> String {
        let mut details = vec![self.column_type.as_str()];
        if let Some(label) = self.key.label() {
            details.push(label);
        }
        if !self.extra.is_empty() {
            details.push(self.extra.as_str());
        }
        format!("{} ({})", self.field, details.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TableStatus {
    #[serde(rename = "OK")]
    Ok,
    Error,
}

/// Column and row counts for one table. Counts are null when the table
/// could not be inspected.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableOverview {
    pub table_name: TableName,
    pub columns: Option<u64>,
    pub rows: Option<u64>,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TablesOverview {
    pub total_tables: usize,
    pub tables: Vec<TableOverview>,
}

/// Structure, row count and the first rows of one table.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSample {
    pub table_name: TableName,
    pub structure: Option<Vec<ColumnInfo>>,
    pub row_count: Option<u64>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub sample_data: Option<Vec<Row>>,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TablesSample {
    pub total_tables: usize,
    pub sample_limit: u64,
    pub tables: Vec<TableSample>,
}

/// Structure plus one page of rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub table_name: TableName,
    pub structure: Vec<ColumnInfo>,
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<Row>,
    pub pagination: Pagination,
}

/// Rows of one table; `pagination` is present only when a limit was given.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableRecords {
    pub table_name: TableName,
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Server and schema identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInfo {
    pub current_database: Option<String>,
    pub mysql_version: String,
    pub tables: Vec<TableName>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(field: &str, column_type: &str, key: ColumnKey, extra: &str) -> ColumnInfo {
        ColumnInfo {
            field: field.into(),
            column_type: column_type.into(),
            null: "NO".into(),
            key,
            default: None,
            extra: extra.into(),
        }
    }

    #[test]
    fn test_parse_rejects_blank_names() {
        assert!(matches!(TableName::parse(""), Err(TableError::MissingName)));
        assert!(matches!(TableName::parse("   "), Err(TableError::MissingName)));
    }

    #[test]
    fn test_parse_rejects_long_names() {
        let long = "t".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(matches!(TableName::parse(&long), Err(TableError::NameTooLong)));
        assert!(TableName::parse(&"t".repeat(MAX_IDENTIFIER_LEN)).is_ok());
    }

    #[test]
    fn test_parse_keeps_name_verbatim() {
        let name = TableName::parse("Order Items").unwrap();
        assert_eq!(name.as_str(), "Order Items");
        assert_eq!(name.quoted(), "`Order Items`");
    }

    #[test]
    fn test_table_name_serializes_as_string() {
        let name = TableName::from_catalog("users");
        assert_eq!(serde_json::to_value(&name).unwrap(), json!("users"));
    }

    #[test]
    fn test_column_info_uses_describe_keys() {
        let col = ColumnInfo {
            default: Some("CURRENT_TIMESTAMP".into()),
            null: "YES".into(),
            ..column("enrolled_at", "timestamp", ColumnKey::Plain, "DEFAULT_GENERATED")
        };
        assert_eq!(
            serde_json::to_value(&col).unwrap(),
            json!({
                "Field": "enrolled_at",
                "Type": "timestamp",
                "Null": "YES",
                "Key": "",
                "Default": "CURRENT_TIMESTAMP",
                "Extra": "DEFAULT_GENERATED"
            })
        );
    }

    #[test]
    fn test_column_key_parse() {
        assert_eq!(ColumnKey::parse("PRI"), ColumnKey::Primary);
        assert_eq!(ColumnKey::parse("UNI"), ColumnKey::Unique);
        assert_eq!(ColumnKey::parse("MUL"), ColumnKey::Multiple);
        assert_eq!(ColumnKey::parse(""), ColumnKey::Plain);
    }

    #[test]
    fn test_column_summary() {
        assert_eq!(
            column("id", "int", ColumnKey::Primary, "auto_increment").summary(),
            "id (int, PRIMARY KEY, auto_increment)"
        );
        assert_eq!(
            column("email", "varchar(255)", ColumnKey::Unique, "").summary(),
            "email (varchar(255), UNIQUE)"
        );
        assert_eq!(column("bio", "text", ColumnKey::Plain, "").summary(), "bio (text)");
    }

    #[test]
    fn test_failed_overview_serializes_nulls() {
        let overview = TableOverview {
            table_name: TableName::from_catalog("broken"),
            columns: None,
            rows: None,
            status: TableStatus::Error,
            error: Some("Database error".into()),
        };
        assert_eq!(
            serde_json::to_value(&overview).unwrap(),
            json!({
                "tableName": "broken",
                "columns": null,
                "rows": null,
                "status": "Error",
                "error": "Database error"
            })
        );
    }

    #[test]
    fn test_records_without_pagination() {
        let records = TableRecords {
            table_name: TableName::from_catalog("users"),
            records: vec![],
            pagination: None,
        };
        let json = serde_json::to_value(&records).unwrap();
        assert!(json.get("pagination").is_none());
        assert_eq!(json["tableName"], "users");
    }
}
