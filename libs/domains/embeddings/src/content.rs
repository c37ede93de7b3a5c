//! Text rendered for the embedding API.
//!
//! Table schema:
//!
//! ```text
//! Table: students
//! Columns: id (int, PRIMARY KEY, auto_increment), name (varchar(100))
//! Row Count: 3
//! Description: Database table containing 2 columns with 3 records.
//! ```
//!
//! Table row:
//!
//! ```text
//! Table: students, Row 1
//! Data: id: 1, name: Ada Lovelace
//! Description: Record from students table containing information about Ada Lovelace.
//! ```

use domain_tables::{ColumnInfo, Row, TableName};
use serde_json::Value;

use crate::models::EMBEDDINGS_COLUMN;

/// Longest string value copied verbatim into row content
pub const MAX_VALUE_CHARS: usize = 100;

/// Fields searched, in order, for a human-readable row description
const DESCRIPTIVE_FIELDS: [&str; 5] = ["name", "title", "username", "email", "description"];

pub fn schema_content(table: &TableName, columns: &[ColumnInfo], row_count: u64) -> String {
    let described = columns
        .iter()
        .map(ColumnInfo::summary)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Table: {table}\nColumns: {described}\nRow Count: {row_count}\n\
         Description: Database table containing {} columns with {row_count} records.",
        columns.len()
    )
}

/// Render one row in column order. `row_index` is zero-based; the text shows
/// it one-based. The `embeddings` column is never part of the content.
pub fn row_content(table: &TableName, columns: &[ColumnInfo], row: &Row, row_index: u64) -> String {
    let data = columns
        .iter()
        .filter(|column| column.field != EMBEDDINGS_COLUMN)
        .map(|column| {
            let value = row.get(&column.field).unwrap_or(&Value::Null);
            format!("{}: {}", column.field, render_value(value))
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Table: {table}, Row {}\nData: {data}\n\
         Description: Record from {table} table containing information about {}.",
        row_index + 1,
        row_description(table, row)
    )
}

/// First truthy descriptive field of the row, or `{table} record`.
pub fn row_description(table: &TableName, row: &Row) -> String {
    DESCRIPTIVE_FIELDS
        .iter()
        .filter_map(|field| row.get(*field))
        .find(|value| is_truthy(value))
        .map(display_value)
        .unwrap_or_else(|| format!("{table} record"))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_VALUE_CHARS => {
            let head: String = s.chars().take(MAX_VALUE_CHARS).collect();
            format!("{head}...")
        }
        other => display_value(other),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tables::ColumnKey;
    use serde_json::json;

    fn column(field: &str, column_type: &str, key: ColumnKey, extra: &str) -> ColumnInfo {
        ColumnInfo {
            field: field.into(),
            column_type: column_type.into(),
            null: "YES".into(),
            key,
            default: None,
            extra: extra.into(),
        }
    }

    fn students_columns() -> Vec<ColumnInfo> {
        vec![
            column("id", "int", ColumnKey::Primary, "auto_increment"),
            column("name", "varchar(100)", ColumnKey::Plain, ""),
            column("email", "varchar(255)", ColumnKey::Unique, ""),
            column("embeddings", "json", ColumnKey::Plain, ""),
        ]
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_schema_content() {
        let table = TableName::from_catalog("students");
        let content = schema_content(&table, &students_columns()[..3], 3);

        assert_eq!(
            content,
            "Table: students\n\
             Columns: id (int, PRIMARY KEY, auto_increment), name (varchar(100)), email (varchar(255), UNIQUE)\n\
             Row Count: 3\n\
             Description: Database table containing 3 columns with 3 records."
        );
    }

    #[test]
    fn test_row_content_uses_column_order_and_skips_embeddings() {
        let table = TableName::from_catalog("students");
        let data = row(json!({
            "email": "ada@example.com",
            "embeddings": [0.1, 0.2],
            "name": "Ada Lovelace",
            "id": 1
        }));

        assert_eq!(
            row_content(&table, &students_columns(), &data, 0),
            "Table: students, Row 1\n\
             Data: id: 1, name: Ada Lovelace, email: ada@example.com\n\
             Description: Record from students table containing information about Ada Lovelace."
        );
    }

    #[test]
    fn test_row_content_nulls_and_long_strings() {
        let table = TableName::from_catalog("notes");
        let columns = vec![
            column("id", "int", ColumnKey::Primary, ""),
            column("body", "text", ColumnKey::Plain, ""),
            column("archived_at", "datetime", ColumnKey::Plain, ""),
        ];
        let body = "x".repeat(150);
        let data = row(json!({ "id": 7, "body": body, "archived_at": null }));

        let content = row_content(&table, &columns, &data, 9);
        assert!(content.starts_with("Table: notes, Row 10\n"));
        assert!(content.contains(&format!("body: {}...", "x".repeat(100))));
        assert!(content.contains("archived_at: null"));
        assert!(content.ends_with("containing information about notes record."));
    }

    #[test]
    fn test_row_content_serializes_nested_json() {
        let table = TableName::from_catalog("events");
        let columns = vec![column("payload", "json", ColumnKey::Plain, "")];
        let data = row(json!({ "payload": {"kind": "login", "ok": true} }));

        assert!(
            row_content(&table, &columns, &data, 0)
                .contains(r#"payload: {"kind":"login","ok":true}"#)
        );
    }

    #[test]
    fn test_row_description_skips_falsy_fields() {
        let table = TableName::from_catalog("users");

        let data = row(json!({ "name": "", "title": null, "username": "ada" }));
        assert_eq!(row_description(&table, &data), "ada");

        let data = row(json!({ "name": 0, "email": false }));
        assert_eq!(row_description(&table, &data), "users record");

        let data = row(json!({ "title": 42 }));
        assert_eq!(row_description(&table, &data), "42");
    }
}
