//! Handler tests for the tables domain against a real MySQL server
//!
//! These drive the router with `oneshot()` over the `students` and
//! `audit_log` fixtures and check:
//! - response envelopes and field names
//! - page arithmetic against real row counts
//! - existence checks on caller-supplied names
//!
//! They need Docker: `cargo test -p domain_tables -- --ignored`

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tables::*;
use http_body_util::BodyExt;
use serde_json::Value;
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(db: &TestDatabase, uri: &str) -> (StatusCode, Value) {
    let service = TableService::new(MySqlTableRepository::new(db.connection()));
    let app = handlers::router(service);

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_tables_overview_counts_columns_and_rows() {
    let db = TestDatabase::with_fixtures().await;

    let (status, body) = get(&db, "/tables").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalTables"], 2);

    let tables = body["data"]["tables"].as_array().unwrap();
    let students = tables
        .iter()
        .find(|t| t["tableName"] == "students")
        .unwrap();
    assert_eq!(students["columns"], 8);
    assert_eq!(students["rows"], 3);
    assert_eq!(students["status"], "OK");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_tables_with_data_respects_limit() {
    let db = TestDatabase::with_fixtures().await;

    let (status, body) = get(&db, "/tables/data?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sampleLimit"], 2);

    let students = body["data"]["tables"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["tableName"] == "students")
        .unwrap()
        .clone();
    assert_eq!(students["rowCount"], 3);
    assert_eq!(students["sampleData"].as_array().unwrap().len(), 2);
    assert_eq!(students["structure"][0]["Field"], "id");
    assert_eq!(students["structure"][0]["Key"], "PRI");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_table_page_returns_structure_and_window() {
    let db = TestDatabase::with_fixtures().await;

    let (status, body) = get(&db, "/table/students?limit=2&offset=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Table data for 'students' retrieved successfully"
    );

    let data = &body["data"];
    assert_eq!(data["structure"].as_array().unwrap().len(), 8);
    assert_eq!(data["records"].as_array().unwrap().len(), 1);
    assert_eq!(data["records"][0]["name"], "Grace Hopper");
    assert_eq!(data["pagination"]["currentPage"], 2);
    assert_eq!(data["pagination"]["totalPages"], 2);
    assert_eq!(data["pagination"]["hasMore"], false);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_table_records_returns_every_row() {
    let db = TestDatabase::with_fixtures().await;

    let (status, body) = get(&db, "/table/students/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["records"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][0]["records"][1]["bio"], Value::Null);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_decimal_year_and_bit_columns_are_returned() {
    let db = TestDatabase::with_fixtures().await;

    let (status, body) = get(&db, "/table/students/data?limit=2").await;
    assert_eq!(status, StatusCode::OK);

    let records = &body["data"][0]["records"];
    assert_eq!(records[0]["gpa"], "3.95");
    assert_eq!(records[0]["cohort"], 2019);
    assert_eq!(records[0]["active"], 1);
    assert_eq!(records[1]["gpa"], "3.70");
    assert_eq!(records[1]["active"], 0);

    let (_, body) = get(&db, "/tables/data?limit=1").await;
    let students = body["data"]["tables"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["tableName"] == "students")
        .unwrap()
        .clone();
    assert_eq!(students["sampleData"][0]["gpa"], "3.95");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unknown_table_is_404() {
    let db = TestDatabase::with_fixtures().await;
    let builder = TestDataBuilder::from_test_name("unknown_table");
    let missing = builder.table_name("missing");

    let (status, body) = get(&db, &format!("/table/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("Table '{missing}' does not exist")
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_injection_attempt_is_rejected_by_existence_check() {
    let db = TestDatabase::with_fixtures().await;

    let (status, _) = get(&db, "/table/students%60%3B%20DROP%20TABLE%20students%3B%20--").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&db, "/table/students/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["records"].as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_database_info() {
    let db = TestDatabase::with_fixtures().await;

    let (status, body) = get(&db, "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["currentDatabase"], test_utils::TEST_DATABASE);
    assert!(body["data"]["mysqlVersion"].as_str().unwrap().starts_with("8."));
    assert_eq!(body["data"]["tables"], serde_json::json!(["audit_log", "students"]));
}
