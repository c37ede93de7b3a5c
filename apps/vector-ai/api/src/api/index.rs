//! Service directory served at `/`.

use axum::{Json, extract::State};
use serde_json::{Value, json};

/// Lists the available endpoints with ready-to-use example URLs.
pub async fn index_handler(State(port): State<u16>) -> Json<Value> {
    let base = format!("http://localhost:{port}");

    Json(json!({
        "message": "Vector AI Backend Server is running!",
        "availableEndpoints": {
            "All Tables Overview": "GET /api/db/tables",
            "All Tables with Sample Data": "GET /api/db/tables/data",
            "Table Schema with Pagination": "GET /api/db/table/{tableName}",
            "Specific Table Data": "GET /api/db/table/{tableName}/data",
            "Database Info": "GET /api/db/info",
            "Generate Table Schema Embedding": "POST /api/db/table/{tableName}/embedding",
            "Generate All Table Schema Embeddings": "POST /api/db/tables/embeddings",
            "Generate Table Row Embeddings": "POST /api/db/table/{tableName}/rows/embeddings",
            "Generate All Row Embeddings": "POST /api/db/tables/rows/embeddings",
            "Stored Table Embeddings": "GET /api/db/table/{tableName}/embeddings",
            "All Stored Embeddings": "GET /api/db/embeddings",
        },
        "examples": {
            "View all tables": format!("{base}/api/db/tables"),
            "View all tables with data": format!("{base}/api/db/tables/data"),
            "View users table data": format!("{base}/api/db/table/users/data"),
            "View admin table data": format!("{base}/api/db/table/admin/data"),
            "Generate table schema embedding": format!("POST {base}/api/db/table/users/embedding"),
            "Generate all schema embeddings": format!("POST {base}/api/db/tables/embeddings"),
            "Generate row embeddings": format!("POST {base}/api/db/table/users/rows/embeddings"),
            "Generate all row embeddings": format!("POST {base}/api/db/tables/rows/embeddings"),
            "With pagination": format!("{base}/api/db/table/users/data?limit=5&offset=0"),
        },
        "queryParameters": {
            "limit": "Number of records to return (default: 10 for single table, 5 for all tables)",
            "offset": "Number of records to skip (default: 0)",
        },
    }))
}
