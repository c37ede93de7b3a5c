use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, PageQuery, Pagination,
    errors::responses::{
        BadGatewayResponse, BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use domain_tables::TableRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EmbeddingResult;
use crate::models::{
    AllEmbeddings, EmbeddingStatistics, FailedRowEmbedding, FailedTable, NumberDouble, NumberInt,
    ProcessedWindow, RowEmbeddingOutcome, RowEmbeddingReport, RowEmbeddingsSummary, RowMetadata,
    SchemaEmbeddingsSummary, SchemaMetadata, StorageSummary, StoredEmbedding, StoredRowEmbedding,
    TableEmbeddingCount, TableEmbeddings, TableRowSummary, TableSchemaEmbedding,
    TableSchemaOutcome,
};
use crate::service::EmbeddingService;
use crate::store::EmbeddingStore;

pub const TAG: &str = "Embeddings";

/// OpenAPI documentation for the embedding endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        table_schema_embedding,
        all_schema_embeddings,
        table_row_embeddings,
        all_row_embeddings,
        table_embeddings,
        all_embeddings
    ),
    components(
        schemas(
            NumberDouble,
            NumberInt,
            SchemaMetadata,
            TableSchemaEmbedding,
            FailedTable,
            TableSchemaOutcome,
            SchemaEmbeddingsSummary,
            RowMetadata,
            StoredRowEmbedding,
            FailedRowEmbedding,
            RowEmbeddingOutcome,
            StorageSummary,
            ProcessedWindow,
            RowEmbeddingReport,
            TableRowSummary,
            RowEmbeddingsSummary,
            StoredEmbedding,
            TableEmbeddingCount,
            TableEmbeddings,
            EmbeddingStatistics,
            AllEmbeddings,
            Pagination
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse,
            BadGatewayResponse
        )
    ),
    tags(
        (name = TAG, description = "Schema and row embedding endpoints")
    )
)]
pub struct ApiDoc;

/// Create the embeddings router
pub fn router<R, S>(service: EmbeddingService<R, S>) -> Router
where
    R: TableRepository + 'static,
    S: EmbeddingStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/table/{table_name}/embedding", post(table_schema_embedding))
        .route("/tables/embeddings", post(all_schema_embeddings))
        .route("/table/{table_name}/rows/embeddings", post(table_row_embeddings))
        .route("/tables/rows/embeddings", post(all_row_embeddings))
        .route("/table/{table_name}/embeddings", get(table_embeddings))
        .route("/embeddings", get(all_embeddings))
        .with_state(shared_service)
}

/// Generate an embedding for a table's schema
#[utoipa::path(
    post,
    path = "/table/{table_name}/embedding",
    tag = TAG,
    params(("table_name" = String, Path, description = "Table name")),
    responses(
        (status = 200, description = "Schema embedding (not persisted)", body = ApiResponse<TableSchemaEmbedding>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn table_schema_embedding<R: TableRepository, S: EmbeddingStore>(
    State(service): State<Arc<EmbeddingService<R, S>>>,
    Path(table_name): Path<String>,
) -> EmbeddingResult<ApiResponse<TableSchemaEmbedding>> {
    let embedding = service.schema_embedding(&table_name).await?;
    let message = format!(
        "Vector embedding generated for table '{}'",
        embedding.metadata.table_name
    );
    Ok(ApiResponse::ok(message, embedding))
}

/// Generate schema embeddings for every table
#[utoipa::path(
    post,
    path = "/tables/embeddings",
    tag = TAG,
    responses(
        (status = 200, description = "Per-table schema embeddings", body = ApiResponse<SchemaEmbeddingsSummary>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn all_schema_embeddings<R: TableRepository, S: EmbeddingStore>(
    State(service): State<Arc<EmbeddingService<R, S>>>,
) -> EmbeddingResult<ApiResponse<SchemaEmbeddingsSummary>> {
    let summary = service.all_schema_embeddings().await?;
    let message = format!(
        "Generated schema embeddings for {} of {} tables",
        summary.successful, summary.total_tables
    );
    Ok(ApiResponse::ok(message, summary))
}

/// Generate and store embeddings for a window of a table's rows
#[utoipa::path(
    post,
    path = "/table/{table_name}/rows/embeddings",
    tag = TAG,
    params(
        ("table_name" = String, Path, description = "Table name"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Per-row results; failed rows are listed with status `failed`", body = ApiResponse<RowEmbeddingReport>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn table_row_embeddings<R: TableRepository, S: EmbeddingStore>(
    State(service): State<Arc<EmbeddingService<R, S>>>,
    Path(table_name): Path<String>,
    Query(query): Query<PageQuery>,
) -> EmbeddingResult<ApiResponse<RowEmbeddingReport>> {
    let report = service.row_embeddings(&table_name, &query).await?;
    let message = if report.total_processed == 0 {
        format!("No data found in table '{}'", report.table_name)
    } else {
        format!(
            "Generated embeddings for {} rows from table '{}' and stored in both original table and embeddings table",
            report.total_processed, report.table_name
        )
    };
    Ok(ApiResponse::ok(message, report))
}

/// Generate and store row embeddings for every table
#[utoipa::path(
    post,
    path = "/tables/rows/embeddings",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Per-table row embedding counts", body = ApiResponse<RowEmbeddingsSummary>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn all_row_embeddings<R: TableRepository, S: EmbeddingStore>(
    State(service): State<Arc<EmbeddingService<R, S>>>,
    Query(query): Query<PageQuery>,
) -> EmbeddingResult<ApiResponse<RowEmbeddingsSummary>> {
    let summary = service.all_row_embeddings(&query).await?;
    let message = format!(
        "Generated embeddings for {} rows across {} tables",
        summary.successful_embeddings, summary.total_tables
    );
    Ok(ApiResponse::ok(message, summary))
}

/// Stored embeddings of one table, newest first
#[utoipa::path(
    get,
    path = "/table/{table_name}/embeddings",
    tag = TAG,
    params(
        ("table_name" = String, Path, description = "Table name"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Stored embeddings (default limit 10)", body = ApiResponse<TableEmbeddings>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn table_embeddings<R: TableRepository, S: EmbeddingStore>(
    State(service): State<Arc<EmbeddingService<R, S>>>,
    Path(table_name): Path<String>,
    Query(query): Query<PageQuery>,
) -> EmbeddingResult<ApiResponse<TableEmbeddings>> {
    let result = service.table_embeddings(&table_name, &query).await?;
    let message = format!(
        "Retrieved {} embeddings for table '{}'",
        result.embeddings.len(),
        result.table_name
    );
    Ok(ApiResponse::ok(message, result))
}

/// Stored embeddings across all tables with per-table counts
#[utoipa::path(
    get,
    path = "/embeddings",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Stored embeddings (default limit 20)", body = ApiResponse<AllEmbeddings>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn all_embeddings<R: TableRepository, S: EmbeddingStore>(
    State(service): State<Arc<EmbeddingService<R, S>>>,
    Query(query): Query<PageQuery>,
) -> EmbeddingResult<ApiResponse<AllEmbeddings>> {
    let result = service.all_embeddings(&query).await?;
    let message = format!(
        "Retrieved {} embeddings from all tables",
        result.embeddings.len()
    );
    Ok(ApiResponse::ok(message, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;
    use crate::error::EmbeddingError;
    use crate::models::{Embedding, EmbeddingModel};
    use crate::service::EmbeddingSettings;
    use crate::store::MockEmbeddingStore;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use domain_tables::{ColumnInfo, ColumnKey, MockTableRepository, TableName, TableService};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn call(
        service: EmbeddingService<MockTableRepository, MockEmbeddingStore>,
        method: Method,
        uri: &str,
    ) -> (StatusCode, Value) {
        let app = router(service);
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn build(
        repo: MockTableRepository,
        store: MockEmbeddingStore,
    ) -> EmbeddingService<MockTableRepository, MockEmbeddingStore> {
        EmbeddingService::new(
            TableService::new(repo),
            store,
            EmbeddingSettings::default().with_row_delay(Duration::ZERO),
        )
    }

    fn students() -> MockTableRepository {
        let mut repo = MockTableRepository::new();
        repo.expect_list_tables()
            .returning(|| Ok(vec![TableName::from_catalog("students")]));
        repo.expect_describe().returning(|_| {
            Ok(vec![ColumnInfo {
                field: "id".into(),
                column_type: "int".into(),
                null: "NO".into(),
                key: ColumnKey::Primary,
                default: None,
                extra: "auto_increment".into(),
            }])
        });
        repo
    }

    fn provider(result: fn() -> Result<Embedding, EmbeddingError>) -> Arc<MockEmbeddingProvider> {
        let mut provider = MockEmbeddingProvider::new();
        provider.expect_model().return_const(EmbeddingModel::default());
        provider.expect_embed().returning(move |_| result());
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_schema_embedding_envelope() {
        let mut repo = students();
        repo.expect_count_rows().returning(|_| Ok(3));
        let service = build(repo, MockEmbeddingStore::new()).with_provider(provider(|| {
            Ok(Embedding {
                values: vec![0.125],
                tokens_used: 9,
            })
        }));

        let (status, body) = call(service, Method::POST, "/table/students/embedding").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Vector embedding generated for table 'students'");
        assert_eq!(body["data"]["embedding"], json!([{"$numberDouble": "0.125"}]));
        assert_eq!(body["data"]["metadata"]["recordCount"], json!({"$numberInt": "3"}));
    }

    #[tokio::test]
    async fn test_provider_failure_is_502() {
        let mut repo = students();
        repo.expect_count_rows().returning(|_| Ok(3));
        let service = build(repo, MockEmbeddingStore::new()).with_provider(provider(|| {
            Err(EmbeddingError::Provider("OpenAI API error (401): bad key".into()))
        }));

        let (status, body) = call(service, Method::POST, "/table/students/embedding").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_missing_provider_is_500() {
        let service = build(students(), MockEmbeddingStore::new());

        let (status, body) = call(service, Method::POST, "/tables/embeddings").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_row_embeddings_no_data_message() {
        let mut repo = students();
        repo.expect_fetch_rows().returning(|_, _| Ok(vec![]));
        let mut store = MockEmbeddingStore::new();
        store.expect_ensure_embeddings_table().returning(|| Ok(()));
        store.expect_add_embeddings_column().returning(|_| Ok(()));

        let (status, body) = call(
            build(repo, store),
            Method::POST,
            "/table/students/rows/embeddings",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No data found in table 'students'");
        assert_eq!(body["data"]["totalProcessed"], 0);
        assert_eq!(body["data"]["embeddings"], json!([]));
    }

    #[tokio::test]
    async fn test_row_embeddings_message_counts_rows() {
        let mut repo = students();
        repo.expect_fetch_rows().returning(|_, _| {
            Ok(vec![json!({"id": 1}).as_object().cloned().unwrap()])
        });
        let mut store = MockEmbeddingStore::new();
        store.expect_ensure_embeddings_table().returning(|| Ok(()));
        store.expect_add_embeddings_column().returning(|_| Ok(()));
        store.expect_store_embedding().returning(|_| Ok(1));
        store
            .expect_write_row_embedding()
            .returning(|_, _, _, _| Ok(1));
        let service = build(repo, store).with_provider(provider(|| {
            Ok(Embedding {
                values: vec![0.5],
                tokens_used: 2,
            })
        }));

        let (status, body) = call(service, Method::POST, "/table/students/rows/embeddings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Generated embeddings for 1 rows from table 'students' and stored in both original table and embeddings table"
        );
        assert_eq!(body["data"]["embeddings"][0]["embeddingId"], 1);
        assert_eq!(body["data"]["embeddings"][0]["metadata"]["storedInTable"], true);
    }

    #[tokio::test]
    async fn test_row_embeddings_unknown_table_is_404() {
        let (status, body) = call(
            build(students(), MockEmbeddingStore::new()),
            Method::POST,
            "/table/orders/rows/embeddings",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Table 'orders' does not exist");
    }

    #[tokio::test]
    async fn test_list_embeddings_envelope() {
        let mut store = MockEmbeddingStore::new();
        store.expect_ensure_embeddings_table().returning(|| Ok(()));
        store.expect_list_embeddings().returning(|_, _| Ok(vec![]));
        store.expect_count_embeddings().returning(|_| Ok(0));
        store.expect_counts_by_table().returning(|| Ok(vec![]));

        let (status, body) = call(
            build(MockTableRepository::new(), store),
            Method::GET,
            "/embeddings?limit=5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Retrieved 0 embeddings from all tables");
        assert_eq!(
            body["data"]["pagination"],
            json!({"limit": 5, "offset": 0, "total": 0, "hasMore": false})
        );
        assert_eq!(body["data"]["statistics"]["totalEmbeddings"], 0);
    }

    #[tokio::test]
    async fn test_table_embeddings_rejects_long_name() {
        let name = "t".repeat(65);
        let (status, body) = call(
            build(MockTableRepository::new(), MockEmbeddingStore::new()),
            Method::GET,
            &format!("/table/{name}/embeddings"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Table name must be at most 64 characters");
    }
}
