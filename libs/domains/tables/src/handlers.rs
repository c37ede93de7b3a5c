use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_helpers::{
    ApiResponse, PageQuery, Pagination,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TableResult;
use crate::models::{
    ColumnInfo, ColumnKey, DatabaseInfo, TableName, TableOverview, TablePage, TableRecords,
    TableSample, TableStatus, TablesOverview, TablesSample,
};
use crate::repository::TableRepository;
use crate::service::TableService;

pub const TAG: &str = "Tables";

/// OpenAPI documentation for the table introspection endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_tables, list_tables_with_data, get_table, get_table_records, database_info),
    components(
        schemas(
            TableName,
            ColumnInfo,
            ColumnKey,
            TableStatus,
            TableOverview,
            TablesOverview,
            TableSample,
            TablesSample,
            TablePage,
            TableRecords,
            DatabaseInfo,
            Pagination
        ),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Table introspection endpoints")
    )
)]
pub struct ApiDoc;

/// Create the table router
pub fn router<R: TableRepository + 'static>(service: TableService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/data", get(list_tables_with_data))
        .route("/table/{table_name}", get(get_table))
        .route("/table/{table_name}/data", get(get_table_records))
        .route("/info", get(database_info))
        .with_state(shared_service)
}

/// Overview of every table with column and row counts
#[utoipa::path(
    get,
    path = "/tables",
    tag = TAG,
    responses(
        (status = 200, description = "Tables with column and row counts", body = ApiResponse<TablesOverview>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tables<R: TableRepository>(
    State(service): State<Arc<TableService<R>>>,
) -> TableResult<ApiResponse<TablesOverview>> {
    let overview = service.overview().await?;
    Ok(ApiResponse::ok("Database tables retrieved successfully", overview))
}

/// Every table with its structure, row count and sample rows
#[utoipa::path(
    get,
    path = "/tables/data",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Tables with sample rows (default limit 5)", body = ApiResponse<TablesSample>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tables_with_data<R: TableRepository>(
    State(service): State<Arc<TableService<R>>>,
    Query(query): Query<PageQuery>,
) -> TableResult<ApiResponse<TablesSample>> {
    let samples = service.samples(&query).await?;
    Ok(ApiResponse::ok("All table data retrieved successfully", samples))
}

/// Structure and one page of rows for a table
#[utoipa::path(
    get,
    path = "/table/{table_name}",
    tag = TAG,
    params(
        ("table_name" = String, Path, description = "Table name"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Table structure and rows (default limit 10)", body = ApiResponse<TablePage>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_table<R: TableRepository>(
    State(service): State<Arc<TableService<R>>>,
    Path(table_name): Path<String>,
    Query(query): Query<PageQuery>,
) -> TableResult<ApiResponse<TablePage>> {
    let page = service.page(&table_name, &query).await?;
    let message = format!("Table data for '{}' retrieved successfully", page.table_name);
    Ok(ApiResponse::ok(message, page))
}

/// Rows of a table; every row unless `limit` is given
#[utoipa::path(
    get,
    path = "/table/{table_name}/data",
    tag = TAG,
    params(
        ("table_name" = String, Path, description = "Table name"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Table records", body = ApiResponse<Vec<TableRecords>>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_table_records<R: TableRepository>(
    State(service): State<Arc<TableService<R>>>,
    Path(table_name): Path<String>,
    Query(query): Query<PageQuery>,
) -> TableResult<ApiResponse<Vec<TableRecords>>> {
    let records = service.records(&table_name, &query).await?;
    Ok(ApiResponse::ok(
        "All table records retrieved successfully",
        vec![records],
    ))
}

/// Current database, server version and table list
#[utoipa::path(
    get,
    path = "/info",
    tag = TAG,
    responses(
        (status = 200, description = "Database information", body = ApiResponse<DatabaseInfo>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn database_info<R: TableRepository>(
    State(service): State<Arc<TableService<R>>>,
) -> TableResult<ApiResponse<DatabaseInfo>> {
    let info = service.info().await?;
    Ok(ApiResponse::ok("Database information retrieved successfully", info))
}
