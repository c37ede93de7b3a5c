use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Vector AI API",
        version = "0.1.0",
        description = "Browse MySQL tables and generate OpenAI embeddings for their schemas and rows"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/db", api = domain_tables::ApiDoc),
        (path = "/db", api = domain_embeddings::ApiDoc)
    )
)]
pub struct ApiDoc;
