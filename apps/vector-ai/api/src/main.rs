use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_embeddings::{EmbeddingProvider, OpenAIProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors are colored
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::mysql::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("MySQL connection failed: {}", e))?;

    let tables = api::tables::service(&db).table_names().await?;
    info!(
        database = %config.database.database_name(),
        tables = tables.len(),
        "Database schema loaded"
    );

    let provider = match config.openai.clone() {
        Some(openai) => {
            let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAIProvider::new(openai)?);
            info!(model = %provider.model(), "OpenAI embeddings enabled");
            Some(provider)
        }
        None => None,
    };

    let state = AppState {
        config,
        db,
        provider,
    };

    let api_routes = api::routes(&state);

    // create_router adds docs and middleware to the composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /: endpoint directory
    // - /health: liveness with app name/version
    // - /ready: readiness with a MySQL ping
    let app = router
        .merge(api::index_router(state.config.server.port))
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!("Starting Vector AI API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connection");
            match state.db.close().await {
                Ok(_) => info!("MySQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing MySQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Vector AI API shutdown complete");
    Ok(())
}
