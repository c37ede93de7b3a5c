use axum::Router;
use domain_embeddings::{EmbeddingService, MySqlEmbeddingStore, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let tables = super::tables::service(&state.db);
    let store = MySqlEmbeddingStore::new(state.db.clone());
    let mut service = EmbeddingService::new(tables, store, state.config.embeddings.clone());

    if let Some(provider) = &state.provider {
        service = service.with_provider(provider.clone());
    }

    if !service.has_provider() {
        tracing::warn!("OPENAI_API_KEY is not set; embedding endpoints will return configuration errors");
    }

    handlers::router(service)
}
