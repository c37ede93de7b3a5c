//! Shared application state handed to every router builder.

use database::mysql::DatabaseConnection;
use domain_embeddings::EmbeddingProvider;
use std::sync::Arc;

/// Cloned into each domain router; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MySQL connection pool
    pub db: DatabaseConnection,
    /// Embedding backend, absent when no OpenAI key is configured
    pub provider: Option<Arc<dyn EmbeddingProvider>>,
}
