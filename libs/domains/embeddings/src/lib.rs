//! Embeddings Domain
//!
//! Turns table schemas and table rows into text, sends that text to an
//! embedding provider and persists row vectors in MySQL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │      Handlers       │  ← /table/{name}/embedding, /table/{name}/rows/embeddings, /embeddings, ...
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐     ┌─────────────────────┐
//! │  EmbeddingService   │────►│    TableService     │  ← existence check, describe, rows
//! └───┬─────────────┬───┘     │   (domain_tables)   │
//!     │             │         └─────────────────────┘
//! ┌───▼───────────┐ ┌▼──────────────────┐
//! │EmbeddingStore │ │ EmbeddingProvider │
//! │   (trait)     │ │      (trait)      │
//! └───┬───────────┘ └┬──────────────────┘
//! ┌───▼───────────┐ ┌▼──────────────────┐
//! │ MySqlEmbedding│ │  OpenAIProvider   │
//! │     Store     │ └───────────────────┘
//! └───────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_embeddings::{
//!     handlers, EmbeddingService, EmbeddingSettings, MySqlEmbeddingStore, OpenAIConfig,
//!     OpenAIProvider,
//! };
//! use domain_tables::{MySqlTableRepository, TableService};
//! use std::sync::Arc;
//!
//! let tables = TableService::new(MySqlTableRepository::new(db.clone()));
//! let service = EmbeddingService::new(tables, MySqlEmbeddingStore::new(db), EmbeddingSettings::default())
//!     .with_provider(Arc::new(OpenAIProvider::new(OpenAIConfig::from_env()?)?));
//! let router = handlers::router(service);
//! ```

pub mod content;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mysql;
pub mod service;
pub mod store;

pub use embedding::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, EmbeddingProvider, OpenAIConfig, OpenAIProvider,
};
pub use error::{EmbeddingError, EmbeddingResult};
pub use handlers::ApiDoc;
pub use models::{
    EMBEDDINGS_COLUMN, EMBEDDINGS_TABLE, Embedding, EmbeddingModel, RowEmbeddingOutcome,
    RowEmbeddingReport, StoredEmbedding, TableSchemaEmbedding,
};
pub use mysql::MySqlEmbeddingStore;
pub use service::{
    DEFAULT_ALL_EMBEDDINGS_LIMIT, DEFAULT_ROW_DELAY_MS, DEFAULT_TABLE_EMBEDDINGS_LIMIT,
    EmbeddingService, EmbeddingSettings,
};
pub use store::EmbeddingStore;
