use async_trait::async_trait;

use crate::error::EmbeddingResult;
use crate::models::{Embedding, EmbeddingModel};

/// Trait for embedding generation providers
///
/// One call per input text; callers pace their own requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model used for every request
    fn model(&self) -> EmbeddingModel;

    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding>;
}
