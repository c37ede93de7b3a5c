mod openai;
mod provider;

pub use openai::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, OpenAIConfig, OpenAIProvider};
#[cfg(test)]
pub use provider::MockEmbeddingProvider;
pub use provider::EmbeddingProvider;
