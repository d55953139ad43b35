use super::types::{GenerationRequest, ModelError};
use async_trait::async_trait;

/// Trait for text-generation backends.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate text for a single prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError>;
}
