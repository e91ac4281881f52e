//! Generic LLM client trait for provider abstraction.

use crate::types::Result;
use async_trait::async_trait;

/// A text-generation model reachable through a narrow, blocking interface.
///
/// One prompt in, one completion out. No streaming, no tool calling, no
/// retries; timeout behavior is delegated to the underlying HTTP client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
