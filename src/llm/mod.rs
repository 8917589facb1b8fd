//! Chat completion seam shared by answering and summarisation.

mod openai;

pub use openai::OpenAIChatModel;

use crate::error::Result;
use async_trait::async_trait;

/// A chat model that turns one system + user message pair into text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run a single completion. Failures are reported as `SporError::Upstream`.
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
