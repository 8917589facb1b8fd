//! RAG (Retrieval-Augmented Generation) for question answering over one transcript.
//!
//! The question is embedded, the closest chunks are pulled from the
//! [`VectorIndex`](crate::index::VectorIndex), and their text becomes the
//! context handed to an [`AnswerGenerator`].

mod answerer;
pub mod context;
mod retriever;

pub use answerer::ChatAnswerer;
pub use context::build_context;
pub use retriever::Retriever;

use crate::error::Result;
use crate::index::QueryResult;
use async_trait::async_trait;

/// External collaborator that writes an answer from retrieved context.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate an answer to `question` grounded in `context`.
    async fn generate(&self, context: &str, question: &str) -> Result<String>;
}

/// A generated answer with the chunks that grounded it.
#[derive(Debug, Clone)]
pub struct Answer {
    /// The answer text, trimmed.
    pub text: String,
    /// Retrieved chunks, closest first.
    pub sources: QueryResult,
}
