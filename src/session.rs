//! Question-answering session over a single transcript.
//!
//! A session chunks and embeds the transcript once, builds the index, and then
//! answers any number of questions against it.

use crate::chunking::chunk_words;
use crate::embedding::Embedder;
use crate::error::{Result, SporError};
use crate::index::{QueryResult, VectorIndex};
use crate::rag::{Answer, AnswerGenerator, Retriever};
use std::sync::Arc;
use tracing::{info, instrument};

/// Chunks, their index, and the retriever that queries them.
pub struct QaSession {
    chunks: Vec<String>,
    index: VectorIndex,
    retriever: Retriever,
}

impl QaSession {
    /// Chunk `text`, embed every chunk in one batch, and index the vectors.
    #[instrument(skip(text, embedder), fields(text_len = text.len()))]
    pub async fn build(text: &str, chunk_size: usize, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let chunks = chunk_words(text, chunk_size)?;
        if chunks.is_empty() {
            return Err(SporError::EmptyInput("transcript contains no words".to_string()));
        }
        info!("Split transcript into {} chunks", chunks.len());

        let vectors = embedder.embed_batch(&chunks).await?;
        if vectors.len() != chunks.len() {
            return Err(SporError::InternalConsistency(format!(
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let index = VectorIndex::build(vectors)?;
        if index.dimension() != embedder.dimensions() {
            return Err(SporError::DimensionMismatch {
                expected: embedder.dimensions(),
                actual: index.dimension(),
            });
        }
        info!("Indexed {} vectors of dimension {}", index.len(), index.dimension());

        Ok(Self {
            chunks,
            index,
            retriever: Retriever::new(embedder),
        })
    }

    /// The chunk texts, in index order.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// The vector index.
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Find the `k` chunks closest to `query`.
    pub async fn search(&self, query: &str, k: usize) -> Result<QueryResult> {
        self.retriever.retrieve(query, &self.index, k).await
    }

    /// Answer `question` from the `k` closest chunks.
    pub async fn ask(
        &self,
        question: &str,
        k: usize,
        generator: &dyn AnswerGenerator,
    ) -> Result<Answer> {
        self.retriever
            .answer_with_sources(question, &self.chunks, &self.index, k, generator)
            .await
    }
}
