//! Retrieval and grounded answering.

use super::{build_context, Answer, AnswerGenerator};
use crate::embedding::Embedder;
use crate::error::{Result, SporError};
use crate::index::{QueryResult, VectorIndex};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Embeds questions, searches the index and hands context to a generator.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    /// Create a retriever around a shared embedder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Find the `k` chunks closest to `question`.
    #[instrument(skip(self, index), fields(question = %question))]
    pub async fn retrieve(&self, question: &str, index: &VectorIndex, k: usize) -> Result<QueryResult> {
        let query = self.embedder.embed(question).await?;
        let results = index.search(&query, k)?;
        debug!("Retrieved {} of {} chunks", results.len(), index.len());
        Ok(results)
    }

    /// Answer `question` from the chunks closest to it.
    pub async fn answer(
        &self,
        question: &str,
        chunks: &[String],
        index: &VectorIndex,
        k: usize,
        generator: &dyn AnswerGenerator,
    ) -> Result<String> {
        self.answer_with_sources(question, chunks, index, k, generator)
            .await
            .map(|answer| answer.text)
    }

    /// Answer `question` and keep the retrieved chunks alongside the text.
    #[instrument(skip(self, chunks, index, generator), fields(question = %question))]
    pub async fn answer_with_sources(
        &self,
        question: &str,
        chunks: &[String],
        index: &VectorIndex,
        k: usize,
        generator: &dyn AnswerGenerator,
    ) -> Result<Answer> {
        info!("Processing question: {}", question);

        let sources = self.retrieve(question, index, k).await?;
        let context = build_context(chunks, &sources)?;

        let text = generator
            .generate(&context, question)
            .await
            .map_err(SporError::into_upstream)?;

        Ok(Answer {
            text: text.trim().to_string(),
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::chunk_words;
    use crate::index::Neighbor;
    use crate::testing::{FixedAnswerer, KeywordEmbedder};

    async fn cat_mat_fixture() -> (Retriever, Vec<String>, VectorIndex) {
        let embedder = Arc::new(KeywordEmbedder::new(&["cat", "mat"]));
        let chunks = chunk_words("the cat sat on the mat", 3).unwrap();
        let vectors = embedder.embed_batch(&chunks).await.unwrap();
        let index = VectorIndex::build(vectors).unwrap();
        (Retriever::new(embedder), chunks, index)
    }

    #[tokio::test]
    async fn test_cat_mat_end_to_end() {
        let (retriever, chunks, index) = cat_mat_fixture().await;
        assert_eq!(chunks, vec!["the cat sat", "on the mat"]);
        assert_eq!(index.len(), 2);

        let hits = retriever.retrieve("where is the cat", &index, 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 0);

        let generator = FixedAnswerer::replying("  On a mat.\n");
        let answer = retriever
            .answer("where is the cat", &chunks, &index, 1, &generator)
            .await
            .unwrap();

        assert_eq!(answer, "On a mat.");
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "the cat sat");
        assert_eq!(seen[0].1, "where is the cat");
    }

    #[tokio::test]
    async fn test_context_joins_hits_in_distance_order() {
        let (retriever, chunks, index) = cat_mat_fixture().await;
        let generator = FixedAnswerer::replying("ok");

        let answer = retriever
            .answer_with_sources("the mat", &chunks, &index, 10, &generator)
            .await
            .unwrap();

        assert_eq!(answer.sources.len(), 2);
        assert_eq!(answer.sources[0].index, 1);
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].0, "on the mat\n\nthe cat sat");
    }

    #[tokio::test]
    async fn test_generator_failure_is_upstream() {
        let (retriever, chunks, index) = cat_mat_fixture().await;
        let generator = FixedAnswerer::failing("quota exceeded");

        let err = retriever
            .answer("cat?", &chunks, &index, 1, &generator)
            .await
            .unwrap_err();

        match err {
            SporError::Upstream(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_k_fails_before_generation() {
        let (retriever, chunks, index) = cat_mat_fixture().await;
        let generator = FixedAnswerer::replying("unused");

        let err = retriever
            .answer("cat?", &chunks, &index, 0, &generator)
            .await
            .unwrap_err();

        assert!(matches!(err, SporError::InvalidArgument(_)));
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_chunks_are_internal_error() {
        let (retriever, _, index) = cat_mat_fixture().await;
        let generator = FixedAnswerer::replying("unused");
        let too_few = vec!["only one".to_string()];

        let err = retriever
            .answer("the mat", &too_few, &index, 1, &generator)
            .await
            .unwrap_err();

        assert!(matches!(err, SporError::InternalConsistency(_)));
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_dimension_mismatch_propagates() {
        let (_, chunks, index) = cat_mat_fixture().await;
        let retriever = Retriever::new(Arc::new(KeywordEmbedder::new(&["cat"])));
        let generator = FixedAnswerer::replying("unused");

        let err = retriever
            .answer("cat", &chunks, &index, 1, &generator)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SporError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[tokio::test]
    async fn test_exact_match_distance_is_zero() {
        let (retriever, _, index) = cat_mat_fixture().await;
        let hits = retriever.retrieve("on the mat", &index, 1).await.unwrap();
        assert_eq!(hits, vec![Neighbor { index: 1, distance: 0.0 }]);
    }
}
