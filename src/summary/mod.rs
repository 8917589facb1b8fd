//! Map-reduce summarisation of long transcripts.
//!
//! The transcript is split into token-budgeted parts, every part is summarised
//! concurrently, and the part summaries are condensed into one paragraph.

use crate::chunking::{estimate_tokens, token_chunks};
use crate::config::{Prompts, SummarySettings};
use crate::error::{Result, SporError};
use crate::llm::ChatModel;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Summarises transcripts with a chat model.
pub struct Summariser {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
    settings: SummarySettings,
}

impl Summariser {
    /// Create a summariser.
    pub fn new(model: Arc<dyn ChatModel>, prompts: Prompts, settings: SummarySettings) -> Self {
        Self {
            model,
            prompts,
            settings,
        }
    }

    /// Summarise `text` into a single wrapped paragraph.
    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.model.model()))]
    pub async fn summarise(&self, text: &str) -> Result<String> {
        let parts = token_chunks(text, self.settings.max_tokens_per_part)?;
        if parts.is_empty() {
            return Err(SporError::EmptyInput("nothing to summarise".to_string()));
        }

        info!(
            "Summarising {} transcript parts (~{} tokens)",
            parts.len(),
            estimate_tokens(text)
        );
        let part_summaries = self.summarise_parts(&parts).await?;

        let combined = part_summaries.join("\n");
        debug!("Condensing {} characters of part summaries", combined.len());

        let condense_system = self
            .prompts
            .render_with_custom(&self.prompts.summary.condense_system, &Default::default());
        let summary = self
            .model
            .complete(&condense_system, &combined, self.settings.temperature)
            .await
            .map_err(SporError::into_upstream)?;

        Ok(wrap_text(summary.trim(), self.settings.wrap_width))
    }

    /// Summarise each part concurrently, keeping input order.
    ///
    /// Any failed part fails the whole batch.
    async fn summarise_parts(&self, parts: &[String]) -> Result<Vec<String>> {
        let segment_system = self
            .prompts
            .render_with_custom(&self.prompts.summary.segment_system, &Default::default());

        let requests = parts.iter().map(|part| {
            let system = segment_system.as_str();
            async move {
                self.model
                    .complete(system, part, self.settings.temperature)
                    .await
                    .map(|s| s.trim().to_string())
                    .map_err(SporError::into_upstream)
            }
        });

        try_join_all(requests).await
    }
}

/// Greedily wrap `text` into lines of at most `width` columns.
///
/// Words longer than `width` are kept whole on their own line.
pub fn wrap_text(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
