//! Search command implementation.

use super::open_session;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    video: &str,
    query: &str,
    chunk_size: Option<usize>,
    k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Search) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let chunk_size = chunk_size.unwrap_or(settings.chunking.chunk_size);
    let k = k.unwrap_or(settings.retrieval.top_k);

    let session = open_session(video, chunk_size, &settings).await?;

    let results = match session.search(query, k).await {
        Ok(results) => results,
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    };

    Output::success(&format!(
        "Top {} of {} chunks",
        results.len(),
        session.chunks().len()
    ));

    for (rank, hit) in results.iter().enumerate() {
        let content = session
            .chunks()
            .get(hit.index)
            .map(String::as_str)
            .unwrap_or_default();
        Output::search_hit(rank + 1, hit.index, hit.distance, content);
    }

    Ok(())
}
