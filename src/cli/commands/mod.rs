//! CLI command implementations.

mod ask;
mod config;
mod fetch;
mod search;
mod summarise;

pub use ask::run_ask;
pub use config::run_config;
pub use fetch::run_fetch;
pub use search::run_search;
pub use summarise::run_summarise;

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::error::SporError;
use crate::session::QaSession;
use crate::transcript::{load_transcript, parse_video_id};
use anyhow::Result;
use std::sync::Arc;

/// Load the stored transcript for `video` and index it.
async fn open_session(video: &str, chunk_size: usize, settings: &Settings) -> Result<QaSession> {
    let video_id = parse_video_id(video)?;

    let text = match load_transcript(&settings.transcripts_dir(), &video_id) {
        Ok(text) => text,
        Err(e @ SporError::TranscriptNotFound(_)) => {
            Output::error(&e.to_string());
            Output::info(&format!("Run 'spor fetch {}' first.", video_id));
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
        settings.embedding.batch_size,
    )?);

    let spinner = Output::spinner("Embedding transcript...");
    let session = QaSession::build(&text, chunk_size, embedder).await;
    spinner.finish_and_clear();

    Ok(session?)
}
