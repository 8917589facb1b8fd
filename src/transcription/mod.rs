//! Speech-to-text for videos without usable captions.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::{Result, SporError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file to plain text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Transcribe `segments` with at most `max_concurrent` requests in flight.
///
/// Texts are joined with single spaces in segment order, regardless of which
/// request finishes first. The first failure aborts the remaining segments.
pub async fn transcribe_segments(
    segments: Vec<PathBuf>,
    max_concurrent: usize,
    part: &dyn Transcriber,
) -> Result<String> {
    let pb = ProgressBar::new(segments.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.green} Whisper   [{bar:30.cyan/blue}] {pos}/{len}")
            .map_err(|e| SporError::Transcription(e.to_string()))?
            .progress_chars("█▓░"),
    );

    let result: Result<Vec<String>> = stream::iter(segments)
        .map(|segment| {
            let pb = pb.clone();
            async move {
                let text = part.transcribe(&segment).await;
                pb.inc(1);
                text
            }
        })
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await;

    pb.finish_and_clear();

    Ok(result?
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}
