//! Audio download and splitting for the transcription fallback.

mod downloader;

pub use downloader::{download_audio, split_audio, YtDlpAudio};
pub(crate) use downloader::run_tool;

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Source of a video's audio track.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Write the audio of `video_id` into `dir` and return its path.
    async fn fetch_audio(&self, video_id: &str, dir: &Path) -> Result<PathBuf>;
}
