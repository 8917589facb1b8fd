//! Transcript acquisition and storage.
//!
//! Transcripts are plain UTF-8 files named `<video_id>.txt`. New transcripts
//! come from captions when available, or from downloading the audio and
//! running it through a [`Transcriber`].

mod captions;
mod video_id;

pub use captions::{vtt_to_text, CaptionFetcher};
pub use video_id::parse_video_id;

use crate::audio::AudioFetcher;
use crate::config::TranscriptPreference;
use crate::error::{Result, SporError};
use crate::transcription::Transcriber;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Path of the transcript file for `video_id`.
pub fn transcript_path(dir: &Path, video_id: &str) -> PathBuf {
    dir.join(format!("{}.txt", video_id))
}

/// Read the stored transcript for `video_id`.
pub fn load_transcript(dir: &Path, video_id: &str) -> Result<String> {
    let path = transcript_path(dir, video_id);
    if !path.exists() {
        return Err(SporError::TranscriptNotFound(path));
    }
    Ok(std::fs::read_to_string(&path)?)
}

/// Like [`load_transcript`], with a missing file as `Ok(None)`.
///
/// A file that exists but cannot be read is still an error.
pub fn load_stored(dir: &Path, video_id: &str) -> Result<Option<String>> {
    match load_transcript(dir, video_id) {
        Ok(text) => Ok(Some(text)),
        Err(SporError::TranscriptNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Store a transcript for `video_id`, creating `dir` if needed.
pub fn save_transcript(dir: &Path, video_id: &str, text: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = transcript_path(dir, video_id);
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Source of caption text for a video.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Caption text for `video_id`, or `None` if the video has none.
    ///
    /// Intermediate files go into `dir`.
    async fn captions(&self, video_id: &str, dir: &Path) -> Result<Option<String>>;
}

/// Where an acquired transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOrigin {
    Captions,
    Audio,
}

impl std::fmt::Display for TranscriptOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptOrigin::Captions => write!(f, "captions"),
            TranscriptOrigin::Audio => write!(f, "audio transcription"),
        }
    }
}

type AudioCheck = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// Obtains transcripts for videos, captions first or audio only.
pub struct TranscriptAcquirer {
    captions: Arc<dyn CaptionSource>,
    audio: Arc<dyn AudioFetcher>,
    transcriber: Arc<dyn Transcriber>,
    work_dir: PathBuf,
    audio_check: Option<AudioCheck>,
}

impl TranscriptAcquirer {
    /// Create an acquirer that stages downloads under `work_dir`.
    pub fn new(
        captions: Arc<dyn CaptionSource>,
        audio: Arc<dyn AudioFetcher>,
        transcriber: Arc<dyn Transcriber>,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            captions,
            audio,
            transcriber,
            work_dir,
            audio_check: None,
        }
    }

    /// Run `check` right before falling back to audio; an error stops the fetch.
    pub fn with_audio_check(mut self, check: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        self.audio_check = Some(Box::new(check));
        self
    }

    /// Get the transcript text for `video_id`.
    ///
    /// Downloads live in a scratch directory under the work dir that is
    /// removed before returning, whatever the outcome.
    #[instrument(skip(self), fields(video_id = %video_id, prefer = %preference))]
    pub async fn acquire(
        &self,
        video_id: &str,
        preference: TranscriptPreference,
    ) -> Result<(String, TranscriptOrigin)> {
        std::fs::create_dir_all(&self.work_dir)?;
        let scratch = tempfile::Builder::new()
            .prefix(&format!("{}-", video_id))
            .tempdir_in(&self.work_dir)?;

        if preference == TranscriptPreference::Captions {
            match self.captions.captions(video_id, scratch.path()).await? {
                Some(text) if !text.trim().is_empty() => {
                    return Ok((text, TranscriptOrigin::Captions));
                }
                _ => info!("No captions for {}, falling back to audio", video_id),
            }
        }

        if let Some(check) = &self.audio_check {
            check()?;
        }

        let audio_path = self.audio.fetch_audio(video_id, scratch.path()).await?;
        debug!("Audio at {}", audio_path.display());
        let text = self.transcriber.transcribe(&audio_path).await?;

        if text.trim().is_empty() {
            return Err(SporError::Transcript("Transcript retrieval failed".to_string()));
        }
        Ok((text, TranscriptOrigin::Audio))
    }
}
