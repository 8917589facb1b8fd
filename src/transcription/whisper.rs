//! OpenAI Whisper transcription implementation.

use super::{transcribe_segments, Transcriber};
use crate::audio::split_audio;
use crate::error::{Result, SporError};
use crate::openai::create_client;
use async_openai::types::{AudioInput, AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info, instrument};

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    segment_seconds: u32,
    max_concurrent: usize,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config("whisper-1", 600, 3)
    }

    /// Create a new Whisper transcriber with custom configuration.
    pub fn with_config(model: &str, segment_seconds: u32, max_concurrent: usize) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: model.to_string(),
            segment_seconds,
            max_concurrent: max_concurrent.max(1),
        })
    }

    /// Transcribe a single audio file (no splitting).
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_single(&self, audio_path: &Path) -> Result<String> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3")
            .to_string();

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(file_name, file_bytes))
            .model(&self.model)
            .response_format(AudioResponseFormat::Json)
            .build()
            .map_err(|e| SporError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| SporError::Transcription(format!("Whisper API error: {}", e)))?;

        Ok(response.text.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let temp_dir = tempfile::tempdir()?;
        let segments = split_audio(audio_path, temp_dir.path(), self.segment_seconds).await?;

        if segments.len() == 1 {
            return self.transcribe_single(&segments[0]).await;
        }

        info!("Transcribing {} audio segments with {}", segments.len(), self.model);
        transcribe_segments(segments, self.max_concurrent, &SingleRequest(self)).await
    }
}

/// One Whisper request per file, no splitting.
struct SingleRequest<'a>(&'a WhisperTranscriber);

#[async_trait]
impl<'a> Transcriber for SingleRequest<'a> {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        self.0.transcribe_single(audio_path).await
    }
}
