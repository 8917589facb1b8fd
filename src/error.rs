//! Error types for Spor.

use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for Spor operations.
#[derive(Error, Debug)]
pub enum SporError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Answer generation failed: {0}")]
    Upstream(String),

    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript not found: {}", .0.display())]
    TranscriptNotFound(PathBuf),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Audio download failed: {0}")]
    AudioDownload(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SporError {
    /// Re-tag an error coming out of the answer-generation collaborator.
    ///
    /// `Upstream` errors pass through untouched.
    pub fn into_upstream(self) -> Self {
        match self {
            e @ SporError::Upstream(_) => e,
            other => SporError::Upstream(other.to_string()),
        }
    }
}

/// Result type alias for Spor operations.
pub type Result<T> = std::result::Result<T, SporError>;
