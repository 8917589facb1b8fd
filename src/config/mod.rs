//! Configuration module for Spor.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts, SummaryPrompts};
pub use settings::{
    AnswerSettings, ChunkingSettings, EmbeddingSettings, GeneralSettings, PromptSettings,
    RetrievalSettings, Settings, SummarySettings, TranscriptPreference, TranscriptionSettings,
};
