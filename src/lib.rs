//! Spor - Questions and summaries over video transcripts
//!
//! A small CLI and library for asking questions about a single transcript.
//!
//! The name "Spor" is Norwegian for "track", as in a sound track or a trail.
//!
//! # Overview
//!
//! Spor allows you to:
//! - Fetch YouTube transcripts from captions, or from the audio via Whisper
//! - Split a transcript into fixed-size word chunks and embed them
//! - Answer questions from the chunks closest to the question
//! - Summarise long transcripts into a single paragraph
//!
//! # Architecture
//!
//! - `chunking` - Word and token-budget chunking
//! - `embedding` - Embedding generation
//! - `index` - Exact in-memory nearest-neighbour search
//! - `rag` - Retrieval and answer generation
//! - `session` - One transcript, indexed once, queried many times
//! - `llm` - Chat completion models
//! - `summary` - Map-reduce summarisation
//! - `transcript` - Video IDs, captions and transcript storage
//! - `audio` / `transcription` - Audio download and speech-to-text fallback
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use spor::config::Settings;
//! use spor::embedding::OpenAIEmbedder;
//! use spor::llm::OpenAIChatModel;
//! use spor::rag::ChatAnswerer;
//! use spor::session::QaSession;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let text = spor::transcript::load_transcript(&settings.transcripts_dir(), "dQw4w9WgXcQ")?;
//!
//!     let embedder = Arc::new(OpenAIEmbedder::new()?);
//!     let session = QaSession::build(&text, settings.chunking.chunk_size, embedder).await?;
//!
//!     let answerer = ChatAnswerer::new(Arc::new(OpenAIChatModel::new("gpt-3.5-turbo")?));
//!     let answer = session.ask("What is the song about?", 5, &answerer).await?;
//!     println!("{}", answer.text);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod llm;
pub mod openai;
pub mod rag;
pub mod session;
pub mod summary;
pub mod transcript;
pub mod transcription;

#[cfg(test)]
mod testing;

pub use error::{Result, SporError};
