//! Content chunking for breaking transcripts into searchable segments.
//!
//! Chunks are fixed-size windows of whitespace-separated words. The position of
//! a chunk in the returned vector is the key used by the vector index, so the
//! order is significant.

pub mod tokens;

pub use tokens::{estimate_tokens, token_chunks};

use crate::error::{Result, SporError};

/// Default number of words per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Split `text` into chunks of `chunk_size` words.
///
/// Words are separated by any run of whitespace and re-joined with a single
/// space. The last chunk holds the remainder. Empty text yields no chunks.
pub fn chunk_words(text: &str, chunk_size: usize) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(SporError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    let words: Vec<&str> = text.split_whitespace().collect();

    Ok(words
        .chunks(chunk_size)
        .map(|window| window.join(" "))
        .collect())
}
