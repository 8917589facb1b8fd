//! Token-budgeted splitting for summarisation.
//!
//! Token counts are estimated from word counts (roughly four tokens for every
//! three English words) instead of running a real tokenizer.

use super::chunk_words;
use crate::error::{Result, SporError};

/// Estimate the number of model tokens in `text`.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    (words * 4).div_ceil(3)
}

/// Split `text` into parts whose estimated token count stays within `max_tokens`.
///
/// A single word is estimated at two tokens, so budgets below 2 are rejected.
pub fn token_chunks(text: &str, max_tokens: usize) -> Result<Vec<String>> {
    if max_tokens < 2 {
        return Err(SporError::InvalidArgument(format!(
            "token budget must be at least 2, got {}",
            max_tokens
        )));
    }

    chunk_words(text, max_tokens * 3 / 4)
}
