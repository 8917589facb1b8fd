//! Context building for RAG responses.

use crate::error::{Result, SporError};
use crate::index::{Neighbor, QueryResult};

/// Separator placed between retrieved chunks.
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Concatenate the text of the retrieved chunks, in result order.
///
/// Every hit must point inside `chunks`; the index and the chunk list are
/// built from the same sequence, so an out-of-range hit is a bug.
pub fn build_context(chunks: &[String], results: &QueryResult) -> Result<String> {
    let texts = results
        .iter()
        .map(|hit| chunk_text(chunks, hit))
        .collect::<Result<Vec<&str>>>()?;

    Ok(texts.join(CHUNK_SEPARATOR))
}

fn chunk_text<'a>(chunks: &'a [String], hit: &Neighbor) -> Result<&'a str> {
    chunks.get(hit.index).map(String::as_str).ok_or_else(|| {
        SporError::InternalConsistency(format!(
            "search returned chunk {} but only {} chunks exist",
            hit.index,
            chunks.len()
        ))
    })
}

/// Format retrieved chunks for display to the user.
pub fn format_sources_for_display(chunks: &[String], results: &QueryResult) -> String {
    results
        .iter()
        .filter_map(|hit| {
            chunks.get(hit.index).map(|text| {
                format!(
                    "[chunk {}] (distance: {:.4})\n{}",
                    hit.index, hit.distance, text
                )
            })
        })
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks() -> Vec<String> {
        vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()]
    }

    #[test]
    fn test_context_follows_result_order() {
        let results = vec![
            Neighbor { index: 2, distance: 0.1 },
            Neighbor { index: 0, distance: 0.5 },
        ];
        assert_eq!(build_context(&chunks(), &results).unwrap(), "gamma\n\nalpha");
    }

    #[test]
    fn test_single_hit_is_bare_chunk() {
        let results = vec![Neighbor { index: 1, distance: 0.0 }];
        assert_eq!(build_context(&chunks(), &results).unwrap(), "beta");
    }

    #[test]
    fn test_out_of_range_hit_is_internal_error() {
        let results = vec![Neighbor { index: 3, distance: 0.0 }];
        assert!(matches!(
            build_context(&chunks(), &results),
            Err(SporError::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_format_sources_for_display() {
        let results = vec![Neighbor { index: 0, distance: 0.25 }];
        let shown = format_sources_for_display(&chunks(), &results);
        assert_eq!(shown, "[chunk 0] (distance: 0.2500)\nalpha");
    }
}
