//! Exact nearest-neighbour index over chunk embeddings.
//!
//! The index is built once from the embeddings of a chunk sequence and is
//! read-only afterwards. Vector `i` belongs to chunk `i`. Searches compare the
//! query against every stored vector by squared Euclidean distance.

use crate::error::{Result, SporError};
use std::cmp::Ordering;

/// A single search hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the matching vector (and chunk).
    pub index: usize,
    /// Squared Euclidean distance to the query (lower is closer).
    pub distance: f32,
}

/// Search hits ordered by ascending distance, ties by ascending index.
pub type QueryResult = Vec<Neighbor>;

/// In-memory exact-search vector index.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    /// Row-major, `len * dimension` values.
    data: Vec<f32>,
}

impl VectorIndex {
    /// Build an index over `vectors`.
    ///
    /// Every vector must have the same, non-zero length.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = match vectors.first() {
            Some(first) => first.len(),
            None => {
                return Err(SporError::EmptyInput(
                    "cannot build an index from zero vectors".to_string(),
                ))
            }
        };

        if dimension == 0 {
            return Err(SporError::InvalidArgument(
                "vectors must have at least one dimension".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(vectors.len() * dimension);
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(SporError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            data.extend_from_slice(vector);
        }

        Ok(Self { dimension, data })
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dimension shared by all stored vectors.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get the stored vector at `index`.
    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    /// Return the `k` stored vectors closest to `query`.
    ///
    /// Asking for more results than stored vectors returns all of them.
    pub fn search(&self, query: &[f32], k: usize) -> Result<QueryResult> {
        if k == 0 {
            return Err(SporError::InvalidArgument(
                "k must be greater than zero".to_string(),
            ));
        }
        if query.len() != self.dimension {
            return Err(SporError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(index, vector)| Neighbor {
                index,
                distance: squared_euclidean(query, vector),
            })
            .collect();

        let k = k.min(hits.len());
        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, compare_neighbors);
            hits.truncate(k);
        }
        hits.sort_unstable_by(compare_neighbors);

        Ok(hits)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Total order on hits: distance first, insertion index second.
fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.index.cmp(&b.index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vectors() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 2.0, 0.0],
            vec![3.0, 3.0, 3.0],
            vec![-1.0, 0.5, 0.0],
        ]
    }

    #[test]
    fn test_build_reports_size_and_dimension() {
        let index = VectorIndex::build(sample_vectors()).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.dimension(), 3);
        assert!(!index.is_empty());
        assert_eq!(index.vector(2), Some(&[0.0, 2.0, 0.0][..]));
        assert_eq!(index.vector(5), None);
    }

    #[test]
    fn test_build_empty_is_rejected() {
        assert!(matches!(
            VectorIndex::build(Vec::new()),
            Err(SporError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_build_inconsistent_dimensions_is_rejected() {
        let err = VectorIndex::build(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            SporError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_build_zero_dimension_is_rejected() {
        assert!(matches!(
            VectorIndex::build(vec![vec![], vec![]]),
            Err(SporError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_search_query_dimension_mismatch() {
        let index = VectorIndex::build(sample_vectors()).unwrap();
        let err = index.search(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            SporError::DimensionMismatch { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_search_zero_k_is_rejected() {
        let index = VectorIndex::build(sample_vectors()).unwrap();
        assert!(matches!(
            index.search(&[0.0, 0.0, 0.0], 0),
            Err(SporError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_search_results_sorted_and_first_is_minimum() {
        let vectors = sample_vectors();
        let index = VectorIndex::build(vectors.clone()).unwrap();
        let query = [0.9, 0.2, -0.1];

        let results = index.search(&query, 3).unwrap();
        assert_eq!(results.len(), 3);

        for pair in results.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }

        let min = vectors
            .iter()
            .map(|v| squared_euclidean(&query, v))
            .fold(f32::INFINITY, f32::min);
        assert_eq!(results[0].distance, min);
        assert_eq!(results[0].index, 1);
    }

    #[test]
    fn test_search_clamps_k_to_index_size() {
        let index = VectorIndex::build(sample_vectors()).unwrap();
        let results = index.search(&[0.0, 0.0, 0.0], 50).unwrap();

        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        let mut seen: Vec<usize> = results.iter().map(|n| n.index).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_exact_match_returns_zero_distance() {
        let vectors = sample_vectors();
        let index = VectorIndex::build(vectors.clone()).unwrap();

        for (j, v) in vectors.iter().enumerate() {
            let results = index.search(v, 1).unwrap();
            assert_eq!(results, vec![Neighbor { index: j, distance: 0.0 }]);
        }
    }

    #[test]
    fn test_ties_broken_by_insertion_order() {
        let index = VectorIndex::build(vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, -1.0],
            vec![-1.0, 0.0],
            vec![5.0, 5.0],
        ])
        .unwrap();

        let results = index.search(&[0.0, 0.0], 3).unwrap();
        let order: Vec<usize> = results.iter().map(|n| n.index).collect();
        assert_eq!(order, vec![0, 1, 2]);

        let all = index.search(&[0.0, 0.0], 10).unwrap();
        let order: Vec<usize> = all.iter().map(|n| n.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(squared_euclidean(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }

    #[test]
    fn test_concurrent_searches_share_index() {
        let index = std::sync::Arc::new(VectorIndex::build(sample_vectors()).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let index = index.clone();
                std::thread::spawn(move || index.search(&[i as f32, 0.0, 0.0], 2).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 2);
        }
    }
}
