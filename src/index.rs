//! Exact L2 nearest-neighbor index over fixed-dimension vectors
//!
//! Per-session corpora are small (single-digit-thousands of chunks), so a
//! brute-force flat index beats an ANN structure here: results are exact,
//! deterministic, and trivially reproducible across persist/load.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

use crate::error::{Error, Result};

/// One nearest-neighbor hit
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// 1-based rank in the result list
    pub rank: usize,
    /// Position of the vector inside the index (equals the chunk index)
    pub position: usize,
    /// L2 distance to the query vector
    pub distance: f32,
}

/// Immutable flat vector index
///
/// Built once per ingestion; re-ingesting a session replaces the whole index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index from an ordered vector set
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = match vectors.first() {
            Some(v) if !v.is_empty() => v.len(),
            Some(_) => {
                return Err(Error::DimensionMismatch {
                    expected: 1,
                    actual: 0,
                })
            }
            None => return Err(Error::EmptyVectorSet),
        };

        for v in &vectors {
            if v.len() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    actual: v.len(),
                });
            }
        }

        Ok(Self { dimension, vectors })
    }

    /// Number of indexed vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimension fixed at build time
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Exact k-nearest-neighbor search, ascending by L2 distance
    ///
    /// Returns `min(k, len)` results; equal distances are ordered by lower
    /// position, so repeated searches are byte-for-byte identical.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, v)| (position, l2_distance(query, v)))
            .collect();

        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(i, (position, distance))| Neighbor {
                rank: i + 1,
                position,
                distance,
            })
            .collect())
    }

    /// Write the index as a binary artifact
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| Error::internal(format!("Failed to encode index: {}", e)))?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Load a previously persisted index
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::IndexNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let (index, _): (Self, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
                .map_err(|e| Error::IndexCorrupt(format!("{}: {}", path.display(), e)))?;

        if index.vectors.iter().any(|v| v.len() != index.dimension) {
            return Err(Error::IndexCorrupt(format!(
                "{}: stored vectors disagree with recorded dimension {}",
                path.display(),
                index.dimension
            )));
        }

        Ok(index)
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_index() -> FlatIndex {
        FlatIndex::build(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![3.0, 4.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_build_rejects_empty_set() {
        assert!(matches!(
            FlatIndex::build(vec![]),
            Err(Error::EmptyVectorSet)
        ));
    }

    #[test]
    fn test_build_rejects_ragged_vectors() {
        let err = FlatIndex::build(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_search_ranks_by_distance() {
        let index = unit_index();
        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[0].rank, 1);
        assert!((hits[0].distance - 0.0).abs() < 1e-6);
        // Positions 1 and 2 are equidistant; lower position wins
        assert_eq!(hits[1].position, 1);
        assert_eq!(hits[2].position, 2);
        assert!((hits[1].distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_search_query_dimension_checked() {
        let index = unit_index();
        assert!(matches!(
            index.search(&[1.0, 2.0, 3.0], 2),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_k_larger_than_index_returns_all() {
        let index = unit_index();
        let hits = index.search(&[0.0, 0.0], 100).unwrap();
        assert_eq!(hits.len(), 4);
        assert_eq!(hits.last().unwrap().position, 3);
        assert!((hits.last().unwrap().distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_search_is_deterministic() {
        let index = unit_index();
        let first = index.search(&[0.5, 0.5], 4).unwrap();
        for _ in 0..10 {
            assert_eq!(index.search(&[0.5, 0.5], 4).unwrap(), first);
        }
    }

    #[test]
    fn test_persist_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("index.bin");

        let index = unit_index();
        index.persist(&path).unwrap();
        let loaded = FlatIndex::load(&path).unwrap();

        assert_eq!(loaded.len(), index.len());
        assert_eq!(loaded.dimension(), index.dimension());
        assert_eq!(
            loaded.search(&[0.3, 0.9], 4).unwrap(),
            index.search(&[0.3, 0.9], 4).unwrap()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = FlatIndex::load(tmp.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, Error::IndexNotFound(_)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("index.bin");
        std::fs::write(&path, b"definitely not bincode").unwrap();
        let err = FlatIndex::load(&path).unwrap_err();
        assert!(matches!(err, Error::IndexCorrupt(_)));
    }
}
