//! Nearest-neighbor classification of normalized samples
//!
//! [`Classifier`] maps neighbor indices back to knowledge-base labels; the
//! neighbor search itself sits behind [`NearestNeighbor`] so it can be
//! replaced (e.g. by an index structure) without touching the pipeline.

use crate::kb::KnowledgeBase;
use crate::segment::NormalizedSample;
use crate::{RecogError, RecogResult};

/// One search result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the training sample
    pub index: usize,
    /// Squared Euclidean distance to the query
    pub distance: f64,
}

/// k-nearest-neighbor search over fixed-length vectors
pub trait NearestNeighbor: Send + Sync {
    /// Replace the index content with `samples`.
    fn knn_train(&mut self, samples: &[NormalizedSample]) -> RecogResult<()>;

    /// The `k` samples closest to `query`, nearest first. Ties on
    /// distance are ordered by index.
    fn knn_query(&self, query: &[f32], k: usize) -> RecogResult<Vec<Neighbor>>;
}

/// Exhaustive search with squared Euclidean distance
#[derive(Debug, Clone, Default)]
pub struct BruteForceKnn {
    dim: usize,
    data: Vec<f32>,
}

impl BruteForceKnn {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed samples
    pub fn len(&self) -> usize {
        if self.dim == 0 { 0 } else { self.data.len() / self.dim }
    }

    /// Whether no samples are indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NearestNeighbor for BruteForceKnn {
    fn knn_train(&mut self, samples: &[NormalizedSample]) -> RecogResult<()> {
        let Some(first) = samples.first() else {
            return Err(RecogError::EmptyKnowledgeBase);
        };
        let dim = first.len();
        if let Some(bad) = samples.iter().find(|s| s.len() != dim) {
            return Err(RecogError::InvalidParameter(format!(
                "samples differ in length: {} and {}",
                dim,
                bad.len()
            )));
        }
        self.dim = dim;
        self.data = samples.iter().flat_map(|s| s.values().iter().copied()).collect();
        Ok(())
    }

    fn knn_query(&self, query: &[f32], k: usize) -> RecogResult<Vec<Neighbor>> {
        if self.is_empty() {
            return Err(RecogError::EmptyKnowledgeBase);
        }
        if query.len() != self.dim {
            return Err(RecogError::InvalidParameter(format!(
                "query has {} values, index holds {}",
                query.len(),
                self.dim
            )));
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(index, row)| Neighbor {
                index,
                distance: squared_distance(row, query),
            })
            .collect();
        // stable sort keeps lower indices first among equal distances
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k.max(1));
        Ok(neighbors)
    }
}

fn squared_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

/// Result of a k-nearest-neighbor lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    /// Majority label among the neighbors
    pub label: char,
    /// Neighbors with their labels, nearest first
    pub neighbors: Vec<(char, Neighbor)>,
}

/// A trained nearest-neighbor classifier
#[derive(Debug, Clone)]
pub struct Classifier<K = BruteForceKnn> {
    labels: Vec<char>,
    knn: K,
}

impl Classifier<BruteForceKnn> {
    /// Train a brute-force classifier on `kb`.
    ///
    /// # Errors
    /// Returns [`RecogError::EmptyKnowledgeBase`] if `kb` has no samples.
    pub fn train(kb: &KnowledgeBase) -> RecogResult<Self> {
        Self::train_with(kb, BruteForceKnn::new())
    }
}

impl<K: NearestNeighbor> Classifier<K> {
    /// Train a classifier on `kb` with the given search implementation.
    pub fn train_with(kb: &KnowledgeBase, mut knn: K) -> RecogResult<Self> {
        if kb.is_empty() {
            return Err(RecogError::EmptyKnowledgeBase);
        }
        knn.knn_train(kb.samples())?;
        tracing::debug!(samples = kb.len(), "trained classifier");
        Ok(Self {
            labels: kb.labels().to_vec(),
            knn,
        })
    }

    /// Label of the single nearest training sample.
    pub fn classify(&self, sample: &NormalizedSample) -> RecogResult<char> {
        Ok(self.find_nearest(sample, 1)?.label)
    }

    /// The `k` nearest training samples and their majority label.
    ///
    /// When several labels have the most votes, the one whose first
    /// neighbor is nearest wins.
    pub fn find_nearest(&self, sample: &NormalizedSample, k: usize) -> RecogResult<Nearest> {
        let found = self.knn.knn_query(sample.values(), k)?;
        let neighbors = found
            .into_iter()
            .map(|n| {
                self.labels
                    .get(n.index)
                    .map(|&label| (label, n))
                    .ok_or_else(|| {
                        RecogError::InvalidParameter(format!(
                            "neighbor index {} out of range",
                            n.index
                        ))
                    })
            })
            .collect::<RecogResult<Vec<_>>>()?;

        let mut best: Option<(char, usize)> = None;
        for &(label, _) in &neighbors {
            let votes = neighbors.iter().filter(|(l, _)| *l == label).count();
            if best.is_none_or(|(_, v)| votes > v) {
                best = Some((label, votes));
            }
        }
        let (label, _) = best.ok_or(RecogError::EmptyKnowledgeBase)?;
        Ok(Nearest { label, neighbors })
    }

    /// Number of training samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false` for a trained classifier
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
