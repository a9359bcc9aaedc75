//! Fitness traits
//!
//! Fitness here is a cost: lower is better, and the optimum is 0.

use serde::{Deserialize, Serialize};

use crate::genome::{Genes, GENE_COUNT};

/// Fitness evaluation trait
///
/// Maps a gene vector to a scalar score to be minimized.
/// Implementations must be pure: the cached fitness on an
/// [`Individual`](crate::population::individual::Individual) relies on
/// re-evaluation producing the same value.
pub trait FitnessModel: Send + Sync {
    /// Evaluate the genes (lower = better)
    fn evaluate(&self, genes: &Genes) -> f64;
}

/// Euclidean distance between two points
pub fn euclidean_distance(a: &Genes, b: &Genes) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Distance from a fixed target point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceToTarget {
    target: Genes,
}

impl DistanceToTarget {
    /// Create a model minimizing distance to `target`
    pub fn new(target: Genes) -> Self {
        Self { target }
    }

    /// Distance to the origin
    pub fn origin() -> Self {
        Self::new([0.0; GENE_COUNT])
    }

    /// The target point
    pub fn target(&self) -> &Genes {
        &self.target
    }
}

impl Default for DistanceToTarget {
    fn default() -> Self {
        Self::origin()
    }
}

impl FitnessModel for DistanceToTarget {
    fn evaluate(&self, genes: &Genes) -> f64 {
        euclidean_distance(genes, &self.target)
    }
}
