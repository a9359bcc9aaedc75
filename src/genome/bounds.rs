//! Bounds for gene values
//!
//! This module provides the per-axis interval type and the 3-D bounding
//! volume used for initialization and mutation resampling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Genes, GENE_COUNT};

/// Closed interval for a single axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics if min > max
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            min <= max,
            "Invalid bounds: min ({}) must be <= max ({})",
            min,
            max
        );
        Self { min, max }
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both ends finite and ordered, with a finite width
    ///
    /// Deserialized bounds bypass [`Bounds::new`], so configuration
    /// validation goes through this instead. Uniform sampling panics when
    /// `max - min` overflows, so such intervals are invalid too.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && self.range().is_finite()
    }

    /// Draw a value uniformly from `[min, max]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::symmetric(30.0)
    }
}

/// Axis-aligned bounding volume, one interval per gene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceBounds {
    /// Interval for gene 0
    pub x: Bounds,
    /// Interval for gene 1
    pub y: Bounds,
    /// Interval for gene 2
    pub z: Bounds,
}

impl SpaceBounds {
    /// Create bounds from one interval per axis
    pub fn new(x: Bounds, y: Bounds, z: Bounds) -> Self {
        Self { x, y, z }
    }

    /// Same interval on every axis
    pub fn uniform(bound: Bounds) -> Self {
        Self::new(bound, bound, bound)
    }

    /// `[-half_width, half_width]` on every axis
    pub fn symmetric(half_width: f64) -> Self {
        Self::uniform(Bounds::symmetric(half_width))
    }

    /// Interval for the given gene index
    pub fn axis(&self, index: usize) -> Option<&Bounds> {
        match index {
            0 => Some(&self.x),
            1 => Some(&self.y),
            2 => Some(&self.z),
            _ => None,
        }
    }

    /// Iterate over the axis intervals in gene order
    pub fn iter(&self) -> impl Iterator<Item = &Bounds> {
        [&self.x, &self.y, &self.z].into_iter()
    }

    /// Check that every gene lies in its axis interval
    pub fn contains(&self, genes: &Genes) -> bool {
        self.iter().zip(genes.iter()).all(|(b, &g)| b.contains(g))
    }

    /// Every axis is valid
    pub fn is_valid(&self) -> bool {
        self.iter().all(Bounds::is_valid)
    }

    /// Sample a point, each gene independently from its own axis
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Genes {
        let mut genes = [0.0; GENE_COUNT];
        for (gene, bound) in genes.iter_mut().zip(self.iter()) {
            *gene = bound.sample(rng);
        }
        genes
    }
}

impl Default for SpaceBounds {
    fn default() -> Self {
        Self::uniform(Bounds::default())
    }
}
