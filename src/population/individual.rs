//! Individual type
//!
//! This module provides the Individual type that pairs a gene vector with
//! its fitness.

use std::cmp::Ordering;

use serde::Serialize;

use crate::fitness::traits::FitnessModel;
use crate::genome::Genes;

/// An individual in the population
///
/// The fitness is a cache of `model.evaluate(&genes)`. Both fields are
/// private: individuals are only built through [`Individual::evaluated`] and
/// genes only change through [`Individual::set_gene`], which re-scores before
/// returning, so a stale fitness can never be observed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Individual {
    genes: Genes,
    fitness: f64,
}

impl Individual {
    /// Create an individual and score it immediately
    pub fn evaluated<M: FitnessModel + ?Sized>(genes: Genes, model: &M) -> Self {
        let fitness = model.evaluate(&genes);
        Self { genes, fitness }
    }

    /// The gene vector
    pub fn genes(&self) -> &Genes {
        &self.genes
    }

    /// The cached fitness (lower is better)
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Overwrite one gene and re-score
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_gene<M: FitnessModel + ?Sized>(&mut self, index: usize, value: f64, model: &M) {
        self.genes[index] = value;
        self.fitness = model.evaluate(&self.genes);
    }

    /// Check if this individual is strictly better than another
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness < other.fitness
    }

    /// Order by fitness, best first
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

/// A pair of individuals (for crossover results)
pub type IndividualPair = (Individual, Individual);
