//! Population type
//!
//! This module provides the Population container type and its random
//! initializer.

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fitness::traits::{euclidean_distance, FitnessModel};
use crate::genome::bounds::SpaceBounds;
use crate::population::individual::Individual;

/// A population of individuals
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    /// The individuals in this population
    individuals: Vec<Individual>,
    /// Current generation number
    generation: usize,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            generation: 0,
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Create a random population
    ///
    /// Each gene is drawn uniformly from its own axis interval and every
    /// individual is scored immediately. Sampling always consumes the
    /// generator in the same order, so a seeded run yields the same
    /// population whether or not scoring is parallel.
    pub fn random<M, R>(size: usize, bounds: &SpaceBounds, model: &M, rng: &mut R) -> Self
    where
        M: FitnessModel,
        R: Rng,
    {
        let points: Vec<_> = (0..size).map(|_| bounds.sample(rng)).collect();
        Self::from_individuals(Self::score(points, model))
    }

    #[cfg(feature = "parallel")]
    fn score<M: FitnessModel>(points: Vec<crate::genome::Genes>, model: &M) -> Vec<Individual> {
        points
            .into_par_iter()
            .map(|genes| Individual::evaluated(genes, model))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score<M: FitnessModel>(points: Vec<crate::genome::Genes>, model: &M) -> Vec<Individual> {
        points
            .into_iter()
            .map(|genes| Individual::evaluated(genes, model))
            .collect()
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Set the generation number
    pub fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Append every individual of another population
    pub fn extend(&mut self, other: Population) {
        self.individuals.extend(other.individuals);
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// Get a mutable iterator over the individuals
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual> {
        self.individuals.iter_mut()
    }

    /// Get the underlying slice of individuals
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Take the individuals out of this population
    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Get the best individual (lowest fitness, first one on ties)
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .reduce(|best, candidate| {
                if candidate.is_better_than(best) {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Get the worst individual (highest fitness)
    pub fn worst(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .max_by(|a, b| a.cmp_fitness(b))
    }

    /// Sort the population by fitness, best first
    ///
    /// The sort is stable: equal fitness keeps the current order.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(|a, b| a.cmp_fitness(b));
    }

    /// Truncate the population to the given size, keeping the best individuals
    pub fn truncate_to_best(&mut self, size: usize) {
        self.sort_by_fitness();
        self.individuals.truncate(size);
    }

    /// Compute mean fitness
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.iter().map(Individual::fitness).sum::<f64>() / self.len() as f64)
        }
    }

    /// Compute fitness standard deviation
    pub fn fitness_std(&self) -> Option<f64> {
        let mean = self.mean_fitness()?;
        if self.len() < 2 {
            return None;
        }

        let variance = self
            .iter()
            .map(|i| (i.fitness() - mean).powi(2))
            .sum::<f64>()
            / (self.len() - 1) as f64;
        Some(variance.sqrt())
    }

    /// Compute population diversity (average pairwise distance)
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0.0;
        let mut count = 0;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance +=
                    euclidean_distance(self.individuals[i].genes(), self.individuals[j].genes());
                count += 1;
            }
        }

        total_distance / count as f64
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
