//! Operator traits
//!
//! This module defines the stage traits of the generational loop. Every
//! operator receives the run's random generator explicitly and never
//! creates one of its own.

use rand::Rng;

use crate::error::OperatorError;
use crate::fitness::traits::FitnessModel;
use crate::genome::bounds::SpaceBounds;
use crate::population::individual::{Individual, IndividualPair};
use crate::population::population::Population;

/// Selection operator trait
///
/// Selects individuals from a population for reproduction.
pub trait SelectionOperator: Send + Sync {
    /// Select a single individual from a non-empty population
    ///
    /// Returns the index of the selected individual.
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize;

    /// Build a mating pool with one winner per population slot
    fn mating_pool<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Population, OperatorError> {
        if population.is_empty() {
            return Err(OperatorError::SelectionFailed(
                "population is empty".to_string(),
            ));
        }

        let individuals = population.individuals();
        Ok((0..individuals.len())
            .map(|_| individuals[self.select(individuals, rng)].clone())
            .collect())
    }
}

/// Crossover operator trait
///
/// Combines genetic material from two parents to create offspring.
pub trait CrossoverOperator: Send + Sync {
    /// Apply crossover to two parents and produce two scored offspring
    fn crossover<M: FitnessModel, R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        model: &M,
        rng: &mut R,
    ) -> IndividualPair;

    /// Recombine consecutive pairs of the mating pool
    ///
    /// The pool must have even size; an unpaired trailing individual is an
    /// error rather than being dropped.
    fn recombine<M: FitnessModel, R: Rng>(
        &self,
        mating_pool: &Population,
        model: &M,
        rng: &mut R,
    ) -> Result<Population, OperatorError> {
        if mating_pool.len() % 2 != 0 {
            return Err(OperatorError::CrossoverFailed(format!(
                "mating pool has odd size {}",
                mating_pool.len()
            )));
        }

        let mut offspring = Population::with_capacity(mating_pool.len());
        for pair in mating_pool.individuals().chunks_exact(2) {
            let (child1, child2) = self.crossover(&pair[0], &pair[1], model, rng);
            offspring.push(child1);
            offspring.push(child2);
        }
        Ok(offspring)
    }
}

/// Mutation operator trait
///
/// Applies random changes to individuals within bounds.
pub trait MutationOperator: Send + Sync {
    /// Possibly mutate one individual in place, re-scoring it if changed
    ///
    /// Returns true if the individual was mutated.
    fn mutate<M: FitnessModel, R: Rng>(
        &self,
        individual: &mut Individual,
        bounds: &SpaceBounds,
        model: &M,
        rng: &mut R,
    ) -> bool;

    /// Apply [`MutationOperator::mutate`] to every offspring
    ///
    /// Returns the number of individuals that were mutated.
    fn mutate_all<M: FitnessModel, R: Rng>(
        &self,
        offspring: &mut Population,
        bounds: &SpaceBounds,
        model: &M,
        rng: &mut R,
    ) -> usize {
        offspring
            .iter_mut()
            .map(|individual| self.mutate(individual, bounds, model, rng))
            .filter(|&mutated| mutated)
            .count()
    }
}

/// Replacement strategy trait
///
/// Builds the next generation from the current parents and their offspring.
pub trait ReplacementStrategy: Send + Sync {
    /// Produce a population of `parents.len()` individuals
    fn replace(&self, parents: Population, offspring: Population) -> Population;
}
