//! Replacement strategies
//!
//! This module provides (μ+λ) elitist truncation.

use tracing::instrument;

use crate::operators::traits::ReplacementStrategy;
use crate::population::population::Population;

/// Elitist truncation
///
/// Pools parents and offspring, sorts ascending by fitness (stable, so
/// parents win ties against offspring) and keeps the first `|parents|`.
/// The best fitness can therefore never get worse from one generation to
/// the next.
#[derive(Clone, Debug, Default)]
pub struct ElitistReplacement;

impl ElitistReplacement {
    /// Create a new elitist replacement
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementStrategy for ElitistReplacement {
    #[instrument(
        level = "debug",
        skip_all,
        fields(parents = parents.len(), offspring = offspring.len())
    )]
    fn replace(&self, parents: Population, offspring: Population) -> Population {
        let size = parents.len();
        let generation = parents.generation();

        let mut combined = Population::with_capacity(size + offspring.len());
        combined.extend(parents);
        combined.extend(offspring);
        combined.truncate_to_best(size);
        combined.set_generation(generation);
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::DistanceToTarget;
    use crate::population::individual::Individual;

    fn population_of(xs: &[f64]) -> Population {
        let model = DistanceToTarget::origin();
        xs.iter()
            .map(|&x| Individual::evaluated([x, 0.0, 0.0], &model))
            .collect()
    }

    fn fitnesses(population: &Population) -> Vec<f64> {
        population.iter().map(|i| i.fitness()).collect()
    }

    #[test]
    fn test_keeps_best_of_union() {
        let parents = population_of(&[5.0, 1.0, 9.0, 7.0]);
        let offspring = population_of(&[2.0, 8.0, 0.5, 6.0]);

        let next = ElitistReplacement::new().replace(parents, offspring);
        assert_eq!(fitnesses(&next), vec![0.5, 1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_parents_survive_when_offspring_are_worse() {
        let parents = population_of(&[1.0, 2.0]);
        let offspring = population_of(&[3.0, 4.0]);

        let next = ElitistReplacement::new().replace(parents.clone(), offspring);
        assert_eq!(next.individuals(), parents.individuals());
    }

    #[test]
    fn test_ties_prefer_parents() {
        let model = DistanceToTarget::origin();
        let parents: Population = vec![Individual::evaluated([0.0, 3.0, 0.0], &model)]
            .into_iter()
            .collect();
        let offspring: Population = vec![Individual::evaluated([3.0, 0.0, 0.0], &model)]
            .into_iter()
            .collect();

        let next = ElitistReplacement::new().replace(parents, offspring);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].genes(), &[0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_keeps_generation_counter() {
        let mut parents = population_of(&[1.0, 2.0]);
        parents.set_generation(7);

        let next = ElitistReplacement::new().replace(parents, population_of(&[0.0, 3.0]));
        assert_eq!(next.generation(), 7);
    }
}
