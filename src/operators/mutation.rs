//! Mutation operators
//!
//! This module provides single-gene uniform resampling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::OperatorError;
use crate::fitness::traits::FitnessModel;
use crate::genome::bounds::SpaceBounds;
use crate::genome::GENE_COUNT;
use crate::operators::traits::MutationOperator;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Which interval a mutated gene is resampled from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleAxis {
    /// The interval of the mutated gene's own axis
    #[default]
    Matching,
    /// Always the X interval, whatever gene was picked
    ///
    /// Reproduces the output distribution of the legacy optimizer, which
    /// resampled every gene from the X bounds.
    FirstAxis,
}

/// Uniform resample mutation
///
/// With probability `rate` per individual, picks one gene uniformly and
/// replaces it with a uniform draw from its interval. The individual is
/// re-scored immediately.
#[derive(Clone, Debug)]
pub struct ResampleMutation {
    rate: f64,
    axis: ResampleAxis,
}

impl ResampleMutation {
    /// Create a new resample mutation
    ///
    /// # Panics
    /// Panics if `rate` is not in `[0, 1]`.
    pub fn new(rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "Probability must be in [0, 1]");
        Self {
            rate,
            axis: ResampleAxis::default(),
        }
    }

    /// Create a resample mutation, rejecting a rate outside `[0, 1]`
    pub fn try_new(rate: f64) -> Result<Self, OperatorError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "mutation rate {} is outside [0, 1]",
                rate
            )));
        }
        Ok(Self::new(rate))
    }

    /// Set the resample axis policy
    pub fn with_axis(mut self, axis: ResampleAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Per-individual mutation probability
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Resample axis policy
    pub fn axis(&self) -> ResampleAxis {
        self.axis
    }

    /// Mutate the offspring in place
    ///
    /// Returns the number of individuals that were changed.
    #[instrument(level = "debug", skip_all, fields(rate = self.rate, offspring = offspring.len()))]
    pub fn apply<M: FitnessModel, R: Rng>(
        &self,
        offspring: &mut Population,
        bounds: &SpaceBounds,
        model: &M,
        rng: &mut R,
    ) -> usize {
        self.mutate_all(offspring, bounds, model, rng)
    }
}

impl MutationOperator for ResampleMutation {
    fn mutate<M: FitnessModel, R: Rng>(
        &self,
        individual: &mut Individual,
        bounds: &SpaceBounds,
        model: &M,
        rng: &mut R,
    ) -> bool {
        if rng.gen::<f64>() >= self.rate {
            return false;
        }

        let gene = rng.gen_range(0..GENE_COUNT);
        let source = match self.axis {
            ResampleAxis::Matching => gene,
            ResampleAxis::FirstAxis => 0,
        };
        let value = match bounds.axis(source) {
            Some(bound) => bound.sample(rng),
            None => return false,
        };
        individual.set_gene(gene, value, model);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::DistanceToTarget;
    use crate::genome::bounds::Bounds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn disjoint_bounds() -> SpaceBounds {
        SpaceBounds::new(
            Bounds::new(100.0, 101.0),
            Bounds::new(200.0, 201.0),
            Bounds::new(300.0, 301.0),
        )
    }

    fn offspring(n: usize, rng: &mut StdRng) -> Population {
        Population::random(n, &SpaceBounds::default(), &DistanceToTarget::origin(), rng)
    }

    #[test]
    fn test_zero_rate_leaves_offspring_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let model = DistanceToTarget::origin();
        let mut population = offspring(50, &mut rng);
        let before = population.clone();

        let mutated =
            ResampleMutation::new(0.0).apply(&mut population, &disjoint_bounds(), &model, &mut rng);
        assert_eq!(mutated, 0);
        assert_eq!(population, before);
    }

    #[test]
    fn test_full_rate_changes_exactly_one_gene() {
        let mut rng = StdRng::seed_from_u64(2);
        let model = DistanceToTarget::origin();
        let mut population = offspring(50, &mut rng);
        let before = population.clone();

        let mutated =
            ResampleMutation::new(1.0).apply(&mut population, &disjoint_bounds(), &model, &mut rng);
        assert_eq!(mutated, 50);

        for (old, new) in before.iter().zip(population.iter()) {
            let changed = (0..GENE_COUNT)
                .filter(|&i| old.genes()[i] != new.genes()[i])
                .count();
            assert_eq!(changed, 1);
            assert_eq!(new.fitness(), model.evaluate(new.genes()));
        }
    }

    #[test]
    fn test_matching_axis_uses_own_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let model = DistanceToTarget::origin();
        let bounds = disjoint_bounds();
        let mutation = ResampleMutation::new(1.0);

        for _ in 0..100 {
            let mut individual = Individual::evaluated([0.0; GENE_COUNT], &model);
            mutation.mutate(&mut individual, &bounds, &model, &mut rng);

            let (gene, value) = individual
                .genes()
                .iter()
                .enumerate()
                .find(|&(_, &v)| v != 0.0)
                .map(|(i, &v)| (i, v))
                .unwrap();
            assert!(bounds.axis(gene).unwrap().contains(value));
        }
    }

    #[test]
    fn test_first_axis_uses_x_interval() {
        let mut rng = StdRng::seed_from_u64(4);
        let model = DistanceToTarget::origin();
        let bounds = disjoint_bounds();
        let mutation = ResampleMutation::new(1.0).with_axis(ResampleAxis::FirstAxis);

        for _ in 0..100 {
            let mut individual = Individual::evaluated([0.0; GENE_COUNT], &model);
            mutation.mutate(&mut individual, &bounds, &model, &mut rng);

            let value = individual
                .genes()
                .iter()
                .copied()
                .find(|&v| v != 0.0)
                .unwrap();
            assert!(bounds.x.contains(value));
        }
    }

    #[test]
    fn test_mutation_rate_is_per_individual() {
        let mut rng = StdRng::seed_from_u64(5);
        let model = DistanceToTarget::origin();
        let mut population = offspring(2000, &mut rng);

        let mutated = ResampleMutation::new(0.1).apply(
            &mut population,
            &SpaceBounds::default(),
            &model,
            &mut rng,
        );
        // Binomial(2000, 0.1): mean 200, sd ~13.4
        assert!((120..=280).contains(&mutated), "mutated {}", mutated);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(ResampleMutation::try_new(-0.1).is_err());
        assert!(ResampleMutation::try_new(1.5).is_err());
        assert!(ResampleMutation::try_new(f64::NAN).is_err());
        assert_eq!(ResampleMutation::try_new(0.25).unwrap().rate(), 0.25);
    }
}
