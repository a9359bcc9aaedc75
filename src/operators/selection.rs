//! Selection operators
//!
//! This module provides tournament selection over a minimizing population.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::OperatorError;
use crate::operators::traits::SelectionOperator;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// How tournament contestants are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentSampling {
    /// Independent uniform draws; the same individual may compete twice
    #[default]
    WithReplacement,
    /// Distinct contestants; the tournament is capped at the population size
    WithoutReplacement,
}

/// Tournament selection operator
///
/// Selects the lowest-fitness individual from a random subset of the
/// population. Ties go to the contestant drawn first.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    tournament_size: usize,
    sampling: TournamentSampling,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    ///
    /// # Panics
    /// Panics if `tournament_size` is 0. Use [`TournamentSelection::try_new`]
    /// for untrusted input.
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self {
            tournament_size,
            sampling: TournamentSampling::default(),
        }
    }

    /// Create a tournament selection, rejecting a zero size
    pub fn try_new(tournament_size: usize) -> Result<Self, OperatorError> {
        if tournament_size == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self::new(tournament_size))
    }

    /// Set the contestant sampling mode
    pub fn with_sampling(mut self, sampling: TournamentSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Number of contestants per tournament
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Contestant sampling mode
    pub fn sampling(&self) -> TournamentSampling {
        self.sampling
    }

    /// Build the mating pool, one tournament per slot
    #[instrument(
        level = "debug",
        skip_all,
        fields(tournament_size = self.tournament_size, population = population.len())
    )]
    pub fn select_pool<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Population, OperatorError> {
        self.mating_pool(population, rng)
    }

    fn winner(population: &[Individual], contestants: impl IntoIterator<Item = usize>) -> usize {
        let mut contestants = contestants.into_iter();
        let mut best = contestants
            .next()
            .expect("tournament has at least one contestant");
        for candidate in contestants {
            if population[candidate].is_better_than(&population[best]) {
                best = candidate;
            }
        }
        best
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "Population cannot be empty");

        match self.sampling {
            TournamentSampling::WithReplacement => {
                let n = population.len();
                let draws: Vec<usize> = (0..self.tournament_size)
                    .map(|_| rng.gen_range(0..n))
                    .collect();
                Self::winner(population, draws)
            }
            TournamentSampling::WithoutReplacement => {
                let size = self.tournament_size.min(population.len());
                Self::winner(
                    population,
                    index::sample(rng, population.len(), size).into_iter(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::DistanceToTarget;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_population(n: usize) -> Population {
        let model = DistanceToTarget::origin();
        (0..n)
            .map(|i| Individual::evaluated([i as f64 + 1.0, 0.0, 0.0], &model))
            .collect()
    }

    #[test]
    fn test_tournament_selection_favors_fit() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = create_population(10);
        let selection = TournamentSelection::new(3);

        let mut counts = [0usize; 10];
        for _ in 0..1000 {
            counts[selection.select(population.individuals(), &mut rng)] += 1;
        }

        // Index 0 is the fittest and should win far more often than the worst
        assert!(counts[0] > counts[9] * 5);
    }

    #[test]
    fn test_tournament_size_one_is_uniform_draw() {
        let mut rng = StdRng::seed_from_u64(11);
        let population = create_population(4);
        let selection = TournamentSelection::new(1);

        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[selection.select(population.individuals(), &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_full_tournament_without_replacement_returns_global_best() {
        let mut rng = StdRng::seed_from_u64(5);
        let model = DistanceToTarget::origin();
        let population: Population = [7.0, 3.0, 9.0, 0.5, 4.0, 6.0]
            .iter()
            .map(|&x| Individual::evaluated([x, 0.0, 0.0], &model))
            .collect();
        let selection = TournamentSelection::new(population.len())
            .with_sampling(TournamentSampling::WithoutReplacement);

        let pool = selection.select_pool(&population, &mut rng).unwrap();
        assert_eq!(pool.len(), population.len());
        assert!(pool.iter().all(|i| i.genes() == &[0.5, 0.0, 0.0]));
    }

    #[test]
    fn test_with_replacement_winner_is_best_contestant() {
        let mut rng = StdRng::seed_from_u64(8);
        let population = create_population(2);
        let selection = TournamentSelection::new(64);

        // With 64 draws over two individuals, the fitter one is drawn with
        // probability 1 - 2^-64.
        let pool = selection.select_pool(&population, &mut rng).unwrap();
        assert!(pool.iter().all(|i| i == &population[0]));
    }

    #[test]
    fn test_ties_go_to_first_drawn() {
        let model = DistanceToTarget::origin();
        let population: Population = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
            .iter()
            .map(|&p| Individual::evaluated(p, &model))
            .collect();

        assert_eq!(
            TournamentSelection::winner(population.individuals(), vec![2, 0, 1]),
            2
        );
        assert_eq!(
            TournamentSelection::winner(population.individuals(), vec![1, 1, 2]),
            1
        );
    }

    #[test]
    fn test_select_pool_is_reproducible() {
        let population = create_population(12);
        let selection = TournamentSelection::new(5);

        let a = selection
            .select_pool(&population, &mut StdRng::seed_from_u64(21))
            .unwrap();
        let b = selection
            .select_pool(&population, &mut StdRng::seed_from_u64(21))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(TournamentSelection::try_new(0).is_err());
        assert_eq!(TournamentSelection::try_new(4).unwrap().tournament_size(), 4);
    }

    #[test]
    #[should_panic(expected = "Tournament size must be at least 1")]
    fn test_new_panics_on_zero() {
        TournamentSelection::new(0);
    }
}
