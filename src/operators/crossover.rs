//! Crossover operators
//!
//! This module provides two-point crossover over 3-gene individuals.

use rand::Rng;
use tracing::instrument;

use crate::error::OperatorError;
use crate::fitness::traits::FitnessModel;
use crate::genome::{Genes, GENE_COUNT};
use crate::operators::traits::CrossoverOperator;
use crate::population::individual::{Individual, IndividualPair};
use crate::population::population::Population;

/// Two-point crossover
///
/// Draws `cut1` uniformly from `[0, L)` and `cut2` uniformly from
/// `[cut1, L)`, then swaps the middle segment `[cut1, cut2)` between the
/// parents. Empty segments are allowed, so a pair may pass through
/// unchanged.
#[derive(Clone, Debug, Default)]
pub struct TwoPointCrossover;

impl TwoPointCrossover {
    /// Create a new two-point crossover
    pub fn new() -> Self {
        Self
    }

    /// Draw the two cut points
    pub fn cut_points<R: Rng>(rng: &mut R) -> (usize, usize) {
        let cut1 = rng.gen_range(0..GENE_COUNT);
        let cut2 = rng.gen_range(cut1..GENE_COUNT);
        (cut1, cut2)
    }

    /// Recombine a mating pool into offspring of the same size
    #[instrument(level = "debug", skip_all, fields(pool = mating_pool.len()))]
    pub fn offspring<M: FitnessModel, R: Rng>(
        &self,
        mating_pool: &Population,
        model: &M,
        rng: &mut R,
    ) -> Result<Population, OperatorError> {
        self.recombine(mating_pool, model, rng)
    }
}

/// Two-point crossover with fixed cut points
///
/// Child 1 takes `a` outside `[cut1, cut2)` and `b` inside it; child 2 is
/// the mirror image.
///
/// # Panics
/// Panics unless `cut1 <= cut2 <= GENE_COUNT`.
pub fn crossover_at(a: &Genes, b: &Genes, cut1: usize, cut2: usize) -> (Genes, Genes) {
    assert!(
        cut1 <= cut2 && cut2 <= GENE_COUNT,
        "Invalid cut points: {} and {}",
        cut1,
        cut2
    );

    let mut child1 = *a;
    let mut child2 = *b;
    child1[cut1..cut2].copy_from_slice(&b[cut1..cut2]);
    child2[cut1..cut2].copy_from_slice(&a[cut1..cut2]);
    (child1, child2)
}

impl CrossoverOperator for TwoPointCrossover {
    fn crossover<M: FitnessModel, R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        model: &M,
        rng: &mut R,
    ) -> IndividualPair {
        let (cut1, cut2) = Self::cut_points(rng);
        let (child1, child2) = crossover_at(parent1.genes(), parent2.genes(), cut1, cut2);
        (
            Individual::evaluated(child1, model),
            Individual::evaluated(child2, model),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::DistanceToTarget;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A: Genes = [1.0, 2.0, 3.0];
    const B: Genes = [10.0, 20.0, 30.0];

    #[test]
    fn test_crossover_swaps_middle_segment() {
        let (child1, child2) = crossover_at(&A, &B, 1, 2);
        assert_eq!(child1, [1.0, 20.0, 3.0]);
        assert_eq!(child2, [10.0, 2.0, 30.0]);
    }

    #[test]
    fn test_crossover_empty_middle_copies_parents() {
        for cut in 0..GENE_COUNT {
            let (child1, child2) = crossover_at(&A, &B, cut, cut);
            assert_eq!(child1, A);
            assert_eq!(child2, B);
        }
    }

    #[test]
    fn test_crossover_from_start() {
        let (child1, child2) = crossover_at(&A, &B, 0, 2);
        assert_eq!(child1, [10.0, 20.0, 3.0]);
        assert_eq!(child2, [1.0, 2.0, 30.0]);
    }

    #[test]
    #[should_panic(expected = "Invalid cut points")]
    fn test_crossover_rejects_reversed_cuts() {
        crossover_at(&A, &B, 2, 1);
    }

    #[test]
    fn test_cut_points_are_ordered_and_in_range() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut seen = [[false; GENE_COUNT]; GENE_COUNT];
        for _ in 0..500 {
            let (cut1, cut2) = TwoPointCrossover::cut_points(&mut rng);
            assert!(cut1 <= cut2);
            assert!(cut2 < GENE_COUNT);
            seen[cut1][cut2] = true;
        }
        // Every ordered pair below the last index is reachable
        for cut1 in 0..GENE_COUNT {
            for cut2 in cut1..GENE_COUNT {
                assert!(seen[cut1][cut2], "({}, {}) never drawn", cut1, cut2);
            }
        }
    }

    #[test]
    fn test_children_are_scored_and_conserve_genes() {
        let mut rng = StdRng::seed_from_u64(4);
        let model = DistanceToTarget::origin();
        let parent1 = Individual::evaluated(A, &model);
        let parent2 = Individual::evaluated(B, &model);

        for _ in 0..50 {
            let (child1, child2) =
                TwoPointCrossover::new().crossover(&parent1, &parent2, &model, &mut rng);
            assert_eq!(child1.fitness(), model.evaluate(child1.genes()));
            assert_eq!(child2.fitness(), model.evaluate(child2.genes()));

            for i in 0..GENE_COUNT {
                let mut pair = [child1.genes()[i], child2.genes()[i]];
                pair.sort_by(f64::total_cmp);
                assert_eq!(pair, [A[i], B[i]]);
            }
        }
    }

    #[test]
    fn test_offspring_preserves_pool_size() {
        let mut rng = StdRng::seed_from_u64(6);
        let model = DistanceToTarget::origin();
        let pool: Population = (0..8)
            .map(|i| Individual::evaluated([i as f64, -(i as f64), 0.5], &model))
            .collect();

        let offspring = TwoPointCrossover::new()
            .offspring(&pool, &model, &mut rng)
            .unwrap();
        assert_eq!(offspring.len(), pool.len());
    }
}
