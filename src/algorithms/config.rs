//! Engine configuration
//!
//! Every parameter of a run lives here, validated once before the first
//! generation.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EvolutionError};
use crate::genome::bounds::SpaceBounds;
use crate::genome::{Genes, GENE_COUNT};
use crate::operators::mutation::ResampleAxis;
use crate::operators::selection::TournamentSampling;

/// Configuration for the evolution engine
///
/// Missing fields in a JSON file fall back to [`EngineConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Population size (even, > 0)
    pub population_size: usize,
    /// Number of generations to run
    pub generations: usize,
    /// Per-individual mutation probability
    pub mutation_rate: f64,
    /// Contestants per tournament, in `[1, population_size]`
    pub tournament_size: usize,
    /// Tournament contestant sampling
    pub tournament_sampling: TournamentSampling,
    /// Search volume
    pub bounds: SpaceBounds,
    /// Point the population is driven towards
    pub target: Genes,
    /// Interval used when resampling a mutated gene
    pub resample_axis: ResampleAxis,
    /// Seed for the run's generator; `None` seeds from OS entropy
    pub random_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_rate: 0.1,
            tournament_size: 5,
            tournament_sampling: TournamentSampling::default(),
            bounds: SpaceBounds::default(),
            target: [0.0; GENE_COUNT],
            resample_axis: ResampleAxis::default(),
            random_seed: None,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Check every parameter
    ///
    /// Returns the first problem found as [`EvolutionError::Configuration`].
    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(configuration("population size must be greater than 0"));
        }
        if self.population_size % 2 != 0 {
            return Err(configuration(format!(
                "population size must be even for pairwise crossover, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(configuration(format!(
                "mutation rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(configuration(format!(
                "tournament size must be in [1, {}], got {}",
                self.population_size, self.tournament_size
            )));
        }
        for (axis, bound) in ["x", "y", "z"].iter().zip(self.bounds.iter()) {
            if !bound.is_valid() {
                return Err(configuration(format!(
                    "{} bounds must be finite with min <= max and a finite width, got [{}, {}]",
                    axis, bound.min, bound.max
                )));
            }
        }
        if self.target.iter().any(|t| !t.is_finite()) {
            return Err(configuration(format!(
                "target must be finite, got {:?}",
                self.target
            )));
        }
        Ok(())
    }

    /// Build the run's generator from the configured seed
    pub fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn configuration(message: impl Into<String>) -> EvolutionError {
    EvolutionError::Configuration(message.into())
}
