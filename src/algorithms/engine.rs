//! Evolution engine
//!
//! This module implements the generational (μ+λ) loop:
//! selection → recombination → mutation → replacement, repeated for a fixed
//! number of generations.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::algorithms::config::EngineConfig;
use crate::diagnostics::{EvolutionResult, EvolutionStats, GenerationStats, TimingStats};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::DistanceToTarget;
use crate::genome::bounds::SpaceBounds;
use crate::genome::Genes;
use crate::operators::crossover::TwoPointCrossover;
use crate::operators::mutation::{ResampleAxis, ResampleMutation};
use crate::operators::replacement::ElitistReplacement;
use crate::operators::selection::{TournamentSampling, TournamentSelection};
use crate::operators::traits::ReplacementStrategy;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Lifecycle of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Population sampled, no generation run yet
    Initialized,
    /// At least one generation run, more to go
    Running,
    /// All generations run (or the run was aborted by an error)
    Completed,
}

/// Best individual and statistics after one generation
#[derive(Clone, Debug)]
pub struct GenerationReport {
    /// Generation just completed (1-based)
    pub generation: usize,
    /// Best individual of the new population
    pub best: Individual,
    /// Statistics of the new population
    pub stats: GenerationStats,
}

/// Builder for EvolutionEngine
#[derive(Clone, Debug, Default)]
pub struct EvolutionEngineBuilder {
    config: EngineConfig,
}

impl EvolutionEngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn generations(mut self, generations: usize) -> Self {
        self.config.generations = generations;
        self
    }

    /// Set the per-individual mutation probability
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    /// Set the tournament size
    pub fn tournament_size(mut self, size: usize) -> Self {
        self.config.tournament_size = size;
        self
    }

    /// Set the tournament sampling mode
    pub fn tournament_sampling(mut self, sampling: TournamentSampling) -> Self {
        self.config.tournament_sampling = sampling;
        self
    }

    /// Set the search space bounds
    pub fn bounds(mut self, bounds: SpaceBounds) -> Self {
        self.config.bounds = bounds;
        self
    }

    /// Set the target point
    pub fn target(mut self, target: Genes) -> Self {
        self.config.target = target;
        self
    }

    /// Set the mutation resample axis policy
    pub fn resample_axis(mut self, axis: ResampleAxis) -> Self {
        self.config.resample_axis = axis;
        self
    }

    /// Set the seed used by [`EvolutionEngineBuilder::run_seeded`]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Validate the configuration and sample the initial population
    ///
    /// The caller's generator drives the run; the configured seed is not
    /// consulted.
    pub fn build<R: Rng>(self, rng: &mut R) -> EvoResult<EvolutionEngine> {
        EvolutionEngine::new(self.config, rng)
    }

    /// Build and run to completion with the configuration's own generator
    ///
    /// Seeded from `random_seed` when set, from OS entropy otherwise.
    pub fn run_seeded(self) -> EvoResult<EvolutionResult> {
        let mut rng = self.config.rng();
        EvolutionEngine::new(self.config, &mut rng)?.run(&mut rng)
    }
}

/// Elitist evolution engine
///
/// Owns the population for the whole run. The random generator is borrowed
/// per call so one stream can be threaded through consecutive runs.
#[derive(Clone, Debug)]
pub struct EvolutionEngine {
    config: EngineConfig,
    model: DistanceToTarget,
    selection: TournamentSelection,
    crossover: TwoPointCrossover,
    mutation: ResampleMutation,
    replacement: ElitistReplacement,
    population: Population,
    state: EngineState,
    generation: usize,
    evaluations: usize,
    stats: EvolutionStats,
}

impl EvolutionEngine {
    /// Create a builder for EvolutionEngine
    pub fn builder() -> EvolutionEngineBuilder {
        EvolutionEngineBuilder::new()
    }

    /// Validate `config` and sample the initial population
    ///
    /// With `generations == 0` the engine starts out completed.
    #[instrument(
        level = "debug",
        skip_all,
        fields(population_size = config.population_size, generations = config.generations)
    )]
    pub fn new<R: Rng>(config: EngineConfig, rng: &mut R) -> EvoResult<Self> {
        config.validate()?;

        let model = DistanceToTarget::new(config.target);
        let selection = TournamentSelection::try_new(config.tournament_size)?
            .with_sampling(config.tournament_sampling);
        let mutation = ResampleMutation::try_new(config.mutation_rate)?
            .with_axis(config.resample_axis);

        let population = Population::random(config.population_size, &config.bounds, &model, rng);
        let evaluations = population.len();

        let mut stats = EvolutionStats::new();
        stats.record(GenerationStats::from_population(&population, 0, evaluations));

        let state = if config.generations == 0 {
            EngineState::Completed
        } else {
            EngineState::Initialized
        };

        Ok(Self {
            config,
            model,
            selection,
            crossover: TwoPointCrossover::new(),
            mutation,
            replacement: ElitistReplacement::new(),
            population,
            state,
            generation: 0,
            evaluations,
            stats,
        })
    }

    /// The validated configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Generations completed so far
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness evaluations so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// The current population
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Statistics recorded so far, starting with the initial population
    pub fn stats(&self) -> &EvolutionStats {
        &self.stats
    }

    /// Best individual of the current population
    pub fn best(&self) -> EvoResult<&Individual> {
        self.population.best().ok_or(EvolutionError::EmptyPopulation)
    }

    /// Run one generation
    ///
    /// Any error aborts the run: the engine moves to
    /// [`EngineState::Completed`] and refuses further steps.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> EvoResult<GenerationReport> {
        if self.state == EngineState::Completed {
            return Err(EvolutionError::EngineCompleted(self.generation));
        }

        match self.advance(rng) {
            Ok(report) => {
                self.state = if self.generation >= self.config.generations {
                    EngineState::Completed
                } else {
                    EngineState::Running
                };
                Ok(report)
            }
            Err(err) => {
                self.state = EngineState::Completed;
                Err(err)
            }
        }
    }

    /// Run every remaining generation
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> EvoResult<EvolutionResult> {
        self.run_with_observer(rng, |_| {})
    }

    /// Run every remaining generation, reporting each one to `observer`
    pub fn run_with_observer<R, O>(
        &mut self,
        rng: &mut R,
        mut observer: O,
    ) -> EvoResult<EvolutionResult>
    where
        R: Rng,
        O: FnMut(&GenerationReport),
    {
        let start_time = Instant::now();
        while self.state != EngineState::Completed {
            let report = self.step(rng)?;
            observer(&report);
        }
        self.stats.set_runtime(start_time.elapsed());
        self.result()
    }

    /// Snapshot of the current population and statistics
    pub fn result(&self) -> EvoResult<EvolutionResult> {
        Ok(EvolutionResult {
            population: self.population.clone(),
            best: self.best()?.clone(),
            generations: self.generation,
            evaluations: self.evaluations,
            stats: self.stats.clone(),
        })
    }

    fn advance<R: Rng>(&mut self, rng: &mut R) -> EvoResult<GenerationReport> {
        let gen_start = Instant::now();

        let sel_start = Instant::now();
        let mating_pool = self.selection.select_pool(&self.population, rng)?;
        self.check_size("selection", &mating_pool)?;
        let selection_time = sel_start.elapsed();

        let cross_start = Instant::now();
        let mut offspring = self.crossover.offspring(&mating_pool, &self.model, rng)?;
        self.check_size("recombination", &offspring)?;
        let crossover_time = cross_start.elapsed();

        let mut_start = Instant::now();
        let mutations = self
            .mutation
            .apply(&mut offspring, &self.config.bounds, &self.model, rng);
        self.check_size("mutation", &offspring)?;
        let mutation_time = mut_start.elapsed();

        self.evaluations += offspring.len() + mutations;

        let rep_start = Instant::now();
        // An aborted step leaves the last valid population in place.
        let mut next = self.replacement.replace(self.population.clone(), offspring);
        self.check_size("replacement", &next)?;
        let replacement_time = rep_start.elapsed();

        self.generation += 1;
        next.set_generation(self.generation);
        self.population = next;

        let timing = TimingStats::new()
            .with_selection(selection_time)
            .with_crossover(crossover_time)
            .with_mutation(mutation_time)
            .with_replacement(replacement_time)
            .with_total(gen_start.elapsed());
        let stats =
            GenerationStats::from_population(&self.population, self.generation, self.evaluations)
                .with_mutations(mutations)
                .with_timing(timing);
        self.stats.record(stats.clone());

        let best = self.best()?.clone();
        tracing::debug!(
            generation = self.generation,
            best_distance = best.fitness(),
            mutations,
            "Generation complete"
        );

        Ok(GenerationReport {
            generation: self.generation,
            best,
            stats,
        })
    }

    fn check_size(&self, stage: &'static str, population: &Population) -> EvoResult<()> {
        if population.len() != self.config.population_size {
            tracing::error!(
                stage,
                expected = self.config.population_size,
                actual = population.len(),
                "Population size drifted"
            );
            return Err(EvolutionError::InvariantViolation {
                stage,
                expected: self.config.population_size,
                actual: population.len(),
            });
        }
        Ok(())
    }
}
