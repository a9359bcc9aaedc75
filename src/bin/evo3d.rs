//! evo3d - run the 3-D evolutionary optimizer from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evo3d::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "evo3d")]
#[command(about = "Evolve a population of 3-D points towards a target", long_about = None)]
struct Cli {
    /// Number of independent runs
    #[arg(long, default_value = "1")]
    runs: usize,

    /// Iterations (fresh engines) per run
    #[arg(long, default_value = "1")]
    iterations: usize,

    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Population size (must be even)
    #[arg(long)]
    population_size: Option<usize>,

    /// Generations per iteration
    #[arg(long)]
    generations: Option<usize>,

    /// Per-individual mutation probability
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Contestants per tournament
    #[arg(long)]
    tournament_size: Option<usize>,

    /// Seed for the generator shared by every run
    #[arg(long)]
    seed: Option<u64>,

    /// Resample every mutated gene from the X interval
    #[arg(long)]
    legacy_mutation_bounds: bool,

    /// Directory for exported populations
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing population files
    #[arg(long)]
    no_export: bool,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(size) = self.population_size {
            config.population_size = size;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if let Some(size) = self.tournament_size {
            config.tournament_size = size;
        }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }
        if self.legacy_mutation_bounds {
            config.resample_axis = ResampleAxis::FirstAxis;
        }

        if let Err(err) = config.validate() {
            warn!("Rejected configuration: {}", err);
            return Err(err.into());
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.engine_config()?;
    let exporter = CsvExporter::new();
    if !cli.no_export {
        std::fs::create_dir_all(&cli.output_dir)
            .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;
    }

    // One stream for the whole session: consecutive runs differ even when seeded.
    let mut rng = config.rng();

    for run in 1..=cli.runs {
        info!("Run {}:", run);

        for iteration in 1..=cli.iterations {
            let mut engine = EvolutionEngine::new(config.clone(), &mut rng)?;
            let result = engine.run_with_observer(&mut rng, |report| {
                info!(
                    "Generation {}, Best Distance: {}",
                    report.generation,
                    report.best.fitness()
                );
            })?;

            info!(
                run,
                iteration,
                evaluations = result.evaluations,
                "Iteration finished, best distance {}",
                result.best_fitness()
            );
            debug!("{}", result.stats.summary());

            if !cli.no_export {
                let path = export_path(&cli.output_dir, run, iteration, exporter.extension());
                exporter
                    .export_to_path(&result.population, &path)
                    .with_context(|| format!("failed to export {}", path.display()))?;
                info!("Exported population to {}", path.display());
            }
        }

        info!("{}", "-".repeat(40));
    }

    info!("All runs completed.");
    Ok(())
}
