//! Population export
//!
//! This module writes a final population as a table of points and their
//! distances to the target.

pub mod csv;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ExportError;
use crate::population::population::Population;

/// Column headers of an exported table
pub const EXPORT_HEADERS: [&str; 4] = ["X", "Y", "Z", "Distance"];

/// Sink for a finished population
pub trait PopulationExporter {
    /// Write `population` to `path`, replacing any existing file
    fn export_to_path(&self, population: &Population, path: &Path) -> Result<(), ExportError>;

    /// Extension (without the dot) of files written by this exporter
    fn extension(&self) -> &'static str;
}

/// File name for the population of one iteration of one run
///
/// `Run_{run}_Iteration_{iteration}_EvolutionaryAlgorithmPoints_{yyyyMMddHHmmss}.{ext}`
pub fn export_file_name(
    run: usize,
    iteration: usize,
    timestamp: DateTime<Local>,
    extension: &str,
) -> String {
    format!(
        "Run_{}_Iteration_{}_EvolutionaryAlgorithmPoints_{}.{}",
        run,
        iteration,
        timestamp.format("%Y%m%d%H%M%S"),
        extension
    )
}

/// Full export path inside `dir`, stamped with the current local time
pub fn export_path(dir: &Path, run: usize, iteration: usize, extension: &str) -> PathBuf {
    dir.join(export_file_name(run, iteration, Local::now(), extension))
}

pub mod prelude {
    pub use super::csv::CsvExporter;
    pub use super::{export_file_name, export_path, PopulationExporter, EXPORT_HEADERS};
}
