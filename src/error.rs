//! Error types for evo3d
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// Selection operation failed
    #[error("Selection failed: {0}")]
    SelectionFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Error type for loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error type for writing a population to a tabular sink
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error while creating or writing the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration, detected before the first generation
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Configuration file could not be loaded
    #[error("Config error: {0}")]
    ConfigFile(#[from] ConfigError),

    /// A stage produced a population of the wrong size
    #[error("Invariant violation after {stage}: expected {expected} individuals, got {actual}")]
    InvariantViolation {
        /// Stage that broke the invariant
        stage: &'static str,
        /// Configured population size
        expected: usize,
        /// Observed population size
        actual: usize,
    },

    /// Step requested on an engine that already finished
    #[error("Engine already completed {0} generations")]
    EngineCompleted(usize),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Export error
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
