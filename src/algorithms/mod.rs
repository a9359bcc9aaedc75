//! Evolutionary algorithms
//!
//! This module provides the engine configuration and the generational loop.

pub mod config;
pub mod engine;

pub mod prelude {
    pub use super::config::*;
    pub use super::engine::*;
}
