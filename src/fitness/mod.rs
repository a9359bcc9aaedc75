//! Fitness evaluation
//!
//! This module provides the fitness abstraction and the distance-to-target model.

pub mod traits;

pub mod prelude {
    pub use super::traits::*;
}
