//! # evo3d
//!
//! An elitist evolutionary optimizer that drives a population of points in
//! 3-D space towards a target.
//!
//! Each generation runs tournament selection, two-point crossover and
//! single-gene resample mutation, then keeps the best individuals of the
//! combined parents and offspring. The best distance to the target never
//! increases from one generation to the next.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evo3d::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let result = EvolutionEngine::builder()
//!     .population_size(100)
//!     .generations(100)
//!     .mutation_rate(0.1)
//!     .tournament_size(5)
//!     .build(&mut rng)?
//!     .run(&mut rng)?;
//!
//! println!("best distance: {}", result.best_fitness());
//! # Ok::<(), EvolutionError>(())
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::export::prelude::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
