//! Genome representation
//!
//! A genome is a point in 3-D space: one real-valued gene per axis.

pub mod bounds;

/// Number of genes per individual (one per spatial axis)
pub const GENE_COUNT: usize = 3;

/// Gene vector of an individual
pub type Genes = [f64; GENE_COUNT];

pub mod prelude {
    pub use super::bounds::*;
    pub use super::{Genes, GENE_COUNT};
}
