//! Cartesian Genetic Programming genotypes: layered function graphs that are
//! seeded, mutated and recombined under a levels-back connectivity rule, then grown
//! into executable brains scored by an external domain.

pub mod config;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use config::{AppConfig, CgpConfig, ConfigManager, MutationVariant};
pub use engines::evaluation::{Brain, Domain};
pub use engines::generation::{
    inherit, mutate, CgpLayout, FunctionGene, Genotype, Individual, OutputGene, Population,
};
pub use error::{CgpError, Result};
pub use functions::{FunctionCatalog, FunctionId};
