pub mod genes;
pub mod layout;
pub mod genotype;
pub mod operators;
pub mod population;

pub use genes::{FunctionGene, OutputGene};
pub use genotype::Genotype;
pub use layout::CgpLayout;
pub use operators::{fixed_count_mutation, inherit, mutate, probabilistic_mutation};
pub use population::{Individual, Population};
