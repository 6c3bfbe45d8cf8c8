pub mod brain;
pub mod domain;

pub use brain::Brain;
pub use domain::Domain;
