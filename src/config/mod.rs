pub mod traits;
pub mod cgp;
pub mod evolution;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use cgp::{
    CgpConfig, FixedCountMutation, FunctionSetConfig, MutationVariant, ProbabilisticMutation,
};
pub use evolution::EvolutionConfig;
pub use traits::ConfigSection;
