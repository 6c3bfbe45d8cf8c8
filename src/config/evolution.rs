use super::traits::{validate_chance, ConfigSection};
use crate::error::CgpError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    /// Individuals carried unchanged into the next generation
    pub elite_count: usize,
    /// Fraction of offspring produced by inheritance rather than cloning
    pub crossover_rate: f32,
    /// Probability of taking a gene from the first parent during inheritance
    pub inherit_preference: f32,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 50,
            elite_count: 5,
            crossover_rate: 0.5,
            inherit_preference: 0.5,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CgpError> {
        if self.population_size == 0 {
            return Err(CgpError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.elite_count > self.population_size {
            return Err(CgpError::Configuration(
                "Elite count cannot exceed population size".to_string(),
            ));
        }
        validate_chance("crossover_rate", self.crossover_rate)?;
        validate_chance("inherit_preference", self.inherit_preference)?;
        Ok(())
    }
}
