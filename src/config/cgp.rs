use super::traits::{validate_chance, ConfigSection};
use crate::error::CgpError;
use crate::functions::primitives::FunctionGroup;
use serde::{Deserialize, Serialize};

/// Graph layout and variation settings shared by every genotype of a population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CgpConfig {
    /// Function genes per layer
    pub rows: usize,
    /// Number of layers
    pub columns: usize,
    /// How many preceding layers a node may connect to
    pub levels_back: usize,
    /// Restrict output genes to the final layer's levels-back window
    pub outputs_use_levels_back: bool,
    /// Constants are seeded and kept in `[-range, +range]`
    pub evolvable_constants_range: f32,
    /// Standard deviation of the noise added when a constant mutates
    pub evolvable_constants_std_dev: f32,
    pub mutation: MutationVariant,
    pub functions: FunctionSetConfig,
}

impl Default for CgpConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 8,
            levels_back: 2,
            outputs_use_levels_back: true,
            evolvable_constants_range: 1.0,
            evolvable_constants_std_dev: 0.1,
            mutation: MutationVariant::default(),
            functions: FunctionSetConfig::default(),
        }
    }
}

impl ConfigSection for CgpConfig {
    fn section_name() -> &'static str {
        "cgp"
    }

    fn validate(&self) -> Result<(), CgpError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(CgpError::Configuration(
                "Graph needs at least one row and one column".to_string(),
            ));
        }
        if self.levels_back == 0 {
            return Err(CgpError::Configuration(
                "levels_back must be at least 1".to_string(),
            ));
        }
        if !self.evolvable_constants_range.is_finite() || self.evolvable_constants_range < 0.0 {
            return Err(CgpError::Configuration(
                "evolvable_constants_range must be a non-negative number".to_string(),
            ));
        }
        if !self.evolvable_constants_std_dev.is_finite() || self.evolvable_constants_std_dev < 0.0 {
            return Err(CgpError::Configuration(
                "evolvable_constants_std_dev must be a non-negative number".to_string(),
            ));
        }
        self.mutation.validate()?;
        if self.functions.enabled_groups().is_empty() {
            return Err(CgpError::Configuration(
                "At least one function group must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which function groups make up the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionSetConfig {
    pub basic_constants: bool,
    pub evolvable_constants: bool,
    pub arithmetic: bool,
    pub transcendental: bool,
    pub comparisons: bool,
    pub logic_gates: bool,
}

impl Default for FunctionSetConfig {
    fn default() -> Self {
        Self {
            basic_constants: true,
            evolvable_constants: true,
            arithmetic: true,
            transcendental: false,
            comparisons: false,
            logic_gates: false,
        }
    }
}

impl FunctionSetConfig {
    pub fn enabled_groups(&self) -> Vec<FunctionGroup> {
        [
            (self.basic_constants, FunctionGroup::BasicConstants),
            (self.evolvable_constants, FunctionGroup::EvolvableConstants),
            (self.arithmetic, FunctionGroup::Arithmetic),
            (self.transcendental, FunctionGroup::Transcendental),
            (self.comparisons, FunctionGroup::Comparisons),
            (self.logic_gates, FunctionGroup::LogicGates),
        ]
        .into_iter()
        .filter_map(|(enabled, group)| enabled.then_some(group))
        .collect()
    }
}

/// Mutation strategy, tagged by `strategy` in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MutationVariant {
    FixedCount(FixedCountMutation),
    Probabilistic(ProbabilisticMutation),
}

impl Default for MutationVariant {
    fn default() -> Self {
        MutationVariant::FixedCount(FixedCountMutation::default())
    }
}

impl MutationVariant {
    pub fn validate(&self) -> Result<(), CgpError> {
        match self {
            MutationVariant::FixedCount(_) => Ok(()),
            MutationVariant::Probabilistic(config) => config.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCountMutation {
    /// Number of mutations per genotype
    pub mutation_count: usize,
}

impl Default for FixedCountMutation {
    fn default() -> Self {
        Self { mutation_count: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbabilisticMutation {
    pub connection_mutation_chance: f32,
    pub function_mutation_chance: f32,
    pub output_mutation_chance: f32,
    pub constant_mutation_chance: f32,
}

impl Default for ProbabilisticMutation {
    fn default() -> Self {
        Self {
            connection_mutation_chance: 0.05,
            function_mutation_chance: 0.05,
            output_mutation_chance: 0.1,
            constant_mutation_chance: 0.1,
        }
    }
}

impl ProbabilisticMutation {
    pub fn validate(&self) -> Result<(), CgpError> {
        validate_chance("connection_mutation_chance", self.connection_mutation_chance)?;
        validate_chance("function_mutation_chance", self.function_mutation_chance)?;
        validate_chance("output_mutation_chance", self.output_mutation_chance)?;
        validate_chance("constant_mutation_chance", self.constant_mutation_chance)?;
        Ok(())
    }
}
