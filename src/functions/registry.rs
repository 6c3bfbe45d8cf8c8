use super::primitives::{FunctionGroup, FunctionId};
use crate::config::cgp::FunctionSetConfig;
use crate::error::{CgpError, Result};
use crate::types::MAX_FUNCTION_ARITY;
use rand::Rng;

/// Immutable table of the functions a population may use
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCatalog {
    functions: Vec<FunctionId>,
}

impl FunctionCatalog {
    pub fn new(functions: Vec<FunctionId>) -> Result<Self> {
        let mut functions = functions;
        functions.sort();
        functions.dedup();

        if functions.is_empty() {
            return Err(CgpError::Configuration(
                "Function catalog cannot be empty".to_string(),
            ));
        }
        if let Some(f) = functions.iter().find(|f| f.arity() > MAX_FUNCTION_ARITY) {
            return Err(CgpError::Configuration(format!(
                "Function {:?} has arity {} above the maximum of {}",
                f,
                f.arity(),
                MAX_FUNCTION_ARITY
            )));
        }

        Ok(Self { functions })
    }

    pub fn from_config(config: &FunctionSetConfig) -> Result<Self> {
        Self::from_groups(&config.enabled_groups())
    }

    pub fn from_groups(groups: &[FunctionGroup]) -> Result<Self> {
        Self::new(
            FunctionId::ALL
                .into_iter()
                .filter(|f| groups.contains(&f.group()))
                .collect(),
        )
    }

    pub fn functions(&self) -> &[FunctionId] {
        &self.functions
    }

    pub fn contains(&self, function: FunctionId) -> bool {
        self.functions.binary_search(&function).is_ok()
    }

    pub fn arity(&self, function: FunctionId) -> Result<usize> {
        if self.contains(function) {
            Ok(function.arity())
        } else {
            Err(CgpError::UnknownFunction(function))
        }
    }

    /// Uniform draw over the catalog
    pub fn random_function<R: Rng>(&self, rng: &mut R) -> FunctionId {
        self.functions[rng.gen_range(0..self.functions.len())]
    }

    pub fn evaluate(&self, function: FunctionId, args: &[f32], constant: f32) -> Result<f32> {
        let arity = self.arity(function)?;
        if args.len() < arity {
            return Err(CgpError::Evaluation(format!(
                "{:?} expects {} args, got {}",
                function,
                arity,
                args.len()
            )));
        }
        Ok(function.execute(args, constant))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionCatalog {
    fn default() -> Self {
        Self {
            functions: FunctionId::ALL.to_vec(),
        }
    }
}
