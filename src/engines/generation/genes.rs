use crate::functions::primitives::FunctionId;
use crate::types::{IndexType, MAX_FUNCTION_ARITY};
use serde::{Deserialize, Serialize};

/// One graph node: a function plus its upstream connections.
///
/// Only the first `function.arity()` connections are read during evaluation. The
/// remaining slots are kept in range and persisted as-is, so a later function
/// mutation to a wider arity picks up an already-legal connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionGene {
    pub function: FunctionId,
    pub connections: [IndexType; MAX_FUNCTION_ARITY],
}

impl FunctionGene {
    /// The connections the function actually reads
    pub fn used_connections(&self) -> &[IndexType] {
        &self.connections[..self.function.arity()]
    }
}

/// Selects the node feeding one brain output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputGene {
    pub connection: IndexType,
}
