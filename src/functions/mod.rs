pub mod primitives;
pub mod registry;

pub use primitives::{FunctionGroup, FunctionId};
pub use registry::FunctionCatalog;
