use crate::functions::primitives::FunctionId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CgpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Function {0:?} is not part of the function catalog")]
    UnknownFunction(FunctionId),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Genotypes belong to different population layouts")]
    LayoutMismatch,

    #[error("Load error at `{field}`: {reason}")]
    Load { field: String, reason: String },

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CgpError>;
