//! Errors raised while validating or planning a simulation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("parameter `{0}` has no values")]
    EmptyParameter(&'static str),

    #[error("trials per scenario must be at least 1")]
    ZeroTrials,

    #[error("invalid value {value} for `{parameter}`")]
    InvalidValue { parameter: &'static str, value: u64 },

    #[error("sweep needs {planned} battles, above the limit of {limit}")]
    BattleLimitExceeded { planned: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, SimError>;
