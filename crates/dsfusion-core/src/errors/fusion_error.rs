//! Top-level error type aggregating every subsystem error.

use super::error_code::{self, FusionErrorCode};
use super::{CombinationError, ConfigError, MassError};

/// Errors surfaced by the fusion engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FusionError {
    /// Unknown rule selector, mismatched state, or otherwise unusable input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("mass error: {0}")]
    Mass(#[from] MassError),

    #[error("combination error: {0}")]
    Combination(#[from] CombinationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FusionErrorCode for FusionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => error_code::INVALID_ARGUMENT,
            Self::Mass(e) => e.error_code(),
            Self::Combination(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type FusionResult<T> = Result<T, FusionError>;
