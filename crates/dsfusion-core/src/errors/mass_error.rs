//! Mass-function construction errors.

use super::error_code::{self, FusionErrorCode};

/// Errors raised while building focal sets, mass functions, and weights.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MassError {
    #[error("focal set must contain at least one hypothesis")]
    EmptyFocalSet,

    #[error("invalid mass {mass} for focal set {focal}: must be finite and non-negative")]
    InvalidMass { focal: String, mass: f64 },

    #[error("invalid evidence weight {weight}: must be finite and positive")]
    InvalidWeight { weight: f64 },
}

impl FusionErrorCode for MassError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidWeight { .. } => error_code::INVALID_WEIGHT,
            _ => error_code::MASS_ERROR,
        }
    }
}
