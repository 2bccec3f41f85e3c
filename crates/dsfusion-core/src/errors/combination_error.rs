//! Combination-rule errors.

use super::error_code::{self, FusionErrorCode};

/// Errors raised by the combination rules themselves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CombinationError {
    /// Every pair of focal sets conflicted; the normalizer summed to zero.
    #[error("total conflict: normalizer summed to {total}, no combined mass remains")]
    ConflictExhaustion { total: f64 },

    /// Yager leftover mass had no universal focal set to land on.
    #[error("no tracked focal set covers the frame; {leftover} of unassigned mass would be lost")]
    MissingUniversalSet { leftover: f64 },

    #[error("frame of {hypotheses} hypotheses exceeds the power-set limit of {max}")]
    FrameTooLarge { hypotheses: usize, max: usize },

    #[error("invalid window bound {max_retained}: must retain at least one evidence")]
    InvalidWindow { max_retained: usize },
}

impl FusionErrorCode for CombinationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConflictExhaustion { .. } => error_code::CONFLICT_EXHAUSTION,
            Self::MissingUniversalSet { .. } => error_code::MISSING_UNIVERSAL_SET,
            Self::FrameTooLarge { .. } => error_code::FRAME_TOO_LARGE,
            Self::InvalidWindow { .. } => error_code::INVALID_WINDOW,
        }
    }
}
