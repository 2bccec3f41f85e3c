//! Error handling for dsfusion.
//! One error enum per subsystem, `thiserror` only.

pub mod combination_error;
pub mod config_error;
pub mod error_code;
pub mod fusion_error;
pub mod mass_error;

pub use combination_error::CombinationError;
pub use config_error::ConfigError;
pub use error_code::FusionErrorCode;
pub use fusion_error::{FusionError, FusionResult};
pub use mass_error::MassError;
