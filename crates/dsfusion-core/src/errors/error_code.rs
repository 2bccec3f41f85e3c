//! FusionErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait FusionErrorCode {
    /// Returns the error code string (e.g., "CONFLICT_EXHAUSTION").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const MASS_ERROR: &str = "MASS_ERROR";
pub const INVALID_WEIGHT: &str = "INVALID_WEIGHT";
pub const CONFLICT_EXHAUSTION: &str = "CONFLICT_EXHAUSTION";
pub const MISSING_UNIVERSAL_SET: &str = "MISSING_UNIVERSAL_SET";
pub const FRAME_TOO_LARGE: &str = "FRAME_TOO_LARGE";
pub const INVALID_WINDOW: &str = "INVALID_WINDOW";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
