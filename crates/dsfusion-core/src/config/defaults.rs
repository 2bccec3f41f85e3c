// Single source of truth for all default values.

// --- Rule selection ---
pub const DEFAULT_RULE: &str = "DEMPSTER_SHAFER";

// --- Accumulation ---
pub const DEFAULT_MAX_RETAINED: Option<usize> = None;
pub const DEFAULT_INPUT_WEIGHT: f64 = 0.0; // 0.0 = unweighted

// --- Yager ---
pub const DEFAULT_STRICT_UNIVERSAL_SET: bool = false;

// --- Zhang ---
pub const DEFAULT_MAX_POWERSET_HYPOTHESES: usize = 16;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "dsfusion=info";
