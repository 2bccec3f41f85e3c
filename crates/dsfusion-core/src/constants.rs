/// dsfusion version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A uniform input weight at or below this is treated as "no weighting".
pub const ZERO_WEIGHT_DELTA: f64 = 1e-4;

/// Tolerance for "sums to one" checks on finalized distributions.
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

/// A normalizer at or below this is treated as total conflict.
pub const CONFLICT_EPSILON: f64 = 1e-12;

/// Reserved hypothesis carrying open-world (null-set) belief.
///
/// The pignistic transform divides by `1 - m({zero})` when a record assigns
/// mass to this singleton.
pub const OPEN_WORLD_HYPOTHESIS: &str = "zero";

/// Weight applied to an evidence item when none is supplied.
pub const DEFAULT_EVIDENCE_WEIGHT: f64 = 1.0;

/// Hard ceiling on frame size for power-set enumeration (2^n - 1 subsets).
pub const MAX_POWERSET_HYPOTHESES: usize = 20;
