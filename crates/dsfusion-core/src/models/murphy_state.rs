use serde::{Deserialize, Serialize};

use crate::mass::MassFunction;

/// Murphy accumulator: a weighted running average of every evidence seen,
/// plus the finalized self-combination of that average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MurphyState {
    /// Weighted running average of all folded evidence.
    pub evidence: MassFunction,
    /// Cumulative weight behind `evidence`.
    pub evidence_weight: f64,
    /// Evidence count driving the number of self-combinations.
    pub number_of_evidences: usize,
    /// `evidence` combined with itself `number_of_evidences - 1` times.
    pub combined: MassFunction,
    pub last_evidence: MassFunction,
}
