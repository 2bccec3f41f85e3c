use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EVIDENCE_WEIGHT;
use crate::mass::MassFunction;

/// One retained evidence record with its explicit reliability weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEvidence {
    pub mass: MassFunction,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_EVIDENCE_WEIGHT
}

/// Zhang accumulator.
///
/// Credibility is a function of every retained record, so the full history
/// is kept (oldest first; the index is the record's position).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZhangState {
    pub evidence: Vec<WeightedEvidence>,
    /// Reformed mass combined with itself `evidence.len() - 1` times.
    pub combined: MassFunction,
    pub last_evidence: MassFunction,
    /// Normalized credibility per retained record from the last recompute.
    pub credibility: Vec<f64>,
}

impl ZhangState {
    pub fn number_of_evidences(&self) -> usize {
        self.evidence.len()
    }
}
