use serde::{Deserialize, Serialize};

use crate::mass::MassFunction;

/// State of the sequential rules (Dempster, Yager).
///
/// These rules are associative, so the running `combined` result is all
/// the history they need. `number_of_evidences` is a display counter only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConjunctiveState {
    pub combined: MassFunction,
    pub number_of_evidences: usize,
    pub last_evidence: MassFunction,
}

impl ConjunctiveState {
    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }
}
