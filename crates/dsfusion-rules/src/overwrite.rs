//! Last-writer-wins baseline: the state is the newest evidence, unblended.

use dsfusion_core::errors::FusionResult;
use dsfusion_core::traits::ICombinationRule;
use dsfusion_core::{EvidenceBatch, EvidenceWeights, MassFunction};
use tracing::debug;

use crate::sequential;

#[derive(Debug, Clone, Copy, Default)]
pub struct OverwriteRule;

impl OverwriteRule {
    pub fn new() -> Self {
        Self
    }
}

impl ICombinationRule for OverwriteRule {
    type State = MassFunction;

    /// Keeps the item with the greatest key. An empty batch leaves `prior`
    /// in place.
    fn combine_new_evidence(
        &self,
        batch: &EvidenceBatch,
        prior: Option<MassFunction>,
        _weights: Option<&EvidenceWeights>,
    ) -> FusionResult<MassFunction> {
        match batch.newest() {
            Some((key, mass)) => {
                debug!(key = %key, "overwrite with newest evidence");
                Ok(mass.clone())
            }
            None => Ok(prior.unwrap_or_default()),
        }
    }

    fn combine_windowed(
        &self,
        batch: &EvidenceBatch,
        max_retained: Option<usize>,
        prior: Option<MassFunction>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<MassFunction> {
        if let Some(max) = max_retained {
            sequential::check_window(max)?;
        }
        self.combine_new_evidence(batch, prior, weights)
    }

    fn combine_two_states(
        &self,
        a: MassFunction,
        b: MassFunction,
        max_retained: Option<usize>,
    ) -> FusionResult<MassFunction> {
        if let Some(max) = max_retained {
            sequential::check_window(max)?;
        }
        Ok(if b.is_empty() { a } else { b })
    }

    fn final_probabilities(&self, state: &MassFunction) -> Option<MassFunction> {
        (!state.is_empty()).then(|| state.clone())
    }
}
