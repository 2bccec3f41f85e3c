use crate::errors::FusionResult;
use crate::evidence::{EvidenceBatch, EvidenceWeights};
use crate::mass::MassFunction;

/// The capability set every combination rule provides.
///
/// State is passed by value: a call consumes the prior state and returns the
/// new one, so callers can never observe a half-updated accumulator.
pub trait ICombinationRule {
    type State: Clone + Default;

    /// Fold one batch of new evidence into `prior` (or a fresh state).
    fn combine_new_evidence(
        &self,
        batch: &EvidenceBatch,
        prior: Option<Self::State>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<Self::State>;

    /// As [`combine_new_evidence`](Self::combine_new_evidence), bounded to
    /// `max_retained` evidence items.
    fn combine_windowed(
        &self,
        batch: &EvidenceBatch,
        max_retained: Option<usize>,
        prior: Option<Self::State>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<Self::State>;

    /// Merge two independently maintained accumulators.
    fn combine_two_states(
        &self,
        a: Self::State,
        b: Self::State,
        max_retained: Option<usize>,
    ) -> FusionResult<Self::State>;

    /// The presentable distribution, or `None` when nothing has been folded.
    fn final_probabilities(&self, state: &Self::State) -> Option<MassFunction>;
}
