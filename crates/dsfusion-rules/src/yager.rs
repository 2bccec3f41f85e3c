//! Yager's rule: conflict is moved to ignorance instead of normalized away.
//!
//! The universal set has to be one of the tracked focal sets. It is found as
//! the tracked focal set with the most hypotheses, so at least one input must
//! carry it explicitly, even at zero mass.

use dsfusion_core::constants::CONFLICT_EPSILON;
use dsfusion_core::errors::{CombinationError, FusionResult};
use dsfusion_core::models::ConjunctiveState;
use dsfusion_core::traits::ICombinationRule;
use dsfusion_core::{EvidenceBatch, EvidenceWeights, MassFunction};
use tracing::{debug, instrument, warn};

use crate::sequential;

/// Pairwise Yager combination.
///
/// A product is kept when one focal set is contained in the other and is
/// assigned to the smaller of the two. Everything else is conflict, and
/// `1 − Σ assigned` goes to the largest tracked focal set.
///
/// When that set does not cover every hypothesis the inputs mention, the
/// leftover lands on something other than the universal set. With `strict`
/// this fails with `MissingUniversalSet`; otherwise it is logged and the
/// allocation goes ahead.
pub fn combine(
    a: &MassFunction,
    b: &MassFunction,
    strict: bool,
) -> Result<MassFunction, CombinationError> {
    let mut result = MassFunction::zeroed(a.focal_sets().chain(b.focal_sets()));

    for (focal_a, mass_a) in a {
        for (focal_b, mass_b) in b {
            let product = mass_a * mass_b;
            let target = if focal_a.is_subset_of(focal_b) {
                focal_a
            } else if focal_b.is_subset_of(focal_a) {
                focal_b
            } else {
                continue;
            };
            if let Some(slot) = result.get_mut(target) {
                *slot += product;
            }
        }
    }

    let leftover = 1.0 - result.total();
    debug!(leftover, "yager pairwise combination");
    if leftover <= 0.0 {
        return Ok(result);
    }

    let mut frame = a.hypotheses();
    frame.extend(b.hypotheses());
    let Some(universal) = result.largest_focal_set().cloned() else {
        return Ok(result);
    };

    if universal.len() < frame.len() {
        if strict && leftover > CONFLICT_EPSILON {
            return Err(CombinationError::MissingUniversalSet { leftover });
        }
        warn!(
            leftover,
            receiver = %universal,
            frame = frame.len(),
            "no tracked focal set covers the frame; conflict assigned to the largest one"
        );
    }

    if let Some(slot) = result.get_mut(&universal) {
        *slot += leftover;
    }
    Ok(result)
}

/// Yager's rule with no retained history.
#[derive(Debug, Clone, Copy, Default)]
pub struct YagerRule {
    strict_universal_set: bool,
}

impl YagerRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail instead of warning when the universal set is not tracked.
    pub fn strict() -> Self {
        Self {
            strict_universal_set: true,
        }
    }

    pub fn with_strict_universal_set(strict_universal_set: bool) -> Self {
        Self {
            strict_universal_set,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_universal_set
    }
}

impl ICombinationRule for YagerRule {
    type State = ConjunctiveState;

    #[instrument(skip_all, fields(batch = batch.len(), strict = self.strict_universal_set))]
    fn combine_new_evidence(
        &self,
        batch: &EvidenceBatch,
        prior: Option<ConjunctiveState>,
        _weights: Option<&EvidenceWeights>,
    ) -> FusionResult<ConjunctiveState> {
        let strict = self.strict_universal_set;
        sequential::fold_batch(batch, prior, &|a, b| Ok(combine(a, b, strict)?))
    }

    fn combine_windowed(
        &self,
        batch: &EvidenceBatch,
        max_retained: Option<usize>,
        prior: Option<ConjunctiveState>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<ConjunctiveState> {
        let prior = sequential::clamp_counter(prior, batch.len(), max_retained)?;
        self.combine_new_evidence(batch, prior, weights)
    }

    fn combine_two_states(
        &self,
        a: ConjunctiveState,
        b: ConjunctiveState,
        max_retained: Option<usize>,
    ) -> FusionResult<ConjunctiveState> {
        let strict = self.strict_universal_set;
        sequential::merge_states(a, b, max_retained, &|x, y| Ok(combine(x, y, strict)?))
    }

    fn final_probabilities(&self, state: &ConjunctiveState) -> Option<MassFunction> {
        (!state.is_empty()).then(|| state.combined.clone())
    }
}
