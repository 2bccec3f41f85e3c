//! Dempster's rule of combination.
//!
//! ```text
//! m(C) = Σ_{A∩B=C} m1(A)·m2(B) / Σ_{A∩B≠∅, tracked} m1(A)·m2(B)
//! ```
//!
//! Combination is closed-world over the focal sets the two inputs already
//! track: mass landing on an untracked intersection is discarded before
//! normalization, the same as mass landing on the empty set.

use dsfusion_core::errors::{CombinationError, FusionResult};
use dsfusion_core::models::ConjunctiveState;
use dsfusion_core::traits::ICombinationRule;
use dsfusion_core::{EvidenceBatch, EvidenceWeights, MassFunction};
use tracing::{debug, instrument, warn};

use crate::sequential;

/// Pairwise Dempster combination of `a` and `b`.
///
/// Fails with `ConflictExhaustion` when every product lands on the empty set
/// or on an untracked intersection.
pub fn combine(a: &MassFunction, b: &MassFunction) -> Result<MassFunction, CombinationError> {
    let mut result = MassFunction::zeroed(a.focal_sets().chain(b.focal_sets()));
    let mut conflict = 0.0;
    let mut untracked = 0.0;

    for (focal_a, mass_a) in a {
        for (focal_b, mass_b) in b {
            let product = mass_a * mass_b;
            match focal_a.intersect(focal_b) {
                Some(common) => match result.get_mut(&common) {
                    Some(slot) => *slot += product,
                    None => untracked += product,
                },
                None => conflict += product,
            }
        }
    }

    if untracked > 0.0 {
        warn!(
            untracked,
            tracked = result.len(),
            "intersection mass outside the tracked focal sets was discarded"
        );
    }
    debug!(conflict, untracked, "dempster pairwise combination");

    result.normalized()
}

/// Dempster's rule with no retained history.
///
/// Weights are accepted for interface uniformity and ignored: every input
/// counts equally.
#[derive(Debug, Clone, Copy, Default)]
pub struct DempsterRule;

impl DempsterRule {
    pub fn new() -> Self {
        Self
    }

    fn pair(a: &MassFunction, b: &MassFunction) -> FusionResult<MassFunction> {
        Ok(combine(a, b)?)
    }
}

impl ICombinationRule for DempsterRule {
    type State = ConjunctiveState;

    #[instrument(skip_all, fields(batch = batch.len()))]
    fn combine_new_evidence(
        &self,
        batch: &EvidenceBatch,
        prior: Option<ConjunctiveState>,
        _weights: Option<&EvidenceWeights>,
    ) -> FusionResult<ConjunctiveState> {
        sequential::fold_batch(batch, prior, &Self::pair)
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
        sequential::merge_states(a, b, max_retained, &Self::pair)
    }

    /// The state is the distribution; there is nothing further to finalize.
    fn final_probabilities(&self, state: &ConjunctiveState) -> Option<MassFunction> {
        (!state.is_empty()).then(|| state.combined.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsfusion_core::FocalSet;

    fn fs(elements: &[&str]) -> FocalSet {
        FocalSet::new(elements.iter().copied()).unwrap()
    }

    fn mf(entries: &[(&[&str], f64)]) -> MassFunction {
        MassFunction::try_from_entries(entries.iter().map(|(f, m)| (fs(f), *m))).unwrap()
    }

    #[test]
    fn conflict_is_normalized_away() {
        let a = mf(&[(&["a"], 0.5), (&["b"], 0.5)]);
        let b = mf(&[(&["a"], 0.5), (&["b"], 0.5)]);
        let r = combine(&a, &b).unwrap();
        assert!((r.get(&fs(&["a"])) - 0.5).abs() < 1e-12);
        assert!((r.get(&fs(&["b"])) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn total_conflict_is_an_error() {
        let a = mf(&[(&["a"], 1.0)]);
        let b = mf(&[(&["b"], 1.0)]);
        assert!(matches!(
            combine(&a, &b),
            Err(CombinationError::ConflictExhaustion { .. })
        ));
    }

    #[test]
    fn untracked_intersection_is_discarded() {
        // {a,b} ∩ {b,c} = {b}, which neither input tracks.
        let a = mf(&[(&["a", "b"], 0.5), (&["a"], 0.5)]);
        let b = mf(&[(&["b", "c"], 0.5), (&["a", "c"], 0.5)]);
        let r = combine(&a, &b).unwrap();
        assert!(!r.contains(&fs(&["b"])));
        assert!((r.get(&fs(&["a"])) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn paper_example_reinforces_agreement() {
        let m = mf(&[(&["a"], 0.2), (&["b"], 0.5), (&["a", "b"], 0.3)]);
        let r = combine(&m, &m).unwrap();
        // a: .04+.06+.06 = .16, b: .25+.15+.15 = .55, ab: .09; conflict .2
        assert!((r.get(&fs(&["a"])) - 0.2).abs() < 1e-12);
        assert!((r.get(&fs(&["b"])) - 0.6875).abs() < 1e-12);
        assert!((r.get(&fs(&["a", "b"])) - 0.1125).abs() < 1e-12);
    }
}
