//! Murphy's averaging rule.
//!
//! Evidence is averaged first (weighted by reliability), which damps the
//! conflict between sources, and the average is then combined with itself
//! through Dempster's rule once per additional evidence item.

use dsfusion_core::constants::DEFAULT_EVIDENCE_WEIGHT;
use dsfusion_core::errors::FusionResult;
use dsfusion_core::evidence::weight_of;
use dsfusion_core::models::MurphyState;
use dsfusion_core::traits::ICombinationRule;
use dsfusion_core::{EvidenceBatch, EvidenceWeights, MassFunction};
use tracing::{debug, instrument};

use crate::{dempster, sequential};

#[derive(Debug, Clone, Copy, Default)]
pub struct MurphyRule;

impl MurphyRule {
    pub fn new() -> Self {
        Self
    }
}

/// Fold one evidence item into the running average.
///
/// Focal sets the item mentions move toward its mass; tracked focal sets it
/// does not mention are diluted as if it had assigned them zero.
fn fold_evidence(state: &mut MurphyState, mass: &MassFunction, weight: f64) -> FusionResult<()> {
    let prior_weight = state.evidence_weight;
    let total_weight = prior_weight + weight;

    for (focal, value) in state.evidence.iter_mut() {
        if !mass.contains(focal) {
            *value = *value * prior_weight / total_weight;
        }
    }
    for (focal, new_mass) in mass {
        let averaged = (state.evidence.get(focal) * prior_weight + new_mass * weight) / total_weight;
        state.evidence.insert(focal.clone(), averaged)?;
    }

    state.evidence_weight = total_weight;
    state.number_of_evidences += 1;
    state.last_evidence = mass.clone();
    Ok(())
}

/// Bound the self-combination count so that `incoming` more items still
/// fit in `max_retained`. The running average is untouched.
fn clamp_to_window(
    state: &mut MurphyState,
    incoming: usize,
    max_retained: Option<usize>,
) -> FusionResult<()> {
    if let Some(max) = max_retained {
        sequential::check_window(max)?;
        state.number_of_evidences = state
            .number_of_evidences
            .min(max.saturating_sub(incoming));
    }
    Ok(())
}

/// Recompute `combined`: the average combined with itself
/// `number_of_evidences - 1` times.
fn finalize(state: &mut MurphyState) -> FusionResult<()> {
    let mut combined = state.evidence.clone();
    if !combined.is_empty() {
        for _ in 1..state.number_of_evidences {
            combined = dempster::combine(&combined, &state.evidence)?;
        }
    }
    debug!(
        evidences = state.number_of_evidences,
        weight = state.evidence_weight,
        "murphy average finalized"
    );
    state.combined = combined;
    Ok(())
}

impl ICombinationRule for MurphyRule {
    type State = MurphyState;

    #[instrument(skip_all, fields(batch = batch.len()))]
    fn combine_new_evidence(
        &self,
        batch: &EvidenceBatch,
        prior: Option<MurphyState>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<MurphyState> {
        let mut state = prior.unwrap_or_default();
        for (key, mass) in batch.iter() {
            fold_evidence(&mut state, mass, weight_of(weights, key))?;
        }
        finalize(&mut state)?;
        Ok(state)
    }

    /// History is never evicted: the average keeps every item it has seen.
    /// Only the self-combination count is bounded, which treats older
    /// evidence as background rather than as independent observations.
    fn combine_windowed(
        &self,
        batch: &EvidenceBatch,
        max_retained: Option<usize>,
        prior: Option<MurphyState>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<MurphyState> {
        let mut prior = prior;
        if let Some(state) = prior.as_mut() {
            clamp_to_window(state, batch.len(), max_retained)?;
        } else if let Some(max) = max_retained {
            sequential::check_window(max)?;
        }
        self.combine_new_evidence(batch, prior, weights)
    }

    /// Replays `b`'s average into `a` once per evidence `b` has seen, each
    /// replay carrying an equal share of `b`'s cumulative weight.
    fn combine_two_states(
        &self,
        a: MurphyState,
        b: MurphyState,
        max_retained: Option<usize>,
    ) -> FusionResult<MurphyState> {
        if b.number_of_evidences == 0 || b.evidence.is_empty() {
            return Ok(a);
        }

        let mut each_weight = b.evidence_weight / b.number_of_evidences as f64;
        if !each_weight.is_finite() || each_weight <= 0.0 {
            each_weight = DEFAULT_EVIDENCE_WEIGHT;
        }

        let mut state = a;
        clamp_to_window(&mut state, b.number_of_evidences, max_retained)?;
        for _ in 0..b.number_of_evidences {
            fold_evidence(&mut state, &b.evidence, each_weight)?;
        }
        finalize(&mut state)?;
        Ok(state)
    }

    fn final_probabilities(&self, state: &MurphyState) -> Option<MassFunction> {
        if state.number_of_evidences == 0 || state.combined.is_empty() {
            return None;
        }
        Some(state.combined.clone())
    }
}
