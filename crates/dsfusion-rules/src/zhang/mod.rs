//! Zhang's credibility-weighted rule.
//!
//! Every retained record is reduced to a pignistic probability vector, and
//! records that agree with the rest (high cosine similarity) earn more
//! credibility. The credibility-weighted average over the power set of the
//! frame is then combined with itself through Dempster's rule once per
//! additional record.
//!
//! Credibility depends on the whole retained history, so the state keeps
//! every record and windowing genuinely evicts the oldest ones.

pub mod credibility;
pub mod pignistic;
pub mod powerset;

use dsfusion_core::config::defaults::DEFAULT_MAX_POWERSET_HYPOTHESES;
use dsfusion_core::constants::MAX_POWERSET_HYPOTHESES;
use dsfusion_core::errors::FusionResult;
use dsfusion_core::evidence::weight_of;
use dsfusion_core::models::{WeightedEvidence, ZhangState};
use dsfusion_core::traits::ICombinationRule;
use dsfusion_core::{EvidenceBatch, EvidenceWeights, MassFunction};
use tracing::{debug, instrument};

use crate::{dempster, sequential};

#[derive(Debug, Clone, Copy)]
pub struct ZhangRule {
    max_powerset_hypotheses: usize,
}

impl Default for ZhangRule {
    fn default() -> Self {
        Self {
            max_powerset_hypotheses: DEFAULT_MAX_POWERSET_HYPOTHESES,
        }
    }
}

impl ZhangRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on the frame size the rule will enumerate a power set for,
    /// lowered to `MAX_POWERSET_HYPOTHESES` when above it.
    pub fn with_max_powerset_hypotheses(max_powerset_hypotheses: usize) -> Self {
        Self {
            max_powerset_hypotheses: max_powerset_hypotheses.min(MAX_POWERSET_HYPOTHESES),
        }
    }

    pub fn max_powerset_hypotheses(&self) -> usize {
        self.max_powerset_hypotheses
    }

    /// Append `records` to the history, drop the oldest beyond
    /// `max_retained`, and recompute.
    fn absorb<I>(
        &self,
        mut state: ZhangState,
        records: I,
        max_retained: Option<usize>,
    ) -> FusionResult<ZhangState>
    where
        I: IntoIterator<Item = WeightedEvidence>,
    {
        for record in records {
            state.last_evidence = record.mass.clone();
            state.evidence.push(record);
        }
        if let Some(max) = max_retained {
            evict(&mut state, max);
        }
        self.recompute(&mut state)?;
        Ok(state)
    }

    /// Rebuild credibility and `combined` from the retained history.
    fn recompute(&self, state: &mut ZhangState) -> FusionResult<()> {
        if state.evidence.is_empty() {
            state.combined = MassFunction::new();
            state.credibility.clear();
            return Ok(());
        }

        let frame = powerset::frame(&state.evidence);
        let subsets = powerset::enumerate(&frame, self.max_powerset_hypotheses)?;

        let vectors: Vec<Vec<f64>> = state
            .evidence
            .iter()
            .map(|record| pignistic::pignistic_vector(&record.mass, &frame))
            .collect();
        let similarity = pignistic::similarity_matrix(&vectors);
        let credibility = credibility::credibility(&similarity);
        let reformed = credibility::reformed_mass(&state.evidence, &credibility, &subsets)?;

        let mut combined = reformed.clone();
        for _ in 1..state.evidence.len() {
            combined = dempster::combine(&combined, &reformed)?;
        }

        debug!(
            records = state.evidence.len(),
            hypotheses = frame.len(),
            focal_sets = subsets.len(),
            "zhang credibility recomputed"
        );
        state.combined = combined;
        state.credibility = credibility;
        Ok(())
    }
}

/// Drop the oldest records until at most `max` remain. Positions are the
/// record indices, so the survivors are re-indexed from zero.
fn evict(state: &mut ZhangState, max: usize) {
    let excess = state.evidence.len().saturating_sub(max);
    if excess > 0 {
        state.evidence.drain(..excess);
        debug!(evicted = excess, retained = state.evidence.len(), "zhang window applied");
    }
}

impl ICombinationRule for ZhangRule {
    type State = ZhangState;

    #[instrument(skip_all, fields(batch = batch.len()))]
    fn combine_new_evidence(
        &self,
        batch: &EvidenceBatch,
        prior: Option<ZhangState>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<ZhangState> {
        self.combine_windowed(batch, None, prior, weights)
    }

    fn combine_windowed(
        &self,
        batch: &EvidenceBatch,
        max_retained: Option<usize>,
        prior: Option<ZhangState>,
        weights: Option<&EvidenceWeights>,
    ) -> FusionResult<ZhangState> {
        if let Some(max) = max_retained {
            sequential::check_window(max)?;
        }
        let records = batch.iter().map(|(key, mass)| WeightedEvidence {
            mass: mass.clone(),
            weight: weight_of(weights, key),
        });
        self.absorb(prior.unwrap_or_default(), records, max_retained)
    }

    /// `b`'s retained records, with their own weights, are appended to `a`'s
    /// history as the newest evidence.
    fn combine_two_states(
        &self,
        a: ZhangState,
        b: ZhangState,
        max_retained: Option<usize>,
    ) -> FusionResult<ZhangState> {
        if let Some(max) = max_retained {
            sequential::check_window(max)?;
        }
        self.absorb(a, b.evidence, max_retained)
    }

    fn final_probabilities(&self, state: &ZhangState) -> Option<MassFunction> {
        (!state.combined.is_empty()).then(|| state.combined.clone())
    }
}
