//! Frame of discernment and its power set.

use std::collections::BTreeSet;

use dsfusion_core::constants::MAX_POWERSET_HYPOTHESES;
use dsfusion_core::errors::{CombinationError, FusionResult};
use dsfusion_core::models::WeightedEvidence;
use dsfusion_core::{FocalSet, Hypothesis};

/// Every hypothesis mentioned by any retained record, in canonical order.
pub fn frame(records: &[WeightedEvidence]) -> Vec<Hypothesis> {
    records
        .iter()
        .flat_map(|r| r.mass.hypotheses())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// All non-empty subsets of `frame`. Fails with `FrameTooLarge` past `max`
/// hypotheses, since the enumeration is `2^n − 1` focal sets. `max` never
/// exceeds `MAX_POWERSET_HYPOTHESES`.
pub fn enumerate(frame: &[Hypothesis], max: usize) -> FusionResult<Vec<FocalSet>> {
    let max = max.min(MAX_POWERSET_HYPOTHESES);
    if frame.len() > max {
        return Err(CombinationError::FrameTooLarge {
            hypotheses: frame.len(),
            max,
        }
        .into());
    }

    let mut subsets = Vec::with_capacity((1usize << frame.len()) - 1);
    for mask in 1u64..(1u64 << frame.len()) {
        let members = frame
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, h)| h.clone());
        subsets.push(FocalSet::new(members)?);
    }
    Ok(subsets)
}
