//! Sequential left-fold shared by the associative rules (Dempster, Yager).
//!
//! Neither rule keeps history: the running `combined` mass function is
//! folded with each new item in batch order, and the prior result joins as
//! the final input.

use dsfusion_core::errors::{CombinationError, FusionResult};
use dsfusion_core::models::ConjunctiveState;
use dsfusion_core::{EvidenceBatch, MassFunction};

/// Pairwise combination step of a sequential rule.
pub(crate) type PairRule<'a> = &'a dyn Fn(&MassFunction, &MassFunction) -> FusionResult<MassFunction>;

/// Fold `inputs` left to right. Empty mass functions are skipped; the first
/// non-empty input, normalized, seeds the result.
pub(crate) fn fold<'m, I>(inputs: I, pair: PairRule<'_>) -> FusionResult<MassFunction>
where
    I: IntoIterator<Item = &'m MassFunction>,
{
    let mut acc: Option<MassFunction> = None;
    for input in inputs {
        if input.is_empty() {
            continue;
        }
        acc = Some(match acc {
            None => input.normalized()?,
            Some(running) => pair(&running, input)?,
        });
    }
    Ok(acc.unwrap_or_default())
}

/// Fold a batch into a conjunctive state.
pub(crate) fn fold_batch(
    batch: &EvidenceBatch,
    prior: Option<ConjunctiveState>,
    pair: PairRule<'_>,
) -> FusionResult<ConjunctiveState> {
    let ConjunctiveState {
        combined: prior_combined,
        number_of_evidences,
        last_evidence,
    } = prior.unwrap_or_default();

    let combined = fold(
        batch
            .iter()
            .map(|(_, mass)| mass)
            .chain(std::iter::once(&prior_combined)),
        pair,
    )?;

    let last_evidence = batch
        .iter()
        .last()
        .map(|(_, mass)| mass.clone())
        .unwrap_or(last_evidence);

    Ok(ConjunctiveState {
        combined,
        number_of_evidences: number_of_evidences + batch.len(),
        last_evidence,
    })
}

/// Clamp the display counter of `prior` so that, once `incoming` items are
/// added, it does not exceed `max_retained`. Nothing is evicted.
pub(crate) fn clamp_counter(
    prior: Option<ConjunctiveState>,
    incoming: usize,
    max_retained: Option<usize>,
) -> FusionResult<Option<ConjunctiveState>> {
    let Some(max) = max_retained else {
        return Ok(prior);
    };
    check_window(max)?;
    Ok(prior.map(|mut state| {
        state.number_of_evidences = state.number_of_evidences.min(max.saturating_sub(incoming));
        state
    }))
}

/// Merge two conjunctive states: `a.combined` then `b.combined`.
pub(crate) fn merge_states(
    a: ConjunctiveState,
    b: ConjunctiveState,
    max_retained: Option<usize>,
    pair: PairRule<'_>,
) -> FusionResult<ConjunctiveState> {
    let combined = fold([&a.combined, &b.combined], pair)?;
    let mut number_of_evidences = a.number_of_evidences + b.number_of_evidences;
    if let Some(max) = max_retained {
        check_window(max)?;
        number_of_evidences = number_of_evidences.min(max);
    }
    let last_evidence = if b.last_evidence.is_empty() {
        a.last_evidence
    } else {
        b.last_evidence
    };
    Ok(ConjunctiveState {
        combined,
        number_of_evidences,
        last_evidence,
    })
}

/// A window must retain at least one evidence.
pub(crate) fn check_window(max_retained: usize) -> FusionResult<()> {
    if max_retained == 0 {
        return Err(CombinationError::InvalidWindow { max_retained }.into());
    }
    Ok(())
}
