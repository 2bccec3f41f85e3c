//! Zhang rule: credibility weighting, genuine window eviction, merging.

use dsfusion_core::constants::MAX_POWERSET_HYPOTHESES;
use dsfusion_core::errors::{CombinationError, FusionError};
use dsfusion_core::models::{WeightedEvidence, ZhangState};
use dsfusion_core::{EvidenceBatch, EvidenceWeights, FocalSet, ICombinationRule, MassFunction};
use dsfusion_rules::zhang::{pignistic, powerset};
use dsfusion_rules::ZhangRule;
use test_fixtures::SensorScenario;

fn fs(elements: &[&str]) -> FocalSet {
    FocalSet::new(elements.iter().copied()).unwrap()
}

fn mf(entries: &[(&[&str], f64)]) -> MassFunction {
    MassFunction::try_from_entries(entries.iter().map(|(f, m)| (fs(f), *m))).unwrap()
}

fn fuse_one_at_a_time(rule: &ZhangRule, ids: &[u64], max_retained: Option<usize>) -> ZhangState {
    let scenario = SensorScenario::load();
    let mut state = None;
    for &id in ids {
        state = Some(
            rule.combine_windowed(&scenario.single(id), max_retained, state, None)
                .unwrap(),
        );
    }
    state.unwrap()
}

// ── Windowing ────────────────────────────────────────────────────────────

#[test]
fn window_evicts_oldest_records() {
    let rule = ZhangRule::new();
    let windowed = fuse_one_at_a_time(&rule, &[1, 2, 3, 4, 5], Some(3));
    let newest_three = fuse_one_at_a_time(&rule, &[3, 4, 5], None);

    assert_eq!(windowed.number_of_evidences(), 3);
    assert_eq!(windowed.evidence, newest_three.evidence);
    assert_eq!(windowed.combined, newest_three.combined);
    assert_eq!(windowed.credibility, newest_three.credibility);
}

#[test]
fn eviction_changes_the_output() {
    let rule = ZhangRule::new();
    let windowed = fuse_one_at_a_time(&rule, &[1, 2, 3, 4, 5], Some(3));
    let unbounded = fuse_one_at_a_time(&rule, &[1, 2, 3, 4, 5], None);

    assert_eq!(unbounded.number_of_evidences(), 5);
    assert!(!windowed.combined.approx_eq(&unbounded.combined, 1e-4));
}

#[test]
fn oversized_batch_keeps_only_its_newest_items() {
    let scenario = SensorScenario::load();
    let state = ZhangRule::new()
        .combine_windowed(&scenario.batch(5), Some(2), None, None)
        .unwrap();
    let masses: Vec<&MassFunction> = state.evidence.iter().map(|r| &r.mass).collect();
    assert_eq!(masses, vec![scenario.sensor(4), scenario.sensor(5)]);
}

#[test]
fn zero_window_is_rejected() {
    let scenario = SensorScenario::load();
    let err = ZhangRule::new()
        .combine_windowed(&scenario.single(1), Some(0), None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        FusionError::Combination(CombinationError::InvalidWindow { .. })
    ));
}

// ── Credibility ──────────────────────────────────────────────────────────

#[test]
fn credibility_is_exposed_and_normalized() {
    let scenario = SensorScenario::load();
    let state = ZhangRule::new()
        .combine_new_evidence(&scenario.batch(5), None, None)
        .unwrap();
    assert_eq!(state.credibility.len(), 5);
    assert!((state.credibility.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    // Sensor 2 is the outlier of the scenario.
    let lowest = state
        .credibility
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i);
    assert_eq!(lowest, Some(1));
}

#[test]
fn explicit_weights_are_kept_per_record() {
    let scenario = SensorScenario::load();
    let mut weights = EvidenceWeights::new();
    weights.set(2u64, 0.25).unwrap();
    let state = ZhangRule::new()
        .combine_new_evidence(&scenario.batch(3), None, Some(&weights))
        .unwrap();
    let recorded: Vec<f64> = state.evidence.iter().map(|r| r.weight).collect();
    assert_eq!(recorded, vec![1.0, 0.25, 1.0]);

    let unweighted = ZhangRule::new()
        .combine_new_evidence(&scenario.batch(3), None, None)
        .unwrap();
    let b = fs(&["b"]);
    assert!(state.combined.get(&b) < unweighted.combined.get(&b));
}

#[test]
fn open_world_mass_is_part_of_the_frame() {
    let batch = EvidenceBatch::new()
        .with(1u64, mf(&[(&["a"], 0.5), (&["b"], 0.3), (&["zero"], 0.2)]))
        .with(2u64, mf(&[(&["a"], 0.6), (&["b"], 0.4)]));
    let state = ZhangRule::new().combine_new_evidence(&batch, None, None).unwrap();

    // Frame {a, b, zero} gives a seven-set power set.
    assert_eq!(state.combined.len(), 7);
    assert!(state.combined.is_normalized());

    let frame = powerset::frame(&state.evidence);
    let names: Vec<&str> = frame.iter().map(|h| h.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "zero"]);
    // m({zero}) = 0.2 is factored out: a = 0.5 / 0.8.
    let v = pignistic::pignistic_vector(&state.evidence[0].mass, &frame);
    assert!((v[0] - 0.625).abs() < 1e-12);
    assert!((v[1] - 0.375).abs() < 1e-12);
}

#[test]
fn frame_larger_than_the_cap_is_rejected() {
    let wide = MassFunction::try_from_entries(
        (0..5).map(|i| (FocalSet::singleton(format!("h{i}").as_str()), 0.2)),
    )
    .unwrap();
    let batch = EvidenceBatch::new().with(1u64, wide);
    let err = ZhangRule::with_max_powerset_hypotheses(4)
        .combine_new_evidence(&batch, None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        FusionError::Combination(CombinationError::FrameTooLarge { hypotheses: 5, max: 4 })
    ));
}

#[test]
fn oversized_cap_still_rejects_a_wide_frame() {
    let rule = ZhangRule::with_max_powerset_hypotheses(64);
    assert_eq!(rule.max_powerset_hypotheses(), MAX_POWERSET_HYPOTHESES);

    let wide = MassFunction::try_from_entries(
        (0..64).map(|i| (FocalSet::singleton(format!("h{i}").as_str()), 1.0 / 64.0)),
    )
    .unwrap();
    let batch = EvidenceBatch::new().with(1u64, wide);
    let err = rule.combine_new_evidence(&batch, None, None).unwrap_err();
    assert!(matches!(
        err,
        FusionError::Combination(CombinationError::FrameTooLarge {
            hypotheses: 64,
            max: MAX_POWERSET_HYPOTHESES,
        })
    ));
}

// ── Merging ──────────────────────────────────────────────────────────────

#[test]
fn merge_appends_second_history_as_newest() {
    let scenario = SensorScenario::load();
    let rule = ZhangRule::new();
    let all = rule.combine_new_evidence(&scenario.batch(5), None, None).unwrap();

    let first: EvidenceBatch = (1u64..=2).map(|id| (id, scenario.sensor(id).clone())).collect();
    let second: EvidenceBatch = (3u64..=5).map(|id| (id, scenario.sensor(id).clone())).collect();
    let a = rule.combine_new_evidence(&first, None, None).unwrap();
    let b = rule.combine_new_evidence(&second, None, None).unwrap();
    let merged = rule.combine_two_states(a, b, None).unwrap();

    assert_eq!(merged.evidence, all.evidence);
    assert_eq!(merged.combined, all.combined);
    assert_eq!(&merged.last_evidence, scenario.sensor(5));
}

#[test]
fn merge_carries_the_second_states_weights() {
    let scenario = SensorScenario::load();
    let rule = ZhangRule::new();
    let a = rule.combine_new_evidence(&scenario.single(1), None, None).unwrap();
    let b = ZhangState {
        evidence: vec![WeightedEvidence {
            mass: scenario.sensor(2).clone(),
            weight: 0.5,
        }],
        ..ZhangState::default()
    };
    let merged = rule.combine_two_states(a, b, Some(5)).unwrap();
    let weights: Vec<f64> = merged.evidence.iter().map(|r| r.weight).collect();
    assert_eq!(weights, vec![1.0, 0.5]);
}

#[test]
fn merge_respects_window() {
    let scenario = SensorScenario::load();
    let rule = ZhangRule::new();
    let a = rule.combine_new_evidence(&scenario.batch(3), None, None).unwrap();
    let b = rule.combine_new_evidence(&scenario.single(4), None, None).unwrap();
    let merged = rule.combine_two_states(a, b, Some(2)).unwrap();
    let masses: Vec<&MassFunction> = merged.evidence.iter().map(|r| &r.mass).collect();
    assert_eq!(masses, vec![scenario.sensor(3), scenario.sensor(4)]);
}
