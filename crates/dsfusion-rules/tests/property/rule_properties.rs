use dsfusion_core::{EvidenceBatch, FocalSet, MassFunction, RuleKind};
use dsfusion_rules::{dempster, yager, FusionEngine};
use proptest::prelude::*;

/// Every non-empty subset of {a, b, c}.
fn power_set() -> Vec<FocalSet> {
    [
        &["a"][..],
        &["b"],
        &["c"],
        &["a", "b"],
        &["a", "c"],
        &["b", "c"],
        &["a", "b", "c"],
    ]
    .iter()
    .map(|s| FocalSet::new(s.iter().copied()).unwrap())
    .collect()
}

/// Normalized mass function with strictly positive mass on every subset.
fn arb_mass() -> impl Strategy<Value = MassFunction> {
    prop::collection::vec(0.01f64..1.0, 7).prop_map(|raw| {
        let total: f64 = raw.iter().sum();
        MassFunction::try_from_entries(power_set().into_iter().zip(raw.iter().map(|m| m / total)))
            .unwrap()
    })
}

fn arb_batch(max: usize) -> impl Strategy<Value = EvidenceBatch> {
    prop::collection::vec(arb_mass(), 1..=max).prop_map(|masses| {
        masses
            .into_iter()
            .enumerate()
            .map(|(i, m)| (i as u64, m))
            .collect()
    })
}

fn scaled(m: &MassFunction, factor: f64) -> MassFunction {
    MassFunction::try_from_entries(m.iter().map(|(f, v)| (f.clone(), v * factor))).unwrap()
}

// ── Commutativity ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dempster_is_commutative(a in arb_mass(), b in arb_mass()) {
        let ab = dempster::combine(&a, &b).unwrap();
        let ba = dempster::combine(&b, &a).unwrap();
        prop_assert!(ab.approx_eq(&ba, 1e-9), "{} vs {}", ab, ba);
    }

    #[test]
    fn yager_is_commutative(a in arb_mass(), b in arb_mass()) {
        let ab = yager::combine(&a, &b, true).unwrap();
        let ba = yager::combine(&b, &a, true).unwrap();
        prop_assert!(ab.approx_eq(&ba, 1e-9), "{} vs {}", ab, ba);
    }
}

// ── Normalization ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dempster_ignores_input_scale(
        a in arb_mass(),
        b in arb_mass(),
        factor in 0.1f64..10.0,
    ) {
        let base = dempster::combine(&a, &b).unwrap();
        let result = dempster::combine(&a, &scaled(&b, factor)).unwrap();
        prop_assert!(base.approx_eq(&result, 1e-9));
    }

    #[test]
    fn every_rule_yields_a_distribution(batch in arb_batch(4)) {
        for kind in RuleKind::ALL {
            let engine = FusionEngine::new(kind);
            let state = engine.combine(&batch, None, 0.0).unwrap();
            let probabilities = engine.final_probabilities(&state).unwrap().unwrap();
            prop_assert!(probabilities.iter().all(|(_, m)| (0.0..=1.0).contains(m)));
            prop_assert!(
                (probabilities.total() - 1.0).abs() < 1e-6,
                "{} sums to {}", kind, probabilities.total()
            );
        }
    }

    #[test]
    fn yager_keeps_total_mass(a in arb_mass(), b in arb_mass()) {
        let combined = yager::combine(&a, &b, true).unwrap();
        prop_assert!(combined.is_normalized());
    }
}

// ── Overwrite ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn overwrite_keeps_greatest_key_in_any_order(batch in arb_batch(5)) {
        let engine = FusionEngine::new(RuleKind::Overwrite);
        let forward = engine.combine(&batch, None, 0.0).unwrap();

        let reversed: EvidenceBatch = batch
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|(k, m)| (k.clone(), m.clone()))
            .collect();
        let backward = engine.combine(&reversed, None, 0.0).unwrap();

        prop_assert_eq!(&forward, &backward);
        let newest = batch.newest().map(|(_, m)| m.clone()).unwrap();
        prop_assert_eq!(forward.combined(), &newest);
    }
}
