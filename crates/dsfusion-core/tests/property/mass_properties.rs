use dsfusion_core::{FocalSet, Hypothesis, MassFunction};
use proptest::prelude::*;

fn arb_hypotheses() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 1..8)
}

/// Up to six focal sets over {a..e}, each with a positive mass.
fn arb_entries() -> impl Strategy<Value = Vec<(Vec<String>, f64)>> {
    prop::collection::vec((arb_hypotheses(), 0.001f64..10.0), 1..6)
}

// ── Canonicalization ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn focal_set_ignores_order_and_duplicates(mut elements in arb_hypotheses()) {
        let forward = FocalSet::new(elements.iter().map(String::as_str)).unwrap();
        elements.reverse();
        let repeated = elements.clone();
        elements.extend(repeated);
        let shuffled = FocalSet::new(elements.iter().map(String::as_str)).unwrap();

        prop_assert_eq!(&forward, &shuffled);
        let hypotheses = forward.hypotheses();
        prop_assert!(hypotheses.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn focal_set_contains_every_input(elements in arb_hypotheses()) {
        let set = FocalSet::new(elements.iter().map(String::as_str)).unwrap();
        for e in &elements {
            prop_assert!(set.contains(&Hypothesis::from(e.as_str())));
        }
    }
}

// ── Normalization ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_sums_to_one(entries in arb_entries()) {
        let mf = MassFunction::try_from_entries(entries.into_iter().map(|(elements, mass)| {
            (FocalSet::new(elements.iter().map(String::as_str)).unwrap(), mass)
        }))
        .unwrap();
        let normalized = mf.normalized().unwrap();
        prop_assert!(normalized.is_normalized(), "total {}", normalized.total());
        prop_assert_eq!(normalized.len(), mf.len());
        prop_assert!(normalized.iter().all(|(_, m)| (0.0..=1.0).contains(m)));
    }

    #[test]
    fn normalization_is_idempotent(entries in arb_entries()) {
        let mf = MassFunction::try_from_entries(entries.into_iter().map(|(elements, mass)| {
            (FocalSet::new(elements.iter().map(String::as_str)).unwrap(), mass)
        }))
        .unwrap();
        let once = mf.normalized().unwrap();
        let twice = once.normalized().unwrap();
        prop_assert!(once.approx_eq(&twice, 1e-12));
    }
}
