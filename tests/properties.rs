// Property-based tests for the reconciliation pass.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::cell::RefCell;

use keyed_recon::{KeyEquality, Reconciler, Report};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One side of a comparison: unique keys under `prefix`, deterministic order.
fn arb_side(prefix: &'static str, max: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map(r"[a-z]{1,6}", r"[0-9]{1,4}", 0..=max).prop_map(move |m| {
        m.into_iter()
            .map(|(k, v)| (format!("{prefix}{k}"), v))
            .collect()
    })
}

/// A side drawn from a small key alphabet so both sides overlap often.
fn arb_overlapping_side(max: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map(r"[a-d]{1,2}", r"[0-9]{1,2}", 0..=max)
        .prop_map(|m| m.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    // Disjoint key spaces: everything is missing, nothing matches.
    #[test]
    fn disjoint_keys_are_all_missing(
        left in arb_side("l_", 12),
        right in arb_side("r_", 12),
    ) {
        let report = Report::collect(KeyEquality, &left, &right);
        let summary = report.summary();

        prop_assert_eq!(summary.equal, 0);
        prop_assert_eq!(summary.different, 0);
        prop_assert_eq!(summary.missing_from_right, left.len());
        prop_assert_eq!(summary.missing_from_left, right.len());
    }

    // Each left entry lands in exactly one of {equal, different,
    // missing-from-right}; each right entry in exactly one of {equal,
    // different, missing-from-left}.
    #[test]
    fn every_entry_classified_exactly_once(
        left in arb_overlapping_side(8),
        right in arb_overlapping_side(8),
    ) {
        let report = Report::collect(KeyEquality, &left, &right);
        let s = report.summary();

        prop_assert_eq!(s.equal + s.different + s.missing_from_right, left.len());
        prop_assert_eq!(s.equal + s.different + s.missing_from_left, right.len());
        prop_assert_eq!(
            s.total,
            s.equal + s.different + s.missing_from_right + s.missing_from_left
        );
    }

    // Same inputs, same configuration, same outcome sequence.
    #[test]
    fn repeated_runs_are_identical(
        left in arb_overlapping_side(8),
        right in arb_overlapping_side(8),
    ) {
        let first = Report::collect(KeyEquality, &left, &right);
        let second = Report::collect(KeyEquality, &left, &right);
        prop_assert_eq!(first, second);
    }

    // A reused Reconciler carries no state between compare calls.
    #[test]
    fn reconciler_reuse_repeats_the_dispatch_sequence(
        left in arb_overlapping_side(6),
        right in arb_overlapping_side(6),
    ) {
        let log = RefCell::new(Vec::new());
        let mut rec: Reconciler<String, String> = Reconciler::new()
            .on_equal(|l: &String, r: &String| {
                log.borrow_mut().push(format!("={l}:{r}"));
                Ok(())
            })
            .on_different(|l: &String, r: &String| {
                log.borrow_mut().push(format!("!{l}:{r}"));
                Ok(())
            })
            .on_missing_right(|l: &String| {
                log.borrow_mut().push(format!(">{l}"));
                Ok(())
            })
            .on_missing_left(|r: &String| {
                log.borrow_mut().push(format!("<{r}"));
                Ok(())
            });

        rec.compare(&left, &right).unwrap();
        rec.compare(&left, &right).unwrap();
        drop(rec);

        let log = log.into_inner();
        prop_assert_eq!(log.len() % 2, 0);
        let half = log.len() / 2;
        prop_assert_eq!(&log[..half], &log[half..]);
    }

    // With key identity, matched pairs agree on keys; a pair is equal
    // exactly when the values are.
    #[test]
    fn key_identity_classifies_by_value(
        left in arb_overlapping_side(8),
        right in arb_overlapping_side(8),
    ) {
        use keyed_recon::Outcome;

        let report = Report::collect(KeyEquality, &left, &right);
        let has_key = |side: &[(String, String)], key: &String| {
            side.iter().any(|(k, _)| k == key)
        };

        for outcome in &report.outcomes {
            match outcome {
                Outcome::Equal { left: l, right: r } => prop_assert_eq!(l, r),
                Outcome::Different { left: l, right: r } => prop_assert_ne!(l, r),
                Outcome::MissingFromRight { left: l } => {
                    // Some left entry carries this value under a key the
                    // right side does not have.
                    prop_assert!(left
                        .iter()
                        .any(|(k, v)| v == l && !has_key(&right, k)));
                }
                Outcome::MissingFromLeft { right: r } => {
                    prop_assert!(right
                        .iter()
                        .any(|(k, v)| v == r && !has_key(&left, k)));
                }
            }
        }
    }
}
