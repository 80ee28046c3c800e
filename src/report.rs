use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;

use serde::Serialize;

use crate::policy::MatchPolicy;
use crate::reconciler::Reconciler;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// One classified result from a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Outcome<L, R = L> {
    Equal { left: L, right: R },
    Different { left: L, right: R },
    MissingFromRight { left: L },
    MissingFromLeft { right: R },
}

impl<L, R> Outcome<L, R> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Equal { .. } => OutcomeKind::Equal,
            Self::Different { .. } => OutcomeKind::Different,
            Self::MissingFromRight { .. } => OutcomeKind::MissingFromRight,
            Self::MissingFromLeft { .. } => OutcomeKind::MissingFromLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Equal,
    Different,
    MissingFromRight,
    MissingFromLeft,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Different => write!(f, "different"),
            Self::MissingFromRight => write!(f, "missing_from_right"),
            Self::MissingFromLeft => write!(f, "missing_from_left"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Every outcome of one comparison, in handler-invocation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report<L, R = L> {
    pub outcomes: Vec<Outcome<L, R>>,
}

impl<L: Clone, R: Clone> Report<L, R> {
    /// Run one comparison under `policy` and collect every outcome.
    ///
    /// Built by registering four collecting handlers on a [`Reconciler`],
    /// so the outcome order and classification are exactly those of a
    /// [`compare`](Reconciler::compare) call with the same inputs.
    pub fn collect<K, P>(policy: P, left: &[(K, L)], right: &[(K, R)]) -> Self
    where
        P: MatchPolicy<K, L, R>,
    {
        let outcomes = RefCell::new(Vec::new());

        let mut reconciler: Reconciler<'_, K, L, R, Infallible> =
            Reconciler::with_policy(policy)
                .on_equal(|l: &L, r: &R| {
                    outcomes.borrow_mut().push(Outcome::Equal {
                        left: l.clone(),
                        right: r.clone(),
                    });
                    Ok(())
                })
                .on_different(|l: &L, r: &R| {
                    outcomes.borrow_mut().push(Outcome::Different {
                        left: l.clone(),
                        right: r.clone(),
                    });
                    Ok(())
                })
                .on_missing_right(|l: &L| {
                    outcomes.borrow_mut().push(Outcome::MissingFromRight { left: l.clone() });
                    Ok(())
                })
                .on_missing_left(|r: &R| {
                    outcomes.borrow_mut().push(Outcome::MissingFromLeft { right: r.clone() });
                    Ok(())
                });

        if let Err(never) = reconciler.compare(left, right) {
            match never {}
        }
        drop(reconciler);

        Report {
            outcomes: outcomes.into_inner(),
        }
    }
}

impl<L, R> Report<L, R> {
    /// Compute per-outcome counts.
    pub fn summary(&self) -> Summary {
        let mut equal = 0;
        let mut different = 0;
        let mut missing_from_right = 0;
        let mut missing_from_left = 0;

        for outcome in &self.outcomes {
            match outcome.kind() {
                OutcomeKind::Equal => equal += 1,
                OutcomeKind::Different => different += 1,
                OutcomeKind::MissingFromRight => missing_from_right += 1,
                OutcomeKind::MissingFromLeft => missing_from_left += 1,
            }
        }

        Summary {
            total: self.outcomes.len(),
            equal,
            different,
            missing_from_right,
            missing_from_left,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Outcome counts for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub equal: usize,
    pub different: usize,
    pub missing_from_right: usize,
    pub missing_from_left: usize,
}
