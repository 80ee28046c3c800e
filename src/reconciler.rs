use std::convert::Infallible;
use std::rc::Rc;

use crate::policy::{KeyEquality, MatchPolicy};

type IdentityFn<'h, K, L, R> = Box<dyn Fn(&K, &K, &L, &R) -> bool + 'h>;
type EqualityFn<'h, L, R> = Box<dyn Fn(&L, &R) -> bool + 'h>;
type PairHandler<'h, L, R, E> = Box<dyn FnMut(&L, &R) -> Result<(), E> + 'h>;
type ItemHandler<'h, V, E> = Box<dyn FnMut(&V) -> Result<(), E> + 'h>;

/// Matches entries across two keyed collections and dispatches one callback
/// per outcome.
///
/// Holds only configuration (predicates + handlers); per-call state does not
/// survive a [`compare`](Reconciler::compare) invocation, so one value can be
/// reused across many comparisons. Every handler is optional; an unset
/// handler skips its outcome silently.
///
/// `E` is the caller's callback error type; handlers that cannot fail use
/// [`Infallible`] and return `Ok(())`.
pub struct Reconciler<'h, K, L, R = L, E = Infallible> {
    is_same: IdentityFn<'h, K, L, R>,
    is_equal: EqualityFn<'h, L, R>,
    on_equal: Option<PairHandler<'h, L, R, E>>,
    on_different: Option<PairHandler<'h, L, R, E>>,
    on_missing_right: Option<ItemHandler<'h, L, E>>,
    on_missing_left: Option<ItemHandler<'h, R, E>>,
}

impl<'h, K, L, R, E> Reconciler<'h, K, L, R, E>
where
    K: PartialEq,
    L: PartialEq<R>,
{
    /// Reconciler with the default [`KeyEquality`] policy and no handlers.
    pub fn new() -> Self {
        Self::with_policy(KeyEquality)
    }
}

impl<'h, K, L, R, E> Default for Reconciler<'h, K, L, R, E>
where
    K: PartialEq,
    L: PartialEq<R>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, K, L, R, E> Reconciler<'h, K, L, R, E> {
    /// Reconciler whose identity and equality decisions come from `policy`.
    ///
    /// Equivalent to [`Reconciler::new`] followed by
    /// [`identity`](Reconciler::identity) and
    /// [`equality`](Reconciler::equality) with the policy's two methods; both
    /// construction paths drive the same comparison pass.
    pub fn with_policy<P>(policy: P) -> Self
    where
        P: MatchPolicy<K, L, R> + 'h,
    {
        let policy = Rc::new(policy);
        let same = Rc::clone(&policy);
        Self {
            is_same: Box::new(move |k1, k2, l, r| same.is_same(k1, k2, l, r)),
            is_equal: Box::new(move |l, r| policy.is_equal(l, r)),
            on_equal: None,
            on_different: None,
            on_missing_right: None,
            on_missing_left: None,
        }
    }

    /// Replace the identity predicate: does a left entry and a right entry
    /// denote the same conceptual item? Called in (left, right) argument
    /// order only. Last call wins.
    pub fn identity(mut self, f: impl Fn(&K, &K, &L, &R) -> bool + 'h) -> Self {
        self.is_same = Box::new(f);
        self
    }

    /// Replace the equality predicate: do two items already judged the same
    /// carry identical contents? Last call wins.
    pub fn equality(mut self, f: impl Fn(&L, &R) -> bool + 'h) -> Self {
        self.is_equal = Box::new(f);
        self
    }

    /// Handler for a pair judged the same and equal. Last call wins.
    pub fn on_equal(mut self, f: impl FnMut(&L, &R) -> Result<(), E> + 'h) -> Self {
        self.on_equal = Some(Box::new(f));
        self
    }

    /// Handler for a pair judged the same but with differing contents.
    /// Last call wins.
    pub fn on_different(mut self, f: impl FnMut(&L, &R) -> Result<(), E> + 'h) -> Self {
        self.on_different = Some(Box::new(f));
        self
    }

    /// Handler for a left item with no identity match on the right.
    /// Last call wins.
    pub fn on_missing_right(mut self, f: impl FnMut(&L) -> Result<(), E> + 'h) -> Self {
        self.on_missing_right = Some(Box::new(f));
        self
    }

    /// Handler for a right item with no identity match on the left.
    /// Last call wins.
    pub fn on_missing_left(mut self, f: impl FnMut(&R) -> Result<(), E> + 'h) -> Self {
        self.on_missing_left = Some(Box::new(f));
        self
    }

    /// Run one comparison, dispatching handlers as outcomes are discovered.
    ///
    /// Left entries are visited in order; each is classified against the
    /// first right entry the identity predicate accepts (first match wins,
    /// ambiguity is the caller's responsibility). A second pass reports right
    /// entries no left entry matched; pairs classified in the first pass are
    /// not re-reported. Full pairwise scan: O(|left| × |right|) predicate
    /// calls.
    ///
    /// The first handler error aborts the remaining scan and is returned
    /// as-is; handlers already invoked stay invoked.
    pub fn compare(&mut self, left: &[(K, L)], right: &[(K, R)]) -> Result<(), E> {
        for (k1, item1) in left {
            let hit = right
                .iter()
                .find(|(k2, item2)| (self.is_same)(k1, k2, item1, item2));
            match hit {
                Some((_, item2)) => {
                    if (self.is_equal)(item1, item2) {
                        if let Some(f) = self.on_equal.as_mut() {
                            f(item1, item2)?;
                        }
                    } else if let Some(f) = self.on_different.as_mut() {
                        f(item1, item2)?;
                    }
                }
                None => {
                    if let Some(f) = self.on_missing_right.as_mut() {
                        f(item1)?;
                    }
                }
            }
        }

        for (k2, item2) in right {
            if left
                .iter()
                .any(|(k1, item1)| (self.is_same)(k1, k2, item1, item2))
            {
                continue;
            }
            if let Some(f) = self.on_missing_left.as_mut() {
                f(item2)?;
            }
        }

        Ok(())
    }
}
