/// Identity and equality decisions for one comparison.
///
/// `is_same` decides whether a left entry and a right entry denote the same
/// conceptual item; `is_equal` decides whether two items already judged the
/// same carry identical contents.
pub trait MatchPolicy<K, L, R = L> {
    /// True when the left and right entries denote the same conceptual item.
    fn is_same(&self, left_key: &K, right_key: &K, left: &L, right: &R) -> bool;

    /// True when the contents of two items are identical.
    /// Only ever called for pairs `is_same` accepted.
    fn is_equal(&self, left: &L, right: &R) -> bool;
}

/// Default policy: same item when the keys are equal, equal when the values
/// are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEquality;

impl<K, L, R> MatchPolicy<K, L, R> for KeyEquality
where
    K: PartialEq,
    L: PartialEq<R>,
{
    fn is_same(&self, left_key: &K, right_key: &K, _left: &L, _right: &R) -> bool {
        left_key == right_key
    }

    fn is_equal(&self, left: &L, right: &R) -> bool {
        left == right
    }
}
