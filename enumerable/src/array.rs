//! `RArray`, the concrete ordered collection.
//!
//! Holds a materialized sequence and hosts the operations that need one:
//! the combinatorial generators and eager ordering. Everything else goes
//! through [`RArray::lazy`].
//!
//! ```ignore
//! let a = rarray![1, 2, 3];
//! a.combination(2).to_array();   // [[1, 2], [1, 3], [2, 3]]
//! a.lazy().map(|x| x * 2).force();
//! ```

use crate::iter::{Combinations, Permutations, Product, RepeatedCombinations, RepeatedPermutations};
use crate::lazy::Lazy;
use crate::terminal;
use enumerable_core::{ElementKind, SeqResult, Value};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Build an [`RArray`] like `vec!`.
///
/// ```
/// use enumerable::rarray;
///
/// let a = rarray![1, 2, 3];
/// assert_eq!(a.len(), 3);
/// assert_eq!(rarray!["x"; 2].to_vec(), vec!["x", "x"]);
/// ```
#[macro_export]
macro_rules! rarray {
    () => {
        $crate::RArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::RArray::from(vec![$elem; $n])
    };
    ($($x:expr),+ $(,)?) => {
        $crate::RArray::from(vec![$($x),+])
    };
}

/// An ordered, growable array with Ruby's enumeration surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RArray<T>(Vec<T>);

impl<T> RArray<T> {
    /// Create an empty array.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty array with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append an element, Ruby's `<<`. Returns `self` for chaining.
    #[inline]
    pub fn push(&mut self, value: T) -> &mut Self {
        self.0.push(value);
        self
    }

    /// Unwrap into the backing vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Lazy view over borrowed elements.
    #[inline]
    pub fn lazy(&self) -> Lazy<std::slice::Iter<'_, T>> {
        Lazy::new(self.0.iter())
    }

    /// Lazy view that takes ownership of the elements.
    #[inline]
    pub fn into_lazy(self) -> Lazy<std::vec::IntoIter<T>> {
        Lazy::new(self.0.into_iter())
    }
}

// =============================================================================
// Combinatorics
// =============================================================================

impl<T: Clone> RArray<T> {
    /// Pool and length for a generator. A negative length selects nothing,
    /// expressed as an empty pool with length one.
    fn pool_for(&self, k: i64) -> (Vec<T>, usize) {
        match usize::try_from(k) {
            Ok(k) => (self.0.clone(), k),
            Err(_) => (Vec::new(), 1),
        }
    }

    /// Ordered arrangements of `k` distinct positions. Negative `k` yields
    /// nothing.
    pub fn permutation(&self, k: i64) -> Lazy<Permutations<T>> {
        let (pool, k) = self.pool_for(k);
        Lazy::new(Permutations::new(pool, k))
    }

    /// Every ordering of the whole array.
    pub fn permutation_all(&self) -> Lazy<Permutations<T>> {
        Lazy::new(Permutations::full(self.0.clone()))
    }

    /// Unordered selections of `k` distinct positions. Negative `k` yields
    /// nothing.
    pub fn combination(&self, k: i64) -> Lazy<Combinations<T>> {
        let (pool, k) = self.pool_for(k);
        Lazy::new(Combinations::new(pool, k))
    }

    /// Ordered arrangements of length `k` that may reuse positions.
    /// Negative `k` yields nothing.
    pub fn repeated_permutation(&self, k: i64) -> Lazy<RepeatedPermutations<T>> {
        let (pool, k) = self.pool_for(k);
        Lazy::new(RepeatedPermutations::new(pool, k))
    }

    /// Unordered selections of length `k` that may reuse positions.
    /// Negative `k` yields nothing.
    pub fn repeated_combination(&self, k: i64) -> Lazy<RepeatedCombinations<T>> {
        let (pool, k) = self.pool_for(k);
        Lazy::new(RepeatedCombinations::new(pool, k))
    }

    /// Cartesian product of this array with `others`, rightmost fastest.
    pub fn product<O>(&self, others: O) -> Lazy<Product<T>>
    where
        O: IntoIterator<Item = RArray<T>>,
    {
        let pools = std::iter::once(self.0.clone())
            .chain(others.into_iter().map(RArray::into_vec))
            .collect();
        Lazy::new(Product::new(pools))
    }
}

// =============================================================================
// Eager ordering
// =============================================================================

impl<T> RArray<T>
where
    T: Clone + PartialOrd + ElementKind,
{
    /// Sorted copy.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    pub fn sort(&self) -> SeqResult<RArray<T>> {
        terminal::sort(self.0.iter().cloned()).map(Self)
    }

    /// Sort in place, Ruby's `sort!`. On error the array is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    pub fn sort_in_place(&mut self) -> SeqResult<()> {
        self.0 = terminal::sort(self.0.iter().cloned())?;
        Ok(())
    }

    /// Smallest element.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    pub fn min(&self) -> SeqResult<Option<T>> {
        terminal::min(self.0.iter()).map(Option::<&T>::cloned)
    }

    /// Largest element.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    pub fn max(&self) -> SeqResult<Option<T>> {
        terminal::max(self.0.iter()).map(Option::<&T>::cloned)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> Deref for RArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> DerefMut for RArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for RArray<T> {
    #[inline]
    fn from(v: Vec<T>) -> Self {
        Self(v)
    }
}

impl<T: Clone> From<&[T]> for RArray<T> {
    #[inline]
    fn from(s: &[T]) -> Self {
        Self(s.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for RArray<T> {
    #[inline]
    fn from(a: [T; N]) -> Self {
        Self(Vec::from(a))
    }
}

impl<T> From<RArray<T>> for Vec<T> {
    #[inline]
    fn from(a: RArray<T>) -> Self {
        a.0
    }
}

impl<T: Into<Value>> From<RArray<T>> for Value {
    fn from(a: RArray<T>) -> Self {
        Value::from(a.0)
    }
}

impl<T> FromIterator<T> for RArray<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for RArray<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> IntoIterator for RArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for RArray<T> {
    #[inline]
    fn eq(&self, other: &Vec<T>) -> bool {
        self.0 == *other
    }
}

impl<T> ElementKind for RArray<T> {
    fn kind(&self) -> &'static str {
        "Array"
    }
}

/// Ruby `inspect` style: `[1, 2, 3]`.
impl<T: fmt::Display> fmt::Display for RArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarray_macro_forms() {
        let empty: RArray<i32> = rarray![];
        assert!(empty.is_empty());
        assert_eq!(rarray![0; 3], vec![0, 0, 0]);
        assert_eq!(rarray![1, 2, 3,].len(), 3);
    }

    #[test]
    fn test_push_chains() {
        let mut a = RArray::new();
        a.push(1).push(2);
        assert_eq!(a, vec![1, 2]);
    }

    #[test]
    fn test_lazy_views() {
        let a = rarray![1, 2, 3];
        let doubled = a.lazy().map(|x| x * 2).to_array();
        assert_eq!(doubled, rarray![2, 4, 6]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.into_lazy().reverse_each().to_array(), rarray![3, 2, 1]);
    }

    #[test]
    fn test_combination() {
        let a = rarray![1, 2, 3];
        assert_eq!(
            a.combination(2).to_array(),
            rarray![vec![1, 2], vec![1, 3], vec![2, 3]]
        );
        assert_eq!(a.combination(0).to_array(), rarray![Vec::<i32>::new()]);
        assert_eq!(a.combination(4).count(), 0);
        assert_eq!(a.combination(-1).count(), 0);
    }

    #[test]
    fn test_permutation() {
        let a = rarray!['a', 'b', 'c'];
        assert_eq!(a.permutation(2).count(), 6);
        assert_eq!(a.permutation_all().first(), Some(vec!['a', 'b', 'c']));
        assert_eq!(a.permutation(-2).count(), 0);
        assert_eq!(a.permutation(0).to_array(), rarray![Vec::<char>::new()]);
    }

    #[test]
    fn test_repeated_forms() {
        let a = rarray![0, 1];
        assert_eq!(
            a.repeated_permutation(2).to_array(),
            rarray![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
        assert_eq!(
            a.repeated_combination(2).to_array(),
            rarray![vec![0, 0], vec![0, 1], vec![1, 1]]
        );
        assert_eq!(a.repeated_combination(-1).count(), 0);
        assert_eq!(a.repeated_permutation(-1).count(), 0);
    }

    #[test]
    fn test_product() {
        let a = rarray!["a", "b"];
        let p = a.product([rarray!["c", "d"]]).to_array();
        assert_eq!(
            p,
            rarray![vec!["a", "c"], vec!["a", "d"], vec!["b", "c"], vec!["b", "d"]]
        );
        assert_eq!(a.product([RArray::new()]).count(), 0);
        assert_eq!(a.product(Vec::<RArray<&str>>::new()).count(), 2);
    }

    #[test]
    fn test_eager_ordering() {
        let a = rarray![Value::Int(3), Value::Float(0.5), Value::Int(2)];
        assert_eq!(
            a.sort().unwrap(),
            rarray![Value::Float(0.5), Value::Int(2), Value::Int(3)]
        );
        assert_eq!(a.min().unwrap(), Some(Value::Float(0.5)));
        assert_eq!(a.max().unwrap(), Some(Value::Int(3)));
    }

    #[test]
    fn test_sort_in_place_leaves_array_on_error() {
        let mut ok = rarray![3, 1, 2];
        ok.sort_in_place().unwrap();
        assert_eq!(ok, vec![1, 2, 3]);

        let mut bad = rarray![Value::Int(1), Value::str("a")];
        assert!(bad.sort_in_place().is_err());
        assert_eq!(bad.len(), 2);
    }

    #[test]
    fn test_conversions_and_display() {
        let a: RArray<i64> = (1..=3).collect();
        assert_eq!(a.to_string(), "[1, 2, 3]");
        let v: Value = a.clone().into();
        assert_eq!(v.to_string(), "[1, 2, 3]");
        let back: Vec<i64> = a.into();
        assert_eq!(back, vec![1, 2, 3]);
        assert_eq!(RArray::from([1, 2]), vec![1, 2]);
    }
}
