//! Stateless and near-stateless adapters.
//!
//! Provides `Reject`, `Grep`, `TakeWhile`, `DropWhile`, `Flatten`,
//! `WithIndex`, `Compact` and `Uniq`. Mapping, filtering, `take`, `drop`
//! and `flat_map` reuse the standard library adapters directly.
//!
//! # Performance Characteristics
//!
//! Each adapter inspects at most one upstream element per downstream pull,
//! except the skipping adapters (`Reject`, `Grep`, `DropWhile`, `Compact`,
//! `Uniq`), which keep pulling until an element survives. `Uniq` is the only
//! one that retains state proportional to the input: the set of keys seen.

use crate::pattern::Pattern;
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::Hash;

// =============================================================================
// Reject
// =============================================================================

/// Yields elements for which the predicate returns false.
///
/// Equivalent to Ruby's `Enumerable#reject`, the complement of `select`.
///
/// # Performance
///
/// - O(1) per yielded element (amortized)
/// - O(1) space overhead
#[derive(Debug, Clone)]
pub struct Reject<I, P> {
    iter: I,
    predicate: P,
}

impl<I, P> Reject<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    /// Create a new reject adapter.
    #[inline]
    pub fn new(iter: I, predicate: P) -> Self {
        Self { iter, predicate }
    }
}

impl<I, P> Iterator for Reject<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        loop {
            let val = self.iter.next()?;
            if !(self.predicate)(&val) {
                return Some(val);
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, P> std::iter::FusedIterator for Reject<I, P>
where
    I: std::iter::FusedIterator,
    P: FnMut(&I::Item) -> bool,
{
}

// =============================================================================
// Grep
// =============================================================================

/// Yields elements matching (or, inverted, not matching) a pattern.
///
/// Equivalent to Ruby's `grep(pattern)` and `grep_v(pattern)`.
#[derive(Debug, Clone)]
pub struct Grep<I, P> {
    iter: I,
    pattern: P,
    invert: bool,
}

impl<I, P> Grep<I, P>
where
    I: Iterator,
    P: Pattern<I::Item>,
{
    /// Keep elements matching `pattern`.
    #[inline]
    pub fn new(iter: I, pattern: P) -> Self {
        Self {
            iter,
            pattern,
            invert: false,
        }
    }

    /// Keep elements not matching `pattern`.
    #[inline]
    pub fn inverted(iter: I, pattern: P) -> Self {
        Self {
            iter,
            pattern,
            invert: true,
        }
    }
}

impl<I, P> Iterator for Grep<I, P>
where
    I: Iterator,
    P: Pattern<I::Item>,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        loop {
            let val = self.iter.next()?;
            if self.pattern.matches(&val) != self.invert {
                return Some(val);
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, P> std::iter::FusedIterator for Grep<I, P>
where
    I: std::iter::FusedIterator,
    P: Pattern<I::Item>,
{
}

// =============================================================================
// TakeWhile
// =============================================================================

/// Yields elements from the front while the predicate is true.
///
/// Equivalent to Ruby's `take_while`.
///
/// # Performance
///
/// - O(1) per `next()`: a single predicate evaluation
/// - Stops immediately on first false predicate; the failing element is
///   consumed from upstream and discarded
#[derive(Debug, Clone)]
pub struct TakeWhile<I, P> {
    iter: I,
    predicate: P,
    done: bool,
}

impl<I, P> TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    /// Create a new take-while adapter.
    #[inline]
    pub fn new(iter: I, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            done: false,
        }
    }
}

impl<I, P> Iterator for TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        let val = self.iter.next()?;
        if (self.predicate)(&val) {
            Some(val)
        } else {
            self.done = true;
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, P> std::iter::FusedIterator for TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
}

// =============================================================================
// DropWhile
// =============================================================================

/// Drops elements from the front while the predicate is true.
///
/// Equivalent to Ruby's `drop_while`.
///
/// # Performance
///
/// - Skipping phase: O(k) where k = elements dropped
/// - After skip: O(1) per `next()`, predicate no longer called
#[derive(Debug, Clone)]
pub struct DropWhile<I, P> {
    iter: I,
    predicate: P,
    dropping: bool,
}

impl<I, P> DropWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    /// Create a new drop-while adapter.
    #[inline]
    pub fn new(iter: I, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            dropping: true,
        }
    }
}

impl<I, P> Iterator for DropWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        if self.dropping {
            loop {
                let val = self.iter.next()?;
                if !(self.predicate)(&val) {
                    self.dropping = false;
                    return Some(val);
                }
            }
        } else {
            self.iter.next()
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.dropping {
            (0, self.iter.size_hint().1)
        } else {
            self.iter.size_hint()
        }
    }
}

impl<I, P> std::iter::FusedIterator for DropWhile<I, P>
where
    I: std::iter::FusedIterator,
    P: FnMut(&I::Item) -> bool,
{
}

// =============================================================================
// Flatten
// =============================================================================

/// Flattens exactly one level of nesting.
///
/// Equivalent to Ruby's `flat_map` result or `flatten(1)`.
///
/// # Performance
///
/// - O(1) per element (amortized)
/// - Lazy: holds one inner iterator at a time
pub struct Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    outer: I,
    inner: Option<<I::Item as IntoIterator>::IntoIter>,
}

impl<I> Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    /// Create a new flatten adapter.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self {
            outer: iter,
            inner: None,
        }
    }
}

impl<I> Clone for Flatten<I>
where
    I: Iterator + Clone,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::IntoIter: Clone,
{
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<I> fmt::Debug for Flatten<I>
where
    I: Iterator + fmt::Debug,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::IntoIter: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flatten")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<I> Iterator for Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    type Item = <I::Item as IntoIterator>::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(val) = self.inner.as_mut().and_then(Iterator::next) {
                return Some(val);
            }
            self.inner = Some(self.outer.next()?.into_iter());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (inner_lo, inner_hi) = self
            .inner
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint);
        match self.outer.size_hint() {
            (_, Some(0)) => (inner_lo, inner_hi),
            _ => (inner_lo, None),
        }
    }
}

// =============================================================================
// WithIndex
// =============================================================================

/// Pairs each element with its position, starting from `offset`.
///
/// Equivalent to Ruby's `each_with_index` / `with_index(offset)`.
#[derive(Debug, Clone)]
pub struct WithIndex<I> {
    iter: I,
    index: i64,
}

impl<I: Iterator> WithIndex<I> {
    /// Create an indexing adapter starting at `offset`.
    #[inline]
    pub fn new(iter: I, offset: i64) -> Self {
        Self {
            iter,
            index: offset,
        }
    }
}

impl<I: Iterator> Iterator for WithIndex<I> {
    type Item = (I::Item, i64);

    #[inline]
    fn next(&mut self) -> Option<(I::Item, i64)> {
        let val = self.iter.next()?;
        let index = self.index;
        self.index += 1;
        Some((val, index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: ExactSizeIterator> ExactSizeIterator for WithIndex<I> {}

// =============================================================================
// Compact
// =============================================================================

/// Drops absent elements (`None`) and unwraps the rest.
///
/// Equivalent to Ruby's `compact`.
#[derive(Debug, Clone)]
pub struct Compact<I> {
    iter: I,
}

impl<I, T> Compact<I>
where
    I: Iterator<Item = Option<T>>,
{
    /// Create a compacting adapter.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I, T> Iterator for Compact<I>
where
    I: Iterator<Item = Option<T>>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.by_ref().flatten().next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, T> std::iter::FusedIterator for Compact<I>
where
    I: std::iter::FusedIterator<Item = Option<T>>,
{
}

// =============================================================================
// Uniq
// =============================================================================

/// Yields the first element for each distinct key, preserving order.
///
/// Equivalent to Ruby's `uniq { |x| key }`.
///
/// # Performance
///
/// - O(1) expected per element (FxHashSet lookup)
/// - O(u) space where u = number of distinct keys
#[derive(Debug, Clone)]
pub struct Uniq<I, F, K> {
    iter: I,
    key_fn: F,
    seen: FxHashSet<K>,
}

impl<I, F, K> Uniq<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    /// Create a de-duplicating adapter keyed by `key_fn`.
    #[inline]
    pub fn new(iter: I, key_fn: F) -> Self {
        Self {
            iter,
            key_fn,
            seen: FxHashSet::default(),
        }
    }
}

impl<I, F, K> Iterator for Uniq<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        loop {
            let val = self.iter.next()?;
            if self.seen.insert((self.key_fn)(&val)) {
                return Some(val);
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        (usize::from(lo > 0 && self.seen.is_empty()), hi)
    }
}

impl<I, F, K> std::iter::FusedIterator for Uniq<I, F, K>
where
    I: std::iter::FusedIterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
}

// =============================================================================
// Tests
// =============================================================================
