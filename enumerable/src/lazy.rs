//! The lazy enumerator facade.
//!
//! [`Lazy`] wraps any iterator and exposes Ruby's enumeration vocabulary as
//! chaining methods. Each chaining method wraps the current pipeline in one
//! more adapter and returns immediately; nothing is pulled until a terminal
//! operation (or plain iteration) asks for elements.
//!
//! ```ignore
//! let squares = (1..).lazy()
//!     .map(|x| x * x)
//!     .select(|x| x % 3 == 1)
//!     .first_n(3)?;            // [1, 4, 16]
//! ```
//!
//! Size arguments are `i64`, as in Ruby; invalid sizes are rejected when
//! the adapter is built, before any element is pulled.

use crate::array::RArray;
use crate::iter::{
    Chunk, ChunkWhile, Compact, Cycle, DropWhile, EachCons, EachSlice, Flatten, Grep, Reject,
    ReverseEach, SliceBy, SliceSide, TakeWhile, Uniq, WithIndex, Zip, ZipAll,
};
use crate::pattern::Pattern;
use crate::terminal::{self, OrderedMap};
use enumerable_core::error::non_negative_size;
use enumerable_core::{ElementKind, SeqResult};
use std::cmp::Ordering;
use std::hash::Hash;
use std::iter::{Filter, FilterMap, FlatMap, FusedIterator, Map, Skip, Take};

/// A lazily evaluated sequence.
///
/// Also an [`Iterator`], so it drops into `for` loops and std combinators.
/// The inherent methods take precedence over same-named `Iterator` methods
/// and follow Ruby's semantics.
#[derive(Debug, Clone)]
#[must_use = "lazy sequences do nothing unless pulled"]
pub struct Lazy<I> {
    iter: I,
}

impl<I: Iterator> Lazy<I> {
    /// Wrap an iterator. Performs no work.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self { iter }
    }

    /// Unwrap the underlying pipeline.
    #[inline]
    pub fn into_inner(self) -> I {
        self.iter
    }

    #[inline]
    fn wrap<J: Iterator>(iter: J) -> Lazy<J> {
        Lazy { iter }
    }

    // =========================================================================
    // Stateless adapters
    // =========================================================================

    /// Transform each element.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Lazy<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Self::wrap(self.iter.map(f))
    }

    /// Keep elements satisfying `pred`.
    #[inline]
    pub fn select<P>(self, pred: P) -> Lazy<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Self::wrap(self.iter.filter(pred))
    }

    /// Transform and keep the `Some` results.
    #[inline]
    pub fn filter_map<B, F>(self, f: F) -> Lazy<FilterMap<I, F>>
    where
        F: FnMut(I::Item) -> Option<B>,
    {
        Self::wrap(self.iter.filter_map(f))
    }

    /// Drop elements satisfying `pred`.
    #[inline]
    pub fn reject<P>(self, pred: P) -> Lazy<Reject<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Self::wrap(Reject::new(self.iter, pred))
    }

    /// Keep elements matching `pattern`.
    #[inline]
    pub fn grep<P: Pattern<I::Item>>(self, pattern: P) -> Lazy<Grep<I, P>> {
        Self::wrap(Grep::new(self.iter, pattern))
    }

    /// Keep elements not matching `pattern`.
    #[inline]
    pub fn grep_v<P: Pattern<I::Item>>(self, pattern: P) -> Lazy<Grep<I, P>> {
        Self::wrap(Grep::inverted(self.iter, pattern))
    }

    /// Leading elements while `pred` holds.
    #[inline]
    pub fn take_while<P>(self, pred: P) -> Lazy<TakeWhile<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Self::wrap(TakeWhile::new(self.iter, pred))
    }

    /// Everything after the leading run where `pred` holds.
    #[inline]
    pub fn drop_while<P>(self, pred: P) -> Lazy<DropWhile<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Self::wrap(DropWhile::new(self.iter, pred))
    }

    /// The first `n` elements.
    ///
    /// # Errors
    ///
    /// Returns an argument error for negative `n`.
    pub fn take(self, n: i64) -> SeqResult<Lazy<Take<I>>> {
        let n = non_negative_size(n, "take")?;
        Ok(Self::wrap(self.iter.take(n)))
    }

    /// Everything after the first `n` elements.
    ///
    /// # Errors
    ///
    /// Returns an argument error for negative `n`.
    pub fn drop(self, n: i64) -> SeqResult<Lazy<Skip<I>>> {
        let n = non_negative_size(n, "drop")?;
        Ok(Self::wrap(self.iter.skip(n)))
    }

    /// Map each element to a sequence and splice the sequences together.
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Lazy<FlatMap<I, U, F>>
    where
        U: IntoIterator,
        F: FnMut(I::Item) -> U,
    {
        Self::wrap(self.iter.flat_map(f))
    }

    /// Splice nested sequences together, one level deep.
    #[inline]
    pub fn flatten(self) -> Lazy<Flatten<I>>
    where
        I::Item: IntoIterator,
    {
        Self::wrap(Flatten::new(self.iter))
    }

    /// Pair each element with its index, counting from `offset`.
    #[inline]
    pub fn with_index(self, offset: i64) -> Lazy<WithIndex<I>> {
        Self::wrap(WithIndex::new(self.iter, offset))
    }

    /// Pair each element with its index, counting from zero.
    #[inline]
    pub fn each_with_index(self) -> Lazy<WithIndex<I>> {
        self.with_index(0)
    }

    /// Drop `None` elements and unwrap the rest.
    #[inline]
    pub fn compact<T>(self) -> Lazy<Compact<I>>
    where
        I: Iterator<Item = Option<T>>,
    {
        Self::wrap(Compact::new(self.iter))
    }

    /// Keep the first occurrence of each distinct element.
    #[allow(clippy::type_complexity)]
    pub fn uniq(self) -> Lazy<Uniq<I, fn(&I::Item) -> I::Item, I::Item>>
    where
        I::Item: Hash + Eq + Clone,
    {
        let identity: fn(&I::Item) -> I::Item = Clone::clone;
        Self::wrap(Uniq::new(self.iter, identity))
    }

    /// Keep the first element for each distinct key.
    #[inline]
    pub fn uniq_by<K, F>(self, key_fn: F) -> Lazy<Uniq<I, F, K>>
    where
        K: Hash + Eq,
        F: FnMut(&I::Item) -> K,
    {
        Self::wrap(Uniq::new(self.iter, key_fn))
    }

    // =========================================================================
    // Windowing
    // =========================================================================

    /// Overlapping windows of `n` consecutive elements.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `n` is zero or negative.
    pub fn each_cons(self, n: i64) -> SeqResult<Lazy<EachCons<I>>>
    where
        I::Item: Clone,
    {
        let size = usize::try_from(n).unwrap_or(0);
        Ok(Self::wrap(EachCons::new(self.iter, size)?))
    }

    /// Disjoint groups of `n` elements; the last may be shorter.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `n` is zero or negative.
    pub fn each_slice(self, n: i64) -> SeqResult<Lazy<EachSlice<I>>> {
        let size = usize::try_from(n).unwrap_or(0);
        Ok(Self::wrap(EachSlice::new(self.iter, size)?))
    }

    /// Maximal runs of adjacent elements sharing a key, as `(key, run)`.
    #[inline]
    pub fn chunk<K, F>(self, key_fn: F) -> Lazy<Chunk<I, F, K>>
    where
        F: FnMut(&I::Item) -> K,
        K: PartialEq,
    {
        Self::wrap(Chunk::new(self.iter, key_fn))
    }

    /// Runs of adjacent elements for which `pred(prev, next)` holds.
    #[inline]
    pub fn chunk_while<P>(self, pred: P) -> Lazy<ChunkWhile<I, P>>
    where
        P: FnMut(&I::Item, &I::Item) -> bool,
    {
        Self::wrap(ChunkWhile::chunk_while(self.iter, pred))
    }

    /// Split between adjacent elements where `pred(prev, next)` holds.
    #[inline]
    pub fn slice_when<P>(self, pred: P) -> Lazy<ChunkWhile<I, P>>
    where
        P: FnMut(&I::Item, &I::Item) -> bool,
    {
        Self::wrap(ChunkWhile::slice_when(self.iter, pred))
    }

    /// Start a new group at every element matching `pattern`.
    #[inline]
    pub fn slice_before<P: Pattern<I::Item>>(self, pattern: P) -> Lazy<SliceBy<I, P>> {
        Self::wrap(SliceBy::new(self.iter, pattern, SliceSide::Before))
    }

    /// End the current group at every element matching `pattern`.
    #[inline]
    pub fn slice_after<P: Pattern<I::Item>>(self, pattern: P) -> Lazy<SliceBy<I, P>> {
        Self::wrap(SliceBy::new(self.iter, pattern, SliceSide::After))
    }

    /// Elements back to front. Drains the source on the first pull.
    #[inline]
    pub fn reverse_each(self) -> Lazy<ReverseEach<I>> {
        Self::wrap(ReverseEach::new(self.iter))
    }

    // =========================================================================
    // Repetition
    // =========================================================================

    /// Repeat the sequence forever. An empty sequence stays empty.
    #[inline]
    pub fn cycle(self) -> Lazy<Cycle<I>>
    where
        I::Item: Clone,
    {
        Self::wrap(Cycle::new(self.iter))
    }

    /// Repeat the sequence `n` times. Zero or negative `n` yields nothing.
    #[inline]
    pub fn cycle_n(self, n: i64) -> Lazy<Cycle<I>>
    where
        I::Item: Clone,
    {
        Self::wrap(Cycle::laps(self.iter, n))
    }

    /// Pair with `other` position by position; `None` once `other` runs out.
    #[inline]
    pub fn zip<J: IntoIterator>(self, other: J) -> Lazy<Zip<I, J::IntoIter>> {
        Self::wrap(Zip::new(self.iter, other.into_iter()))
    }

    /// Pair with every sequence in `others` position by position.
    #[inline]
    pub fn zip_all<O, J>(self, others: O) -> Lazy<ZipAll<I, J::IntoIter>>
    where
        O: IntoIterator<Item = J>,
        J: IntoIterator,
    {
        Self::wrap(ZipAll::new(self.iter, others))
    }

    // =========================================================================
    // Terminal operations
    // =========================================================================

    /// Drain into an array.
    pub fn to_array(self) -> RArray<I::Item> {
        self.iter.collect()
    }

    /// Drain into an array; the name Ruby's lazy enumerators use.
    #[inline]
    pub fn force(self) -> RArray<I::Item> {
        self.to_array()
    }

    /// Number of elements.
    #[inline]
    pub fn count(self) -> usize {
        terminal::count(self.iter)
    }

    /// Number of elements satisfying `pred`.
    #[inline]
    pub fn count_if<P>(self, pred: P) -> usize
    where
        P: FnMut(&I::Item) -> bool,
    {
        terminal::count_if(self.iter, pred)
    }

    /// Combine left to right, seeded with the first element.
    #[inline]
    pub fn reduce<F>(self, f: F) -> Option<I::Item>
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        terminal::reduce(self.iter, f)
    }

    /// Combine left to right, seeded with `init`.
    #[inline]
    pub fn inject<A, F>(self, init: A, f: F) -> A
    where
        F: FnMut(A, I::Item) -> A,
    {
        terminal::inject(self.iter, init, f)
    }

    /// Sum of the elements.
    #[inline]
    pub fn sum<S: std::iter::Sum<I::Item>>(self) -> S {
        terminal::sum(self.iter)
    }

    /// Feed each element and a mutable memo to `f`; return the memo.
    #[inline]
    pub fn each_with_object<M, F>(self, memo: M, f: F) -> M
    where
        F: FnMut(I::Item, &mut M),
    {
        terminal::each_with_object(self.iter, memo, f)
    }

    /// First element, if any.
    #[inline]
    pub fn first(self) -> Option<I::Item> {
        terminal::first(self.iter)
    }

    /// Up to `n` leading elements.
    ///
    /// # Errors
    ///
    /// Returns an argument error for negative `n`.
    #[inline]
    pub fn first_n(self, n: i64) -> SeqResult<RArray<I::Item>> {
        terminal::first_n(self.iter, n).map(RArray::from)
    }

    /// First element satisfying `pred`.
    #[inline]
    pub fn find<P>(self, pred: P) -> Option<I::Item>
    where
        P: FnMut(&I::Item) -> bool,
    {
        terminal::find(self.iter, pred)
    }

    /// Returns true if some element equals `value`.
    #[inline]
    pub fn include(self, value: &I::Item) -> bool
    where
        I::Item: PartialEq,
    {
        terminal::include(self.iter, value)
    }

    /// Split into (accepted, rejected).
    #[inline]
    pub fn partition<P>(self, pred: P) -> (RArray<I::Item>, RArray<I::Item>)
    where
        P: FnMut(&I::Item) -> bool,
    {
        let (yes, no) = terminal::partition(self.iter, pred);
        (yes.into(), no.into())
    }

    /// Group by key, keys in first-seen order.
    #[inline]
    pub fn group_by<K, F>(self, key_fn: F) -> OrderedMap<K, Vec<I::Item>>
    where
        K: Hash + Eq,
        F: FnMut(&I::Item) -> K,
    {
        terminal::group_by(self.iter, key_fn)
    }

    /// Occurrence count per distinct element.
    #[inline]
    pub fn tally(self) -> OrderedMap<I::Item, usize>
    where
        I::Item: Hash + Eq,
    {
        terminal::tally(self.iter)
    }

    /// Sorted array.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    #[inline]
    pub fn sort(self) -> SeqResult<RArray<I::Item>>
    where
        I::Item: PartialOrd + ElementKind,
    {
        terminal::sort(self.iter).map(RArray::from)
    }

    /// Array sorted by a derived key.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first pair of incomparable keys.
    #[inline]
    pub fn sort_by<K, F>(self, key_fn: F) -> SeqResult<RArray<I::Item>>
    where
        K: PartialOrd + ElementKind,
        F: FnMut(&I::Item) -> K,
    {
        terminal::sort_by(self.iter, key_fn).map(RArray::from)
    }

    /// Array sorted by a caller-supplied total order.
    #[inline]
    pub fn sort_with<F>(self, cmp: F) -> RArray<I::Item>
    where
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        terminal::sort_with(self.iter, cmp).into()
    }

    /// Smallest element.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    #[inline]
    pub fn min(self) -> SeqResult<Option<I::Item>>
    where
        I::Item: PartialOrd + ElementKind,
    {
        terminal::min(self.iter)
    }

    /// Largest element.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    #[inline]
    pub fn max(self) -> SeqResult<Option<I::Item>>
    where
        I::Item: PartialOrd + ElementKind,
    {
        terminal::max(self.iter)
    }

    /// Element with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first pair of incomparable keys.
    #[inline]
    pub fn min_by<K, F>(self, key_fn: F) -> SeqResult<Option<I::Item>>
    where
        K: PartialOrd + ElementKind,
        F: FnMut(&I::Item) -> K,
    {
        terminal::min_by(self.iter, key_fn)
    }

    /// Element with the largest key.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first pair of incomparable keys.
    #[inline]
    pub fn max_by<K, F>(self, key_fn: F) -> SeqResult<Option<I::Item>>
    where
        K: PartialOrd + ElementKind,
        F: FnMut(&I::Item) -> K,
    {
        terminal::max_by(self.iter, key_fn)
    }

    /// Smallest and largest element.
    ///
    /// # Errors
    ///
    /// Returns a comparison error at the first incomparable pair.
    #[inline]
    pub fn minmax(self) -> SeqResult<Option<(I::Item, I::Item)>>
    where
        I::Item: PartialOrd + ElementKind + Clone,
    {
        terminal::minmax(self.iter)
    }
}

impl<I: Iterator> Iterator for Lazy<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: FusedIterator> FusedIterator for Lazy<I> {}

// =============================================================================
// Enumerable
// =============================================================================

/// Entry point to the lazy facade for every iterator.
pub trait Enumerable: Iterator + Sized {
    /// View this iterator as a [`Lazy`] sequence.
    #[inline]
    fn lazy(self) -> Lazy<Self> {
        Lazy::new(self)
    }
}

impl<I: Iterator> Enumerable for I {}

// =============================================================================
// Tests
// =============================================================================
