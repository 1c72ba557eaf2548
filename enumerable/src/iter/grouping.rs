//! Grouping and windowing adapters.
//!
//! Provides `EachCons`, `EachSlice`, `Chunk`, `ChunkWhile`, `SliceBy`
//! (before or after a match) and `ReverseEach`: adapters that group
//! adjacent elements by window, batch size, key or pattern.
//!
//! # Performance Characteristics
//!
//! | Adapter | Time per `next()` | Space |
//! |---------|-------------------|-------|
//! | `EachCons` | O(n) snapshot | O(n) window |
//! | `EachSlice` | O(n) | O(n) per slice |
//! | `Chunk` | O(group_size) | O(group_size) current group |
//! | `ChunkWhile` | O(group_size) | O(group_size) current group |
//! | `SliceBefore` / `SliceAfter` | O(group_size) | O(group_size) |
//! | `ReverseEach` | O(len) first pull, then O(1) | O(len) |
//!
//! Every buffer is owned by its adapter and handed to the caller when the
//! group is emitted. Sizes are validated when the adapter is built, before
//! any element is pulled.

use crate::pattern::Pattern;
use enumerable_core::{SeqError, SeqResult};
use std::collections::VecDeque;

// =============================================================================
// EachCons
// =============================================================================

/// Overlapping sliding window of size `n`.
///
/// Equivalent to Ruby's `Enumerable#each_cons(n)`.
///
/// `each_cons([1,2,3,4,5], 3)` → `[1,2,3], [2,3,4], [3,4,5]`
///
/// # Performance
///
/// - O(1) window maintenance per `next()` after the initial fill
///   (VecDeque push/pop), plus an O(n) snapshot
/// - O(n) space for the window
#[derive(Debug, Clone)]
pub struct EachCons<I: Iterator> {
    iter: I,
    window: VecDeque<I::Item>,
    size: usize,
    filled: bool,
}

impl<I> EachCons<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Create a new sliding window of size `n`.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `size` is 0.
    pub fn new(iter: I, size: usize) -> SeqResult<Self> {
        if size == 0 {
            return Err(SeqError::argument("invalid size"));
        }
        Ok(Self {
            iter,
            window: VecDeque::with_capacity(size),
            size,
            filled: false,
        })
    }
}

impl<I> Iterator for EachCons<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        if self.filled {
            // Slide: pop front, push back
            let next_val = self.iter.next()?;
            self.window.pop_front();
            self.window.push_back(next_val);
        } else {
            while self.window.len() < self.size {
                self.window.push_back(self.iter.next()?);
            }
            self.filled = true;
        }
        Some(self.window.iter().cloned().collect())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        if self.filled {
            (lo, hi)
        } else {
            // Windows still owed = buffered + upstream - size + 1
            let pending = self.window.len() + 1;
            let need = self.size;
            let lo = lo.saturating_add(pending).saturating_sub(need);
            let hi = hi
                .and_then(|h| h.checked_add(pending))
                .map(|h| h.saturating_sub(need));
            (lo, hi)
        }
    }
}

impl<I> std::iter::FusedIterator for EachCons<I>
where
    I: std::iter::FusedIterator,
    I::Item: Clone,
{
}

// =============================================================================
// EachSlice
// =============================================================================

/// Disjoint fixed-size slices.
///
/// Equivalent to Ruby's `Enumerable#each_slice(n)`.
///
/// The last slice may be shorter than `n` if the source is exhausted.
///
/// # Performance
///
/// - O(n) per `next()` where n = slice size
/// - O(n) space for the current slice
#[derive(Debug, Clone)]
pub struct EachSlice<I> {
    iter: I,
    size: usize,
    done: bool,
}

impl<I: Iterator> EachSlice<I> {
    /// Create a new slicing adapter.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `size` is 0.
    pub fn new(iter: I, size: usize) -> SeqResult<Self> {
        if size == 0 {
            return Err(SeqError::argument("invalid slice size"));
        }
        Ok(Self {
            iter,
            size,
            done: false,
        })
    }
}

impl<I: Iterator> Iterator for EachSlice<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        if self.done {
            return None;
        }

        let mut slice = Vec::with_capacity(self.size);
        for _ in 0..self.size {
            match self.iter.next() {
                Some(val) => slice.push(val),
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if slice.is_empty() { None } else { Some(slice) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lo, hi) = self.iter.size_hint();
        (lo.div_ceil(self.size), hi.map(|h| h.div_ceil(self.size)))
    }
}

impl<I: Iterator> std::iter::FusedIterator for EachSlice<I> {}

// =============================================================================
// Chunk
// =============================================================================

/// Groups maximal runs of adjacent elements sharing a key.
///
/// Equivalent to Ruby's `Enumerable#chunk { |x| key }`.
///
/// Yields `(key, group)` pairs. A key change starts a new group
/// immediately; non-adjacent runs with the same key are never merged.
///
/// # Performance
///
/// - O(n) total over all elements; each element is consumed exactly once
///   and its key computed exactly once
/// - O(k) space where k = size of the largest group
#[derive(Debug, Clone)]
pub struct Chunk<I: Iterator, F, K> {
    iter: I,
    key_fn: F,
    /// First element of the next group, with its key already computed.
    pending: Option<(K, I::Item)>,
}

impl<I, F, K> Chunk<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: PartialEq,
{
    /// Create a new chunking adapter.
    #[inline]
    pub fn new(iter: I, key_fn: F) -> Self {
        Self {
            iter,
            key_fn,
            pending: None,
        }
    }
}

impl<I, F, K> Iterator for Chunk<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: PartialEq,
{
    type Item = (K, Vec<I::Item>);

    fn next(&mut self) -> Option<(K, Vec<I::Item>)> {
        let (key, first) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let first = self.iter.next()?;
                ((self.key_fn)(&first), first)
            }
        };

        let mut group = vec![first];
        for val in self.iter.by_ref() {
            let next_key = (self.key_fn)(&val);
            if next_key == key {
                group.push(val);
            } else {
                self.pending = Some((next_key, val));
                break;
            }
        }

        Some((key, group))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let extra = usize::from(self.pending.is_some());
        // At least one group when anything remains, at most one per element
        (
            usize::from(lo.saturating_add(extra) > 0),
            hi.and_then(|h| h.checked_add(extra)),
        )
    }
}

impl<I, F, K> std::iter::FusedIterator for Chunk<I, F, K>
where
    I: std::iter::FusedIterator,
    F: FnMut(&I::Item) -> K,
    K: PartialEq,
{
}

// =============================================================================
// ChunkWhile
// =============================================================================

/// Splits between adjacent elements according to a pairwise predicate.
///
/// With `split_when == false` this is Ruby's `chunk_while { |a, b| … }`
/// (keep together while the predicate holds); with `split_when == true` it
/// is `slice_when { |a, b| … }` (split where the predicate holds).
#[derive(Debug, Clone)]
pub struct ChunkWhile<I: Iterator, P> {
    iter: I,
    predicate: P,
    split_when: bool,
    /// First element of the next group.
    pending: Option<I::Item>,
}

impl<I, P> ChunkWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item, &I::Item) -> bool,
{
    /// Keep adjacent elements together while `predicate(prev, next)` holds.
    #[inline]
    pub fn chunk_while(iter: I, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            split_when: false,
            pending: None,
        }
    }

    /// Split between adjacent elements where `predicate(prev, next)` holds.
    #[inline]
    pub fn slice_when(iter: I, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            split_when: true,
            pending: None,
        }
    }
}

impl<I, P> Iterator for ChunkWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item, &I::Item) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        let first = match self.pending.take() {
            Some(val) => val,
            None => self.iter.next()?,
        };

        let mut group = vec![first];
        for val in self.iter.by_ref() {
            let joined = group
                .last()
                .is_some_and(|prev| (self.predicate)(prev, &val) != self.split_when);
            if joined {
                group.push(val);
            } else {
                self.pending = Some(val);
                break;
            }
        }
        Some(group)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let extra = usize::from(self.pending.is_some());
        (
            usize::from(lo.saturating_add(extra) > 0),
            hi.and_then(|h| h.checked_add(extra)),
        )
    }
}

impl<I, P> std::iter::FusedIterator for ChunkWhile<I, P>
where
    I: std::iter::FusedIterator,
    P: FnMut(&I::Item, &I::Item) -> bool,
{
}

// =============================================================================
// SliceBefore / SliceAfter
// =============================================================================

/// Where a matching element splits a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceSide {
    /// A match opens a new group that starts with it.
    Before,
    /// A match closes the current group, ending with it.
    After,
}

/// Splits a sequence into groups at elements matching a pattern.
///
/// Equivalent to Ruby's `slice_before(pattern)` and `slice_after(pattern)`.
///
/// For `Before`, the first element always opens the first group, and every
/// later match starts a new group. For `After`, every match ends the group
/// it belongs to. The final group is emitted when the source runs dry.
#[derive(Debug, Clone)]
pub struct SliceBy<I: Iterator, P> {
    iter: I,
    pattern: P,
    side: SliceSide,
    /// Element that opened the next group (`Before` only).
    carry: Option<I::Item>,
}

impl<I, P> SliceBy<I, P>
where
    I: Iterator,
    P: Pattern<I::Item>,
{
    /// Create a splitting adapter.
    #[inline]
    pub fn new(iter: I, pattern: P, side: SliceSide) -> Self {
        Self {
            iter,
            pattern,
            side,
            carry: None,
        }
    }
}

impl<I, P> Iterator for SliceBy<I, P>
where
    I: Iterator,
    P: Pattern<I::Item>,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        let mut group = Vec::new();
        match self.side {
            SliceSide::Before => {
                group.push(match self.carry.take() {
                    Some(val) => val,
                    None => self.iter.next()?,
                });
                for val in self.iter.by_ref() {
                    if self.pattern.matches(&val) {
                        self.carry = Some(val);
                        break;
                    }
                    group.push(val);
                }
            }
            SliceSide::After => {
                for val in self.iter.by_ref() {
                    let closes = self.pattern.matches(&val);
                    group.push(val);
                    if closes {
                        break;
                    }
                }
            }
        }

        if group.is_empty() { None } else { Some(group) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let extra = usize::from(self.carry.is_some());
        (
            usize::from(lo.saturating_add(extra) > 0),
            hi.and_then(|h| h.checked_add(extra)),
        )
    }
}

impl<I, P> std::iter::FusedIterator for SliceBy<I, P>
where
    I: std::iter::FusedIterator,
    P: Pattern<I::Item>,
{
}

// =============================================================================
// ReverseEach
// =============================================================================

/// Emits the source back to front.
///
/// Equivalent to Ruby's `reverse_each`. Building the adapter is free; the
/// first pull drains the entire source into a buffer, so an infinite
/// source never yields.
#[derive(Debug, Clone)]
pub struct ReverseEach<I: Iterator> {
    source: Option<I>,
    buffer: Vec<I::Item>,
}

impl<I: Iterator> ReverseEach<I> {
    /// Create a reversing adapter. Nothing is pulled yet.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self {
            source: Some(iter),
            buffer: Vec::new(),
        }
    }

    fn drain_source(&mut self) {
        if let Some(source) = self.source.take() {
            self.buffer = source.collect();
            tracing::debug!(len = self.buffer.len(), "reverse_each drained source");
        }
    }
}

impl<I: Iterator> Iterator for ReverseEach<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        self.drain_source();
        self.buffer.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Some(source) => source.size_hint(),
            None => (self.buffer.len(), Some(self.buffer.len())),
        }
    }
}

impl<I: Iterator> std::iter::FusedIterator for ReverseEach<I> {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // EachCons tests
    // =========================================================================

    #[test]
    fn test_each_cons_basic() {
        let result: Vec<Vec<i64>> = EachCons::new(1..=5, 3).unwrap().collect();
        assert_eq!(result, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
    }

    #[test]
    fn test_each_cons_too_short() {
        let c = EachCons::new(1..=2, 3).unwrap();
        assert_eq!(c.size_hint(), (0, Some(0)));
        assert_eq!(c.count(), 0);
    }

    #[test]
    fn test_each_cons_size_one() {
        let result: Vec<Vec<char>> = EachCons::new("ab".chars(), 1).unwrap().collect();
        assert_eq!(result, vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn test_each_cons_zero_rejected() {
        let err = EachCons::new(1..=5, 0).unwrap_err();
        assert_eq!(err, SeqError::argument("invalid size"));
    }

    #[test]
    fn test_each_cons_size_hint() {
        let mut c = EachCons::new(1..=6, 4).unwrap();
        assert_eq!(c.size_hint(), (3, Some(3)));
        c.next();
        assert_eq!(c.size_hint(), (2, Some(2)));
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn test_each_cons_infinite_source() {
        let first: Vec<Vec<u32>> = EachCons::new(0.., 2).unwrap().take(3).collect();
        assert_eq!(first, vec![vec![0, 1], vec![1, 2], vec![2, 3]]);
    }

    #[test]
    fn test_each_cons_unbounded_size_hint() {
        let mut cons = EachCons::new(1_u64.., 3).unwrap();
        assert_eq!(cons.size_hint(), (usize::MAX - 2, None));
        let windows: Vec<Vec<u64>> = cons.by_ref().take(6).collect();
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[5], vec![6, 7, 8]);
        assert_eq!(cons.size_hint(), (usize::MAX, None));
    }

    // =========================================================================
    // EachSlice tests
    // =========================================================================

    #[test]
    fn test_each_slice_exact() {
        let result: Vec<Vec<i64>> = EachSlice::new(1..=6, 2).unwrap().collect();
        assert_eq!(result, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_each_slice_partial_last() {
        let result: Vec<Vec<i64>> = EachSlice::new(1..=7, 3).unwrap().collect();
        assert_eq!(result, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn test_each_slice_empty() {
        let s = EachSlice::new(std::iter::empty::<i64>(), 3).unwrap();
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_each_slice_zero_rejected() {
        assert!(EachSlice::new(1..=3, 0).is_err());
    }

    #[test]
    fn test_each_slice_size_hint() {
        let s = EachSlice::new(1..=7, 3).unwrap();
        assert_eq!(s.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_each_slice_fused() {
        let mut s = EachSlice::new(1..=2, 2).unwrap();
        assert!(s.next().is_some());
        assert!(s.next().is_none());
        assert!(s.next().is_none());
    }

    // =========================================================================
    // Chunk tests
    // =========================================================================

    #[test]
    fn test_chunk_by_parity() {
        let data = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let result: Vec<(bool, Vec<i64>)> = Chunk::new(data.into_iter(), |x| x % 2 == 0).collect();
        assert_eq!(
            result,
            vec![
                (false, vec![3, 1]),
                (true, vec![4]),
                (false, vec![1, 5, 9]),
                (true, vec![2, 6]),
                (false, vec![5, 3, 5]),
            ]
        );
    }

    #[test]
    fn test_chunk_never_merges_separate_runs() {
        let result: Vec<(i64, Vec<i64>)> =
            Chunk::new(vec![1, 1, 2, 1, 1].into_iter(), |x| *x).collect();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], (1, vec![1, 1]));
        assert_eq!(result[2], (1, vec![1, 1]));
    }

    #[test]
    fn test_chunk_key_computed_once_per_element() {
        let mut calls = 0;
        let groups = Chunk::new(1..=6, |x| {
            calls += 1;
            x / 3
        })
        .count();
        assert_eq!(groups, 3);
        assert_eq!(calls, 6);
    }

    #[test]
    fn test_chunk_over_unbounded_source() {
        let groups: Vec<(u64, Vec<u64>)> = Chunk::new(1_u64.., |x| x / 2).take(10).collect();
        assert_eq!(groups.len(), 10);
        assert_eq!(groups[0], (0, vec![1]));
        assert_eq!(groups[1], (1, vec![2, 3]));
        assert_eq!(groups[9], (9, vec![18, 19]));
    }

    #[test]
    fn test_chunk_empty() {
        assert_eq!(Chunk::new(std::iter::empty::<i64>(), |x| *x).count(), 0);
    }

    // =========================================================================
    // ChunkWhile tests
    // =========================================================================

    #[test]
    fn test_chunk_while_consecutive() {
        let data = vec![1, 2, 4, 9, 10, 11, 12, 15, 16, 19, 20, 21];
        let result: Vec<Vec<i64>> =
            ChunkWhile::chunk_while(data.into_iter(), |a, b| b == &(a + 1)).collect();
        assert_eq!(
            result,
            vec![
                vec![1, 2],
                vec![4],
                vec![9, 10, 11, 12],
                vec![15, 16],
                vec![19, 20, 21],
            ]
        );
    }

    #[test]
    fn test_slice_when_descending() {
        let data = vec![1, 2, 4, 3, 5, 1];
        let result: Vec<Vec<i64>> =
            ChunkWhile::slice_when(data.into_iter(), |a, b| b < a).collect();
        assert_eq!(result, vec![vec![1, 2, 4], vec![3, 5], vec![1]]);
    }

    #[test]
    fn test_chunk_while_clone_and_fused() {
        let mut runs = ChunkWhile::chunk_while(vec![1, 2, 5, 6, 9].into_iter(), |a, b| b - a == 1);
        assert_eq!(runs.next(), Some(vec![1, 2]));
        let copy = runs.clone();
        assert_eq!(runs.by_ref().collect::<Vec<_>>(), vec![vec![5, 6], vec![9]]);
        assert_eq!(runs.next(), None);
        assert_eq!(copy.count(), 2);
    }

    #[test]
    fn test_slice_when_over_unbounded_source() {
        let groups: Vec<Vec<u64>> = ChunkWhile::slice_when(1_u64.., |_, b| b % 3 == 0)
            .take(5)
            .collect();
        assert_eq!(groups[0], vec![1, 2]);
        assert_eq!(groups[4], vec![12, 13, 14]);
    }

    // =========================================================================
    // SliceBefore / SliceAfter tests
    // =========================================================================

    #[test]
    fn test_slice_before_predicate() {
        let data = vec![1, 2, 6, 7, 8, 10, 11];
        let result: Vec<Vec<i64>> =
            SliceBy::new(data.into_iter(), |x: &i64| x % 2 == 0, SliceSide::Before).collect();
        assert_eq!(result, vec![vec![1], vec![2], vec![6, 7], vec![8], vec![10, 11]]);
    }

    #[test]
    fn test_slice_before_over_unbounded_source() {
        let groups: Vec<Vec<u64>> =
            SliceBy::new(1_u64.., |x: &u64| x % 2 == 0, SliceSide::Before)
                .take(10)
                .collect();
        assert_eq!(groups.len(), 10);
        assert_eq!(groups[0], vec![1]);
        assert_eq!(groups[1], vec![2, 3]);
        assert_eq!(groups[9], vec![18, 19]);
    }

    #[test]
    fn test_slice_before_first_element_matches() {
        let result: Vec<Vec<i64>> =
            SliceBy::new(vec![0, 1, 0, 1].into_iter(), |x: &i64| *x == 0, SliceSide::Before)
                .collect();
        assert_eq!(result, vec![vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_slice_before_regex() {
        let lines = vec!["# a", "x", "# b", "y", "z"];
        let re = regex::Regex::new("^#").unwrap();
        let result: Vec<Vec<&str>> =
            SliceBy::new(lines.into_iter(), re, SliceSide::Before).collect();
        assert_eq!(result, vec![vec!["# a", "x"], vec!["# b", "y", "z"]]);
    }

    #[test]
    fn test_slice_after_predicate() {
        let words = vec!["foo\\", "bar", "baz\\", "qux\\", "end"];
        let result: Vec<Vec<&str>> = SliceBy::new(
            words.into_iter(),
            |w: &&str| !w.ends_with('\\'),
            SliceSide::After,
        )
        .collect();
        assert_eq!(result, vec![vec!["foo\\", "bar"], vec!["baz\\", "qux\\", "end"]]);
    }

    #[test]
    fn test_slice_after_trailing_group() {
        let result: Vec<Vec<i64>> =
            SliceBy::new(1..=5, |x: &i64| *x == 2, SliceSide::After).collect();
        assert_eq!(result, vec![vec![1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_slice_empty() {
        let s = SliceBy::new(std::iter::empty::<i64>(), |_: &i64| true, SliceSide::Before);
        assert_eq!(s.count(), 0);
    }

    // =========================================================================
    // ReverseEach tests
    // =========================================================================

    #[test]
    fn test_reverse_each() {
        let result: Vec<i64> = ReverseEach::new(1..=4).collect();
        assert_eq!(result, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_reverse_each_is_deferred() {
        let mut pulled = 0;
        let source = (1..=3).inspect(|_| pulled += 1);
        let mut rev = ReverseEach::new(source);
        assert_eq!(rev.size_hint(), (3, Some(3)));
        assert_eq!(rev.next(), Some(3));
        assert_eq!(rev.size_hint(), (2, Some(2)));
        drop(rev);
        assert_eq!(pulled, 3);
    }
}
