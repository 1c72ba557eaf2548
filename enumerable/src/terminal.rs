//! Terminal operations: functions that drain a sequence to a result.
//!
//! Every function here pulls its input to the end (or to the first match,
//! for `find`, `first` and `include`). Calling one on an unbounded sequence
//! without a short-circuit never returns.
//!
//! # Performance Characteristics
//!
//! | Operation | Time | Space |
//! |-----------|------|-------|
//! | `count`, `reduce`, `inject`, `sum` | O(n) | O(1) |
//! | `min`, `max`, `minmax` and `_by` forms | O(n) | O(1) |
//! | `sort`, `sort_by`, `sort_with` | O(n log n) | O(n) |
//! | `group_by`, `tally`, `partition` | O(n) expected | O(n) |
//! | `first`, `find`, `include` | O(k) to the first hit | O(1) |
//!
//! Ordering operations compare through [`try_compare`], so a pair of
//! incomparable elements surfaces as `SeqError::Comparison` naming both
//! element kinds instead of a silently wrong order.

use enumerable_core::error::non_negative_size;
use enumerable_core::{ElementKind, SeqResult, try_compare};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::cmp::Ordering;
use std::hash::Hash;

/// Insertion-ordered map used by `group_by` and `tally`.
pub type OrderedMap<K, V> = IndexMap<K, V, FxBuildHasher>;

// =============================================================================
// Counting and folding
// =============================================================================

/// Number of elements.
#[inline]
pub fn count<I: IntoIterator>(iterable: I) -> usize {
    iterable.into_iter().count()
}

/// Number of elements satisfying `pred`.
#[inline]
pub fn count_if<I, P>(iterable: I, mut pred: P) -> usize
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    iterable.into_iter().filter(|x| pred(x)).count()
}

/// Combine elements left to right, seeded with the first element.
///
/// Returns `None` for an empty sequence.
#[inline]
pub fn reduce<I, F>(iterable: I, f: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    iterable.into_iter().reduce(f)
}

/// Combine elements left to right, seeded with `init`.
#[inline]
pub fn inject<I, A, F>(iterable: I, init: A, f: F) -> A
where
    I: IntoIterator,
    F: FnMut(A, I::Item) -> A,
{
    iterable.into_iter().fold(init, f)
}

/// Sum of the elements; the empty sum is the additive identity.
#[inline]
pub fn sum<I, S>(iterable: I) -> S
where
    I: IntoIterator,
    S: std::iter::Sum<I::Item>,
{
    iterable.into_iter().sum()
}

/// Feed every element to `f` together with a mutable memo, then return the
/// memo.
pub fn each_with_object<I, M, F>(iterable: I, mut memo: M, mut f: F) -> M
where
    I: IntoIterator,
    F: FnMut(I::Item, &mut M),
{
    for item in iterable {
        f(item, &mut memo);
    }
    memo
}

// =============================================================================
// Selection
// =============================================================================

/// First element, if any. Pulls at most one element.
#[inline]
pub fn first<I: IntoIterator>(iterable: I) -> Option<I::Item> {
    iterable.into_iter().next()
}

/// Up to `n` leading elements.
///
/// # Errors
///
/// Returns an argument error for negative `n`, before pulling anything.
pub fn first_n<I: IntoIterator>(iterable: I, n: i64) -> SeqResult<Vec<I::Item>> {
    let n = non_negative_size(n, "take")?;
    Ok(iterable.into_iter().take(n).collect())
}

/// First element satisfying `pred`.
#[inline]
pub fn find<I, P>(iterable: I, mut pred: P) -> Option<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    iterable.into_iter().find(|x| pred(x))
}

/// Returns true if some element equals `value`. Stops at the first hit.
#[inline]
pub fn include<I>(iterable: I, value: &I::Item) -> bool
where
    I: IntoIterator,
    I::Item: PartialEq,
{
    iterable.into_iter().any(|x| x == *value)
}

/// Split into (accepted, rejected), each in source order.
pub fn partition<I, P>(iterable: I, mut pred: P) -> (Vec<I::Item>, Vec<I::Item>)
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    let iter = iterable.into_iter();
    let (lo, _) = iter.size_hint();
    let mut accepted = Vec::with_capacity(lo / 2);
    let mut rejected = Vec::with_capacity(lo / 2);
    for item in iter {
        if pred(&item) {
            accepted.push(item);
        } else {
            rejected.push(item);
        }
    }
    (accepted, rejected)
}

// =============================================================================
// Grouping
// =============================================================================

/// Group elements by key. Keys keep first-seen order; each group keeps
/// source order.
pub fn group_by<I, K, F>(iterable: I, mut key_fn: F) -> OrderedMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Hash + Eq,
    F: FnMut(&I::Item) -> K,
{
    let mut groups = OrderedMap::default();
    for item in iterable {
        groups
            .entry(key_fn(&item))
            .or_insert_with(Vec::new)
            .push(item);
    }
    groups
}

/// Count occurrences of each distinct element, in first-seen order.
pub fn tally<I>(iterable: I) -> OrderedMap<I::Item, usize>
where
    I: IntoIterator,
    I::Item: Hash + Eq,
{
    let mut counts = OrderedMap::default();
    for item in iterable {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort ascending.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first incomparable pair.
pub fn sort<I>(iterable: I) -> SeqResult<Vec<I::Item>>
where
    I: IntoIterator,
    I::Item: PartialOrd + ElementKind,
{
    sort_fallible(
        iterable.into_iter().collect(),
        &mut |a: &I::Item, b: &I::Item| try_compare(a, b),
    )
}

/// Sort ascending by a derived key. The key is computed once per element.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first pair of incomparable keys.
pub fn sort_by<I, K, F>(iterable: I, mut key_fn: F) -> SeqResult<Vec<I::Item>>
where
    I: IntoIterator,
    K: PartialOrd + ElementKind,
    F: FnMut(&I::Item) -> K,
{
    let keyed = iterable
        .into_iter()
        .map(|item| (key_fn(&item), item))
        .collect();
    let sorted = sort_fallible(keyed, &mut |a: &(K, I::Item), b: &(K, I::Item)| {
        try_compare(&a.0, &b.0)
    })?;
    Ok(sorted.into_iter().map(|(_, item)| item).collect())
}

/// Sort with a caller-supplied total order, like Ruby's `sort { |a, b| … }`.
pub fn sort_with<I, F>(iterable: I, cmp: F) -> Vec<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    let mut items: Vec<_> = iterable.into_iter().collect();
    items.sort_by(cmp);
    items
}

/// Stable merge sort over a fallible comparison.
///
/// Comparisons can fail partway; std's sorts cannot stop early, and may
/// panic when handed an inconsistent order.
fn sort_fallible<T, F>(items: Vec<T>, cmp: &mut F) -> SeqResult<Vec<T>>
where
    F: FnMut(&T, &T) -> SeqResult<Ordering>,
{
    merge_sort(items, cmp).inspect_err(|err| {
        tracing::warn!(error = %err, "sort aborted on incomparable elements");
    })
}

fn merge_sort<T, F>(mut items: Vec<T>, cmp: &mut F) -> SeqResult<Vec<T>>
where
    F: FnMut(&T, &T) -> SeqResult<Ordering>,
{
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp)?;
    let right = merge_sort(right, cmp)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties take from the left run to stay stable.
        let next = if cmp(r, l)? == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

/// Fold to the element that wins every comparison against `keep`.
fn extreme_by<I, K, F>(iterable: I, mut key_fn: F, keep: Ordering) -> SeqResult<Option<I::Item>>
where
    I: IntoIterator,
    K: PartialOrd + ElementKind,
    F: FnMut(&I::Item) -> K,
{
    let mut best: Option<(K, I::Item)> = None;
    for item in iterable {
        let key = key_fn(&item);
        let replace = match &best {
            None => true,
            Some((best_key, _)) => {
                try_compare(&key, best_key).inspect_err(|err| {
                    tracing::warn!(error = %err, "extreme search aborted on incomparable elements");
                })? == keep
            }
        };
        if replace {
            best = Some((key, item));
        }
    }
    Ok(best.map(|(_, item)| item))
}

/// Fold to the element that wins every comparison against `keep`,
/// comparing the elements themselves.
fn extreme<I>(iterable: I, keep: Ordering) -> SeqResult<Option<I::Item>>
where
    I: IntoIterator,
    I::Item: PartialOrd + ElementKind,
{
    let mut best: Option<I::Item> = None;
    for item in iterable {
        let replace = match &best {
            None => true,
            Some(current) => {
                try_compare(&item, current).inspect_err(|err| {
                    tracing::warn!(error = %err, "extreme search aborted on incomparable elements");
                })? == keep
            }
        };
        if replace {
            best = Some(item);
        }
    }
    Ok(best)
}

/// Smallest element; the first one wins ties.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first incomparable pair.
pub fn min<I>(iterable: I) -> SeqResult<Option<I::Item>>
where
    I: IntoIterator,
    I::Item: PartialOrd + ElementKind,
{
    extreme(iterable, Ordering::Less)
}

/// Largest element; the first one wins ties.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first incomparable pair.
pub fn max<I>(iterable: I) -> SeqResult<Option<I::Item>>
where
    I: IntoIterator,
    I::Item: PartialOrd + ElementKind,
{
    extreme(iterable, Ordering::Greater)
}

/// Element with the smallest key.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first pair of incomparable keys.
pub fn min_by<I, K, F>(iterable: I, key_fn: F) -> SeqResult<Option<I::Item>>
where
    I: IntoIterator,
    K: PartialOrd + ElementKind,
    F: FnMut(&I::Item) -> K,
{
    extreme_by(iterable, key_fn, Ordering::Less)
}

/// Element with the largest key.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first pair of incomparable keys.
pub fn max_by<I, K, F>(iterable: I, key_fn: F) -> SeqResult<Option<I::Item>>
where
    I: IntoIterator,
    K: PartialOrd + ElementKind,
    F: FnMut(&I::Item) -> K,
{
    extreme_by(iterable, key_fn, Ordering::Greater)
}

/// Smallest and largest element in one pass.
///
/// # Errors
///
/// Returns `SeqError::Comparison` at the first incomparable pair.
pub fn minmax<I>(iterable: I) -> SeqResult<Option<(I::Item, I::Item)>>
where
    I: IntoIterator,
    I::Item: PartialOrd + ElementKind + Clone,
{
    let mut iter = iterable.into_iter();
    let Some(head) = iter.next() else {
        return Ok(None);
    };
    let (mut lo, mut hi) = (head.clone(), head);
    for item in iter {
        if try_compare(&item, &lo)? == Ordering::Less {
            lo = item;
        } else if try_compare(&item, &hi)? == Ordering::Greater {
            hi = item;
        }
    }
    Ok(Some((lo, hi)))
}

// =============================================================================
// Tests
// =============================================================================
