//! Repeating and zipping adapters: `Cycle`, `Zip`, `ZipAll`.
//!
//! # Performance Characteristics
//!
//! | Adapter  | Per-element cost  | Memory |
//! |----------|-------------------|--------|
//! | `Cycle`  | O(1) amortized    | O(n) saved pool |
//! | `Zip`    | O(1)              | O(1) |
//! | `ZipAll` | O(k) for k others | O(k) |
//!
//! `Cycle` saves elements while passing through the first lap and replays
//! them afterwards, so the source is read exactly once.

use std::iter::FusedIterator;

// =============================================================================
// Cycle
// =============================================================================

/// Repeats the elements of a source, either forever or for a fixed number
/// of laps.
///
/// Equivalent to Ruby's `cycle` and `cycle(n)`.
///
/// # Performance
///
/// - First lap: O(1) per element (pull from source + clone into pool)
/// - Later laps: O(1) per element (index into pool)
/// - Space: O(n) where n is the number of elements in the source
#[derive(Debug, Clone)]
pub struct Cycle<I: Iterator> {
    source: Option<I>,
    pool: Vec<I::Item>,
    index: usize,
    /// Laps still to start after the current one; `None` means unbounded.
    laps_left: Option<usize>,
}

impl<I> Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Cycle forever. An empty source terminates immediately.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self::build(iter, None)
    }

    /// Cycle exactly `laps` times. Zero or negative laps yield nothing.
    #[inline]
    pub fn laps(iter: I, laps: i64) -> Self {
        let laps = usize::try_from(laps).unwrap_or(0);
        let mut cycle = Self::build(iter, Some(laps.saturating_sub(1)));
        if laps == 0 {
            cycle.source = None;
        }
        cycle
    }

    fn build(iter: I, laps_left: Option<usize>) -> Self {
        let (hint, _) = iter.size_hint();
        Self {
            source: Some(iter),
            pool: Vec::with_capacity(hint),
            index: 0,
            laps_left,
        }
    }

    /// Number of elements saved so far.
    #[inline]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    fn finish_first_lap(&mut self) {
        self.source = None;
        self.index = self.pool.len();
        tracing::debug!(pool = self.pool.len(), "cycle captured source pool");
        if self.pool.is_empty() {
            self.laps_left = Some(0);
        }
    }
}

impl<I> Iterator for Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(source) = self.source.as_mut() {
            if let Some(val) = source.next() {
                self.pool.push(val.clone());
                return Some(val);
            }
            self.finish_first_lap();
        }
        if self.pool.is_empty() {
            return None;
        }
        if self.index == self.pool.len() {
            match self.laps_left.as_mut() {
                Some(0) => return None,
                Some(n) => *n -= 1,
                None => {}
            }
            self.index = 0;
        }
        let val = self.pool[self.index].clone();
        self.index += 1;
        Some(val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(laps_left) = self.laps_left else {
            if !self.pool.is_empty() {
                return (usize::MAX, None);
            }
            return match self.source.as_ref().map(Iterator::size_hint) {
                None | Some((_, Some(0))) => (0, Some(0)),
                Some((0, _)) => (0, None),
                Some(_) => (usize::MAX, None),
            };
        };
        match &self.source {
            Some(source) => {
                let (lo, hi) = source.size_hint();
                let laps = laps_left.saturating_add(1);
                let total = |rest: usize| {
                    self.pool
                        .len()
                        .checked_add(rest)?
                        .checked_mul(laps)?
                        .checked_sub(self.pool.len())
                };
                (total(lo).unwrap_or(usize::MAX), hi.and_then(total))
            }
            None => {
                let rest = self.pool.len() - self.index;
                let n = self
                    .pool
                    .len()
                    .checked_mul(laps_left)
                    .and_then(|full| full.checked_add(rest));
                (n.unwrap_or(usize::MAX), n)
            }
        }
    }
}

impl<I> FusedIterator for Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

// =============================================================================
// Zip
// =============================================================================

/// Pairs each primary element with the matching element of `other`.
///
/// Equivalent to Ruby's `zip(other)`: the length follows the primary
/// sequence, missing positions of a shorter `other` are `None`, and a longer
/// `other` is truncated.
#[derive(Debug, Clone)]
pub struct Zip<A, B> {
    a: A,
    b: Option<B>,
}

impl<A, B> Zip<A, B>
where
    A: Iterator,
    B: Iterator,
{
    /// Create a new zip adapter.
    #[inline]
    pub fn new(a: A, b: B) -> Self {
        Self { a, b: Some(b) }
    }
}

impl<A, B> Iterator for Zip<A, B>
where
    A: Iterator,
    B: Iterator,
{
    type Item = (A::Item, Option<B::Item>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let left = self.a.next()?;
        let right = pull_fused(&mut self.b);
        Some((left, right))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.a.size_hint()
    }
}

impl<A: ExactSizeIterator, B: Iterator> ExactSizeIterator for Zip<A, B> {}

impl<A: FusedIterator, B: Iterator> FusedIterator for Zip<A, B> {}

// =============================================================================
// ZipAll
// =============================================================================

/// Pairs each primary element with the matching element of every other
/// sequence.
///
/// Equivalent to Ruby's `zip(*others)` for others sharing one element type.
#[derive(Debug, Clone)]
pub struct ZipAll<A, B> {
    primary: A,
    others: Vec<Option<B>>,
}

impl<A, B> ZipAll<A, B>
where
    A: Iterator,
    B: Iterator,
{
    /// Create a new multi-way zip.
    pub fn new<O>(primary: A, others: O) -> Self
    where
        O: IntoIterator,
        O::Item: IntoIterator<IntoIter = B>,
    {
        Self {
            primary,
            others: others.into_iter().map(|o| Some(o.into_iter())).collect(),
        }
    }

    /// Number of other sequences zipped against the primary one.
    #[inline]
    pub fn width(&self) -> usize {
        self.others.len()
    }
}

impl<A, B> Iterator for ZipAll<A, B>
where
    A: Iterator,
    B: Iterator,
{
    type Item = (A::Item, Vec<Option<B::Item>>);

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.primary.next()?;
        let rest = self.others.iter_mut().map(pull_fused).collect();
        Some((head, rest))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.primary.size_hint()
    }
}

impl<A: FusedIterator, B: Iterator> FusedIterator for ZipAll<A, B> {}

/// Pulls from `slot`, dropping the iterator once it reports exhaustion so
/// it is never polled again.
#[inline]
fn pull_fused<B: Iterator>(slot: &mut Option<B>) -> Option<B::Item> {
    let item = slot.as_mut()?.next();
    if item.is_none() {
        *slot = None;
    }
    item
}

// =============================================================================
// Tests
// =============================================================================
