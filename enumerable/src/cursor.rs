//! Peekable, rewindable cursor over a restartable source.
//!
//! A [`PeekingCursor`] keeps the source it was built from, so `rewind`
//! can start a fresh pass. At most one element is buffered: `peek` pulls it
//! and the next `next_value` hands it out without touching the source again.
//!
//! # Protocol
//!
//! ```ignore
//! let mut cursor = PeekingCursor::new(vec![1, 2]);
//! cursor.peek()?;        // &1, buffered
//! cursor.next_value()?;  // 1, from the buffer
//! cursor.next_value()?;  // 2
//! cursor.next_value();   // Err(StopIteration)
//! cursor.rewind();       // back to 1
//! ```

use enumerable_core::{SeqError, SeqResult};

/// Iterators that can delete the element they returned last.
///
/// Sources that support removal during a pass (an editable list, a queue
/// with acknowledgement) implement this to enable [`PeekingCursor::remove`].
pub trait RemoveLast {
    /// Remove the most recently returned element from the underlying
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an illegal-state error when nothing has been returned yet or
    /// the last element was already removed.
    fn remove_last(&mut self) -> SeqResult<()>;
}

/// Cursor with one-element lookahead and restart support.
///
/// Also a plain [`Iterator`]; `next()` and [`next_value`](Self::next_value)
/// share the buffer.
#[derive(Debug, Clone)]
pub struct PeekingCursor<S: IntoIterator> {
    source: S,
    iter: S::IntoIter,
    buffered: Option<S::Item>,
    exhausted: bool,
}

impl<S> PeekingCursor<S>
where
    S: IntoIterator + Clone,
{
    /// Create a cursor at the start of `source`.
    pub fn new(source: S) -> Self {
        let iter = source.clone().into_iter();
        Self {
            source,
            iter,
            buffered: None,
            exhausted: false,
        }
    }

    /// Drop any buffered element and restart from the beginning of the
    /// source.
    pub fn rewind(&mut self) {
        let dropped = self.buffered.take().is_some();
        self.iter = self.source.clone().into_iter();
        self.exhausted = false;
        tracing::debug!(dropped_buffer = dropped, "cursor rewound");
    }
}

impl<S: IntoIterator> PeekingCursor<S> {
    /// Pull into the buffer if it is empty. Never polls the source again
    /// once it has reported exhaustion.
    fn fill(&mut self) -> Option<&mut S::Item> {
        if self.buffered.is_none() && !self.exhausted {
            self.buffered = self.iter.next();
            self.exhausted = self.buffered.is_none();
        }
        self.buffered.as_mut()
    }

    /// Returns true if another element is available. May buffer one.
    #[inline]
    pub fn has_next(&mut self) -> bool {
        self.fill().is_some()
    }

    /// Look at the next element without consuming it.
    ///
    /// Repeated calls return the same element until it is consumed.
    ///
    /// # Errors
    ///
    /// Returns `StopIteration` when the source is exhausted.
    pub fn peek(&mut self) -> SeqResult<&S::Item> {
        self.fill().map(|v| &*v).ok_or(SeqError::StopIteration)
    }

    /// Mutable access to the next element without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `StopIteration` when the source is exhausted.
    pub fn peek_mut(&mut self) -> SeqResult<&mut S::Item> {
        self.fill().ok_or(SeqError::StopIteration)
    }

    /// Consume and return the next element.
    ///
    /// # Errors
    ///
    /// Returns `StopIteration` when the source is exhausted.
    pub fn next_value(&mut self) -> SeqResult<S::Item> {
        self.next().ok_or(SeqError::StopIteration)
    }

    /// Consume the next element only if `pred` accepts it.
    pub fn next_if(&mut self, pred: impl FnOnce(&S::Item) -> bool) -> Option<S::Item> {
        if self.fill().is_some_and(|head| pred(head)) {
            self.buffered.take()
        } else {
            None
        }
    }

    /// Returns true if an element is held in the lookahead buffer.
    #[inline]
    pub fn is_buffered(&self) -> bool {
        self.buffered.is_some()
    }

    /// Give back the source the cursor was built from.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S> PeekingCursor<S>
where
    S: IntoIterator,
    S::IntoIter: RemoveLast,
{
    /// Remove the element most recently returned by `next_value`.
    ///
    /// # Errors
    ///
    /// Returns an illegal-state error if an element is buffered by `peek`,
    /// since the source has already moved past the last returned element.
    /// Errors from the source's own removal are propagated.
    pub fn remove(&mut self) -> SeqResult<()> {
        if self.buffered.is_some() {
            return Err(SeqError::illegal_state("remove() after peek()"));
        }
        self.iter.remove_last()
    }
}

impl<S: IntoIterator> Iterator for PeekingCursor<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<S::Item> {
        self.fill();
        self.buffered.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let extra = usize::from(self.buffered.is_some());
        if self.exhausted {
            return (extra, Some(extra));
        }
        let (lo, hi) = self.iter.size_hint();
        (
            lo.saturating_add(extra),
            hi.and_then(|h| h.checked_add(extra)),
        )
    }
}

impl<S: IntoIterator> std::iter::FusedIterator for PeekingCursor<S> {}

// =============================================================================
// Tests
// =============================================================================
