//! Closed ranges generated by a successor function.
//!
//! [`SuccessorRange`] yields `start, succ(start), succ(succ(start)), …`
//! lazily and stops at the first of:
//!
//! - a value equal to `end` (yielded, then the range ends),
//! - a value that [`Successor::exceeds`] `end` (not yielded),
//! - `succ` returning `None` because the domain ran out, or returning its
//!   input unchanged (as `String#succ` does for `""`).
//!
//! ```ignore
//! SuccessorRange::new(1, 4, Integers)                 // 1, 2, 3, 4
//! SuccessorRange::new("y".into(), "ab".into(), Strings) // y, z, aa, ab
//! ```

use enumerable_core::{SeqError, SeqResult, Successor};
use std::iter::{FusedIterator, StepBy};

/// Lazy closed interval `start..=end` stepped by a [`Successor`].
#[derive(Debug, Clone)]
pub struct SuccessorRange<E, S> {
    start: E,
    end: E,
    successor: S,
    upcoming: Option<E>,
}

impl<E, S> SuccessorRange<E, S>
where
    E: PartialOrd + Clone,
    S: Successor<E>,
{
    /// Create the range `start..=end`. Nothing is generated until pulled.
    pub fn new(start: E, end: E, successor: S) -> Self {
        let upcoming = (!successor.exceeds(&start, &end)).then(|| start.clone());
        Self {
            start,
            end,
            successor,
            upcoming,
        }
    }

    /// First value of the range.
    #[inline]
    pub fn start(&self) -> &E {
        &self.start
    }

    /// Inclusive end boundary.
    #[inline]
    pub fn end(&self) -> &E {
        &self.end
    }

    /// Every `n`-th value, starting with the first.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `n` is zero or negative.
    pub fn step(self, n: i64) -> SeqResult<StepBy<Self>> {
        match n {
            0 => Err(SeqError::argument("step can't be 0")),
            n if n < 0 => Err(SeqError::argument("step can't be negative")),
            n => {
                let n = usize::try_from(n)
                    .map_err(|_| SeqError::argument("step too large"))?;
                Ok(self.step_by(n))
            }
        }
    }

    /// Returns true if `value` lies between the boundaries, by comparison
    /// only. Does not walk the range.
    pub fn covers(&self, value: &E) -> bool {
        !matches!(
            self.start.partial_cmp(value),
            Some(std::cmp::Ordering::Greater) | None
        ) && !self.successor.exceeds(value, &self.end)
    }

    /// Returns true if the range generates `value`.
    ///
    /// Walks a fresh pass from `start`, giving up once `value` is passed.
    pub fn contains(&self, value: &E) -> bool
    where
        S: Clone,
    {
        if !self.covers(value) {
            return false;
        }
        let fresh = Self::new(self.start.clone(), self.end.clone(), self.successor.clone());
        for candidate in fresh {
            if candidate == *value {
                return true;
            }
            if self.successor.exceeds(&candidate, value) {
                return false;
            }
        }
        false
    }
}

impl<E, S> Iterator for SuccessorRange<E, S>
where
    E: PartialOrd + Clone,
    S: Successor<E>,
{
    type Item = E;

    #[inline]
    fn next(&mut self) -> Option<E> {
        let current = self.upcoming.take()?;
        if current != self.end {
            self.upcoming = self
                .successor
                .succ(&current)
                .filter(|next| *next != current && !self.successor.exceeds(next, &self.end));
        }
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.upcoming {
            None => (0, Some(0)),
            Some(_) => (1, None),
        }
    }
}

impl<E, S> FusedIterator for SuccessorRange<E, S>
where
    E: PartialOrd + Clone,
    S: Successor<E>,
{
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use enumerable_core::{Days, Decimals, Integers, Strings, successor_fn};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_integer_range() {
        let r: Vec<i64> = SuccessorRange::new(1, 5, Integers).collect();
        assert_eq!(r, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_when_start_past_end() {
        let mut r = SuccessorRange::new(5, 1, Integers);
        assert_eq!(r.size_hint(), (0, Some(0)));
        assert_eq!(r.next(), None);
    }

    #[test]
    fn test_single_value() {
        let r: Vec<i32> = SuccessorRange::new(3, 3, Integers).collect();
        assert_eq!(r, vec![3]);
    }

    #[test]
    fn test_stops_at_domain_end() {
        let r: Vec<u8> = SuccessorRange::new(253, u8::MAX, Integers).collect();
        assert_eq!(r, vec![253, 254, 255]);
    }

    #[test]
    fn test_successor_returning_none_ends_range() {
        let upto_three = successor_fn(|x: &i32| (*x < 3).then(|| x + 1));
        let r: Vec<i32> = SuccessorRange::new(1, 10, upto_three).collect();
        assert_eq!(r, vec![1, 2, 3]);
    }

    #[test]
    fn test_skipping_successor_stops_before_exceeding() {
        let by_three = successor_fn(|x: &i32| Some(x + 3));
        let r: Vec<i32> = SuccessorRange::new(1, 8, by_three).collect();
        assert_eq!(r, vec![1, 4, 7]);
    }

    #[test]
    fn test_date_range_crosses_month() {
        let r: Vec<NaiveDate> = SuccessorRange::new(date(2024, 2, 28), date(2024, 3, 1), Days).collect();
        assert_eq!(r, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn test_string_range_grows() {
        let r: Vec<String> = SuccessorRange::new("y".to_string(), "ab".to_string(), Strings).collect();
        assert_eq!(r, vec!["y", "z", "aa", "ab"]);
    }

    #[test]
    fn test_string_range_terminates_on_length() {
        let r = SuccessorRange::new("a".to_string(), "zz".to_string(), Strings);
        assert_eq!(r.count(), 26 + 26 * 26);
    }

    #[test]
    fn test_stalled_successor_ends_range() {
        let r: Vec<String> = SuccessorRange::new(String::new(), "a".to_string(), Strings).collect();
        assert_eq!(r, vec![""]);
    }

    #[test]
    fn test_decimal_range_without_drift() {
        let r: Vec<f64> = SuccessorRange::new(0.1, 0.5, Decimals::new(1)).collect();
        assert_eq!(r, vec![0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_step() {
        let r: Vec<i64> = SuccessorRange::new(1, 10, Integers).step(3).unwrap().collect();
        assert_eq!(r, vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_step_rejects_non_positive() {
        assert!(SuccessorRange::new(1, 10, Integers).step(0).is_err());
        let err = SuccessorRange::new(1, 10, Integers).step(-2).unwrap_err();
        assert_eq!(err.to_string(), "ArgumentError: step can't be negative");
    }

    #[test]
    fn test_covers_and_contains() {
        let by_two = successor_fn(|x: &i32| Some(x + 2));
        let r = SuccessorRange::new(1, 9, by_two);
        assert!(r.covers(&4));
        assert!(!r.contains(&4));
        assert!(r.contains(&5));
        assert!(!r.contains(&11));
        assert!(!r.covers(&0));
    }

    #[test]
    fn test_accessors() {
        let r = SuccessorRange::new('a', 'e', successor_fn(|c: &char| char::from_u32(*c as u32 + 1)));
        assert_eq!(*r.start(), 'a');
        assert_eq!(*r.end(), 'e');
        assert_eq!(r.count(), 5);
    }
}
