//! Case-equality patterns.
//!
//! Ruby's `grep`, `slice_before` and `slice_after` accept anything that
//! answers `pattern === element`: a regular expression, a range, a class or
//! a block. [`Pattern`] is that contract. Closures, [`regex::Regex`], the
//! standard range types and [`Equals`] implement it.

use enumerable_core::Value;
use regex::Regex;
use std::borrow::Cow;
use std::ops::{Range, RangeFrom, RangeInclusive};

/// Anything that can decide whether an element matches, Ruby's `===`.
pub trait Pattern<T: ?Sized> {
    /// Returns true if `item` matches this pattern.
    fn matches(&mut self, item: &T) -> bool;
}

impl<T: ?Sized, F> Pattern<T> for F
where
    F: FnMut(&T) -> bool,
{
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        self(item)
    }
}

macro_rules! impl_regex_pattern {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pattern<$ty> for Regex {
                #[inline]
                fn matches(&mut self, item: &$ty) -> bool {
                    self.is_match(item.as_ref())
                }
            }
        )*
    };
}

impl_regex_pattern!(str, &str, String, &String, Box<str>, Cow<'_, str>);

/// Regexes match the payload of strings and symbols; other kinds never match.
impl Pattern<Value> for Regex {
    #[inline]
    fn matches(&mut self, item: &Value) -> bool {
        item.as_str().is_some_and(|s| self.is_match(s))
    }
}

impl<T: PartialOrd> Pattern<T> for RangeInclusive<T> {
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialOrd> Pattern<T> for Range<T> {
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialOrd> Pattern<T> for RangeFrom<T> {
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        self.contains(item)
    }
}

/// Matches elements equal to the wrapped value.
#[derive(Debug, Clone, PartialEq)]
pub struct Equals<T>(pub T);

impl<T: PartialEq> Pattern<T> for Equals<T> {
    #[inline]
    fn matches(&mut self, item: &T) -> bool {
        self.0 == *item
    }
}
