//! Successor functions over ordered domains.
//!
//! A successor maps a value to the next value of its domain. Ranges are
//! generated by repeatedly applying one from a start value until the end
//! boundary is passed. Successors are stateless: the same input always
//! produces the same output.
//!
//! | Successor | Domain | Step |
//! |-----------|--------|------|
//! | [`Integers`] | all primitive integers | `+1`, `None` at `MAX` |
//! | [`Decimals`] | `f64` at a fixed scale | `+10^-scale`, rounded |
//! | [`Days`] | `chrono::NaiveDate` | next calendar day |
//! | [`Strings`] | `String` | Ruby `String#succ` |
//! | [`FnSuccessor`] | anything | user closure |

use chrono::NaiveDate;

/// Produces the value following a given value within an ordered domain.
pub trait Successor<E> {
    /// The next value after `value`, or `None` when the domain has no
    /// further values.
    fn succ(&self, value: &E) -> Option<E>;

    /// Returns true once `value` lies beyond the inclusive `end` boundary.
    ///
    /// The default is "not less than or equal to `end`", which also treats
    /// values incomparable with `end` as past it.
    fn exceeds(&self, value: &E, end: &E) -> bool
    where
        E: PartialOrd,
    {
        !matches!(
            value.partial_cmp(end),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        )
    }
}

impl<E, S: Successor<E> + ?Sized> Successor<E> for &S {
    #[inline]
    fn succ(&self, value: &E) -> Option<E> {
        (**self).succ(value)
    }

    #[inline]
    fn exceeds(&self, value: &E, end: &E) -> bool
    where
        E: PartialOrd,
    {
        (**self).exceeds(value, end)
    }
}

// =============================================================================
// Integers
// =============================================================================

/// Successor over the primitive integer types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Integers;

macro_rules! impl_integer_successor {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Successor<$t> for Integers {
                #[inline]
                fn succ(&self, value: &$t) -> Option<$t> {
                    value.checked_add(1)
                }
            }
        )+
    };
}

impl_integer_successor!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// =============================================================================
// Decimals
// =============================================================================

/// Successor over decimals with a fixed number of fractional digits.
///
/// Each step adds one unit in the last place and rounds back to `scale`
/// digits, so repeated steps do not accumulate binary drift:
/// `0.1, 0.2, 0.3` rather than `0.30000000000000004`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimals {
    scale: u32,
}

impl Decimals {
    /// Largest supported scale; `10^15` is still exact in an `f64`.
    pub const MAX_SCALE: u32 = 15;

    /// Create a decimal successor with `scale` fractional digits.
    ///
    /// Scales above [`Decimals::MAX_SCALE`] are clamped.
    #[inline]
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.min(Self::MAX_SCALE),
        }
    }

    /// Number of fractional digits.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    fn factor(self) -> f64 {
        10_f64.powi(i32::try_from(self.scale).unwrap_or(i32::MAX))
    }

    /// Round `value` to this successor's scale.
    #[inline]
    pub fn round(&self, value: f64) -> f64 {
        let factor = self.factor();
        (value * factor).round() / factor
    }
}

impl Successor<f64> for Decimals {
    fn succ(&self, value: &f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let factor = self.factor();
        let next = ((value * factor).round() + 1.0) / factor;
        next.is_finite().then_some(next)
    }
}

// =============================================================================
// Days
// =============================================================================

/// Successor over calendar dates, one day at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Days;

impl Successor<NaiveDate> for Days {
    #[inline]
    fn succ(&self, value: &NaiveDate) -> Option<NaiveDate> {
        value.succ_opt()
    }
}

// =============================================================================
// Strings
// =============================================================================

/// Successor over strings with Ruby's `String#succ` carry semantics.
///
/// String ranges compare by length first, then lexicographically, so
/// `"a"..="zz"` visits `"a"`..`"z"`, `"aa"`..`"zz"` and stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strings;

impl Successor<String> for Strings {
    #[inline]
    fn succ(&self, value: &String) -> Option<String> {
        Some(succ_str(value))
    }

    fn exceeds(&self, value: &String, end: &String) -> bool {
        let (lv, le) = (value.chars().count(), end.chars().count());
        lv > le || (lv == le && value > end)
    }
}

/// Ruby's `String#succ`.
///
/// The rightmost alphanumeric character is incremented, carrying leftwards
/// through alphanumerics of the same class (digits, lowercase, uppercase)
/// and skipping anything else. A carry out of the leftmost alphanumeric
/// inserts a new character in front of it. Strings without alphanumerics
/// increment their rightmost character instead.
///
/// ```
/// use enumerable_core::successor::succ_str;
///
/// assert_eq!(succ_str("az"), "ba");
/// assert_eq!(succ_str("zz"), "aaa");
/// assert_eq!(succ_str("a9"), "b0");
/// assert_eq!(succ_str("1.9"), "2.0");
/// ```
pub fn succ_str(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    if !chars.iter().any(char::is_ascii_alphanumeric) {
        succ_raw(&mut chars);
        return chars.into_iter().collect();
    }

    let mut end = chars.len();
    let mut leftmost = 0;
    while let Some(pos) = chars[..end].iter().rposition(char::is_ascii_alphanumeric) {
        leftmost = pos;
        let (next, carry) = match chars[pos] {
            'z' => ('a', true),
            'Z' => ('A', true),
            '9' => ('0', true),
            c => (char::from(c as u8 + 1), false),
        };
        chars[pos] = next;
        if !carry {
            return chars.into_iter().collect();
        }
        end = pos;
    }

    // Carried out of the leftmost alphanumeric
    let fresh = match chars[leftmost] {
        '0' => '1',
        c => c,
    };
    chars.insert(leftmost, fresh);
    chars.into_iter().collect()
}

/// Increment the rightmost character by code point, carrying on overflow.
fn succ_raw(chars: &mut Vec<char>) {
    for i in (0..chars.len()).rev() {
        if let Some(next) = next_char(chars[i]) {
            chars[i] = next;
            return;
        }
        chars[i] = '\u{0}';
    }
    chars.insert(0, '\u{1}');
}

fn next_char(c: char) -> Option<char> {
    let mut code = u32::from(c).checked_add(1)?;
    // Skip the surrogate gap
    if (0xD800..=0xDFFF).contains(&code) {
        code = 0xE000;
    }
    char::from_u32(code)
}

// =============================================================================
// Closures
// =============================================================================

/// Successor backed by a caller-supplied function.
#[derive(Clone, Copy)]
pub struct FnSuccessor<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnSuccessor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSuccessor")
            .field("f", &"<successor function>")
            .finish()
    }
}

impl<E, F> Successor<E> for FnSuccessor<F>
where
    F: Fn(&E) -> Option<E>,
{
    #[inline]
    fn succ(&self, value: &E) -> Option<E> {
        (self.f)(value)
    }
}

/// Wrap a function as a [`Successor`].
///
/// ```
/// use enumerable_core::successor::{Successor, successor_fn};
///
/// let doubling = successor_fn(|x: &u32| x.checked_mul(2));
/// assert_eq!(doubling.succ(&4), Some(8));
/// ```
#[inline]
pub fn successor_fn<E, F>(f: F) -> FnSuccessor<F>
where
    F: Fn(&E) -> Option<E>,
{
    FnSuccessor { f }
}
