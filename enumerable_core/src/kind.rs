//! Element kind names and checked comparison.
//!
//! Ordering-based terminal operations (`sort`, `min`, `max`) must never
//! produce a silently wrong answer when two elements cannot be ordered.
//! [`ElementKind`] lets them name both offending elements in the resulting
//! [`SeqError::Comparison`] using Ruby class names.

use crate::error::{SeqError, SeqResult};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Reports the Ruby class name of an element.
///
/// The default implementation falls back to the Rust type name, which is
/// good enough for user-defined element types.
pub trait ElementKind {
    /// The class name used in comparison error messages.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! impl_element_kind {
    ($name:literal => $($t:ty),+ $(,)?) => {
        $(
            impl ElementKind for $t {
                #[inline]
                fn kind(&self) -> &'static str {
                    $name
                }
            }
        )+
    };
}

impl_element_kind!("Integer" => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_element_kind!("Float" => f32, f64);
impl_element_kind!("String" => String, str, char);
impl_element_kind!("Date" => NaiveDate);

impl ElementKind for bool {
    fn kind(&self) -> &'static str {
        if *self { "TrueClass" } else { "FalseClass" }
    }
}

impl<T: ElementKind + ?Sized> ElementKind for &T {
    #[inline]
    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

impl<T> ElementKind for Vec<T> {
    fn kind(&self) -> &'static str {
        "Array"
    }
}

impl<T> ElementKind for [T] {
    fn kind(&self) -> &'static str {
        "Array"
    }
}

impl<T: ElementKind> ElementKind for Option<T> {
    fn kind(&self) -> &'static str {
        self.as_ref().map_or("NilClass", ElementKind::kind)
    }
}

impl<A, B> ElementKind for (A, B) {
    fn kind(&self) -> &'static str {
        "Array"
    }
}

/// Compare two elements, failing with a comparison error when they are
/// mutually incomparable (`partial_cmp` returns `None`).
#[inline]
pub fn try_compare<T>(a: &T, b: &T) -> SeqResult<Ordering>
where
    T: PartialOrd + ElementKind + ?Sized,
{
    a.partial_cmp(b)
        .ok_or_else(|| SeqError::comparison(a.kind(), b.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_kinds() {
        assert_eq!(3_i64.kind(), "Integer");
        assert_eq!(2.5_f64.kind(), "Float");
        assert_eq!("abc".kind(), "String");
        assert_eq!(String::from("x").kind(), "String");
        assert_eq!(true.kind(), "TrueClass");
        assert_eq!(false.kind(), "FalseClass");
        assert_eq!(vec![1, 2].kind(), "Array");
        assert_eq!(None::<i32>.kind(), "NilClass");
        assert_eq!(Some(1_u8).kind(), "Integer");
    }

    #[test]
    fn test_try_compare_ok() {
        assert_eq!(try_compare(&1, &2), Ok(Ordering::Less));
        assert_eq!(try_compare("b", "a"), Ok(Ordering::Greater));
    }

    #[test]
    fn test_try_compare_nan() {
        let err = try_compare(&f64::NAN, &1.0).unwrap_err();
        assert_eq!(err, SeqError::comparison("Float", "Float"));
    }

    #[test]
    fn test_user_type_falls_back_to_type_name() {
        struct Widget;
        impl ElementKind for Widget {}
        assert!(Widget.kind().ends_with("Widget"));
    }
}
