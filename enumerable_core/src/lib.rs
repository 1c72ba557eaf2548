//! # Enumerable Core
//!
//! Leaf types shared by the enumeration engine:
//!
//! - **Errors**: [`SeqError`] and [`SeqResult`], modelled on Ruby's exceptions
//! - **Element kinds**: [`ElementKind`] names elements in comparison errors
//! - **Dynamic values**: [`Value`] for heterogeneous sequences
//! - **Successors**: [`Successor`] and the built-in integer, decimal, date
//!   and string successors used to generate ranges

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod kind;
pub mod successor;
pub mod value;

pub use error::{ErrorKind, SeqError, SeqResult};
pub use kind::{ElementKind, try_compare};
pub use successor::{Days, Decimals, FnSuccessor, Integers, Strings, Successor, successor_fn};
pub use value::Value;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
