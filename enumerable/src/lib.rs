//! # Enumerable
//!
//! Ruby's `Enumerable` and `Array` iteration surface as lazy Rust iterators.
//!
//! ## Architecture
//!
//! - **Adapters** ([`iter`]): filtering, windowing, grouping, repetition and
//!   combinatorial generators, each a plain `Iterator`
//! - **Facade** ([`Lazy`]): chaining methods with Ruby names and semantics;
//!   every iterator gets one through [`Enumerable::lazy`]
//! - **Terminal operations** ([`terminal`]): sort, min/max, group_by, tally
//!   and the other consumers that drain a pipeline
//! - **Collections** ([`RArray`]): a materialized array hosting the
//!   combinatorial methods
//! - **Ranges** ([`SuccessorRange`]): closed intervals over any domain with a
//!   [`Successor`]
//! - **Cursor** ([`PeekingCursor`]): one-element lookahead with rewind
//!
//! ## Example
//!
//! ```
//! use enumerable::{Enumerable, rarray};
//!
//! let firsts = (1_i64..)
//!     .lazy()
//!     .map(|x| x * x)
//!     .each_slice(2)
//!     .unwrap()
//!     .first_n(2)
//!     .unwrap();
//! assert_eq!(firsts, rarray![vec![1, 4], vec![9, 16]]);
//! ```
//!
//! Nothing is pulled until a terminal operation runs, so unbounded sources
//! are fine as long as something downstream stops the pull.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
pub mod cursor;
pub mod iter;
pub mod lazy;
pub mod pattern;
pub mod range;
pub mod terminal;

pub use array::RArray;
pub use cursor::{PeekingCursor, RemoveLast};
pub use lazy::{Enumerable, Lazy};
pub use pattern::{Equals, Pattern};
pub use range::SuccessorRange;
pub use terminal::OrderedMap;

pub use enumerable_core::{
    Days, Decimals, ElementKind, ErrorKind, FnSuccessor, Integers, SeqError, SeqResult, Strings,
    Successor, Value, successor_fn,
};
