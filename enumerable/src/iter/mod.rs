//! Lazy iterator adapters and generators.
//!
//! Ruby's enumeration surface, split into logical submodules:
//!
//! - [`filtering`]: `reject`, `grep`/`grep_v`, `take_while`, `drop_while`,
//!   `flatten`, `with_index`, `compact`, `uniq`
//! - [`grouping`]: `each_cons`, `each_slice`, `chunk`, `chunk_while`,
//!   `slice_when`, `slice_before`, `slice_after`, `reverse_each`
//! - [`repeating`]: `cycle`, `cycle(n)`, `zip`
//! - [`combinatoric`]: `product`, `permutation`, `combination`,
//!   `repeated_permutation`, `repeated_combination`
//!
//! # Performance
//!
//! Adapters are inert until pulled and allocate only the buffers their
//! semantics require. Hot paths are `#[inline]`; combinatoric generators keep
//! their index vectors in a `SmallVec` and report an exact `size_hint()`.

pub mod combinatoric;
pub mod filtering;
pub mod grouping;
pub mod repeating;

#[cfg(test)]
mod tests;

pub use combinatoric::{
    Combinations, Permutations, Product, RepeatedCombinations, RepeatedPermutations, binomial,
    falling_factorial,
};
pub use filtering::{Compact, DropWhile, Flatten, Grep, Reject, TakeWhile, Uniq, WithIndex};
pub use grouping::{Chunk, ChunkWhile, EachCons, EachSlice, ReverseEach, SliceBy, SliceSide};
pub use repeating::{Cycle, Zip, ZipAll};
