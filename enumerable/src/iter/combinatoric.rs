//! Combinatoric generators.
//!
//! Provides `Product`, `Permutations`, `Combinations`,
//! `RepeatedPermutations` and `RepeatedCombinations`, producing every
//! arrangement of a finite, already materialized pool.
//!
//! # Performance Characteristics
//!
//! | Generator | Output Size | Space |
//! |-----------|-------------|-------|
//! | `Product` (n pools, each m) | m^n | O(n) indices + pools |
//! | `Permutations(m, k)` | m!/(m-k)! | O(m) indices + O(m) pool |
//! | `Combinations(m, k)` | C(m,k) | O(k) indices + O(m) pool |
//! | `RepeatedPermutations(m, k)` | m^k | O(k) indices + O(m) pool |
//! | `RepeatedCombinations(m, k)` | C(m+k-1,k) | O(k) indices + O(m) pool |
//!
//! All use SmallVec for index arrays to avoid heap allocation for small `k`,
//! report an exact `size_hint()` whenever the total fits in a `usize`, and
//! emit tuples in lexicographic order of source index.

use smallvec::SmallVec;

/// Stack-allocated index threshold. For k <= 8, indices live on the stack.
const SMALL_INDEX: usize = 8;

type IndexVec = SmallVec<[usize; SMALL_INDEX]>;

// =============================================================================
// Counting
// =============================================================================

/// Binomial coefficient C(n, k), `None` on overflow.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step
        acc = acc.checked_mul(n - i)? / (i + 1);
    }
    Some(acc)
}

/// Falling factorial n!/(n-k)!, `None` on overflow.
pub fn falling_factorial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    (n - k + 1..=n).try_fold(1_usize, usize::checked_mul)
}

/// Remaining-count size hint shared by every generator.
#[inline]
fn remaining_hint(done: bool, total: Option<usize>, emitted: usize) -> (usize, Option<usize>) {
    if done {
        return (0, Some(0));
    }
    match total {
        Some(t) => {
            let left = t.saturating_sub(emitted);
            (left, Some(left))
        }
        None => (usize::MAX, None),
    }
}

// =============================================================================
// Product
// =============================================================================

/// Cartesian product of several pools.
///
/// Equivalent to Ruby's `Array#product(*others)`.
///
/// # Algorithm
///
/// Uses odometer-style index advancement: the rightmost index increments
/// first, cascading left on overflow. This produces lexicographic order.
///
/// # Performance
///
/// - O(1) per `next()` (amortized; the index cascade is O(n) worst case
///   but averaged over all outputs is O(1))
/// - O(n) space for the index vector where n = number of pools
#[derive(Debug, Clone)]
pub struct Product<T> {
    /// The pools of values to combine.
    pools: Vec<Vec<T>>,
    /// Current index into each pool.
    indices: IndexVec,
    /// Tuples produced so far.
    emitted: usize,
    /// Whether we've finished.
    done: bool,
    /// Whether this is the first call to next().
    first: bool,
}

impl<T: Clone> Product<T> {
    /// Create a Cartesian product from multiple pools.
    pub fn new(pools: Vec<Vec<T>>) -> Self {
        // If any pool is empty, the product is empty
        let done = pools.iter().any(Vec::is_empty);
        let mut indices = IndexVec::with_capacity(pools.len());
        indices.resize(pools.len(), 0);

        let product = Self {
            pools,
            indices,
            emitted: 0,
            done,
            first: true,
        };
        tracing::debug!(
            pools = product.pools.len(),
            total = ?product.total_size(),
            "product generator created"
        );
        product
    }

    /// Get the total number of tuples, `None` if it overflows a `usize`.
    pub fn total_size(&self) -> Option<usize> {
        // No pools yields one empty tuple
        self.pools
            .iter()
            .try_fold(1_usize, |acc, p| acc.checked_mul(p.len()))
    }

    /// Build the current tuple from indices.
    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices
            .iter()
            .zip(self.pools.iter())
            .map(|(&idx, pool)| pool[idx].clone())
            .collect()
    }

    /// Advance the odometer indices (rightmost first).
    #[inline]
    fn advance(&mut self) -> bool {
        for i in (0..self.indices.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.pools[i].len() {
                return true;
            }
            self.indices[i] = 0;
        }
        false // all indices wrapped around → done
    }
}

impl<T: Clone> Iterator for Product<T> {
    type Item = Vec<T>;

    #[inline]
    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.pools.is_empty() {
                self.done = true;
                return Some(Vec::new()); // single empty tuple
            }
        } else if !self.advance() {
            self.done = true;
            return None;
        }

        self.emitted += 1;
        Some(self.current_tuple())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total_size(), self.emitted)
    }
}

impl<T: Clone> std::iter::FusedIterator for Product<T> {}

// =============================================================================
// RepeatedPermutations
// =============================================================================

/// Every k-length tuple drawn from the pool with repetition.
///
/// Equivalent to Ruby's `Array#repeated_permutation(k)`; the product of the
/// pool with itself `k` times, sharing a single pool.
///
/// # Algorithm
///
/// Odometer over `k` independent indices, each ranging over `[0, m)`.
#[derive(Debug, Clone)]
pub struct RepeatedPermutations<T> {
    pool: Vec<T>,
    indices: IndexVec,
    emitted: usize,
    first: bool,
    done: bool,
}

impl<T: Clone> RepeatedPermutations<T> {
    /// Create k-length repeated permutations of the pool.
    pub fn new(pool: Vec<T>, k: usize) -> Self {
        let mut indices = IndexVec::with_capacity(k);
        indices.resize(k, 0);
        let done = pool.is_empty() && k > 0;
        Self {
            pool,
            indices,
            emitted: 0,
            first: true,
            done,
        }
    }

    /// Total number of tuples, m^k; `None` on overflow.
    pub fn total_size(&self) -> Option<usize> {
        let k = u32::try_from(self.indices.len()).ok()?;
        self.pool.len().checked_pow(k)
    }

    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for RepeatedPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.indices.is_empty() {
                self.done = true;
            }
            self.emitted += 1;
            return Some(self.current_tuple());
        }

        let m = self.pool.len();
        for i in (0..self.indices.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < m {
                self.emitted += 1;
                return Some(self.current_tuple());
            }
            self.indices[i] = 0;
        }

        self.done = true;
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total_size(), self.emitted)
    }
}

impl<T: Clone> std::iter::FusedIterator for RepeatedPermutations<T> {}

// =============================================================================
// Permutations
// =============================================================================

/// Successive k-length permutations of elements from the pool.
///
/// Equivalent to Ruby's `Array#permutation(k)`.
///
/// # Algorithm
///
/// Cycle-counter permutation generation: `indices` holds the current
/// arrangement of all `m` positions and `cycles[i]` counts how many more
/// swaps position `i` will see before it rotates back. Output follows
/// lexicographic order of source index.
///
/// # Performance
///
/// - O(k) per `next()` amortized, O(m) on rotation
/// - O(m) space for pool + indices + cycles
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    pool: Vec<T>,
    indices: Vec<usize>,
    cycles: Vec<usize>,
    k: usize,
    emitted: usize,
    first: bool,
    done: bool,
}

impl<T: Clone> Permutations<T> {
    /// Create permutations of length `k` from the pool.
    pub fn new(pool: Vec<T>, k: usize) -> Self {
        let n = pool.len();
        if k > n {
            return Self {
                pool,
                indices: Vec::new(),
                cycles: Vec::new(),
                k,
                emitted: 0,
                first: true,
                done: true,
            };
        }

        let indices: Vec<usize> = (0..n).collect();
        let cycles: Vec<usize> = (n - k + 1..=n).rev().collect();

        tracing::debug!(pool = n, k, "permutation generator created");
        Self {
            pool,
            indices,
            cycles,
            k,
            emitted: 0,
            first: true,
            done: false,
        }
    }

    /// Create full-length permutations.
    pub fn full(pool: Vec<T>) -> Self {
        let k = pool.len();
        Self::new(pool, k)
    }

    /// Total number of permutations, m!/(m-k)!; `None` on overflow.
    pub fn total_size(&self) -> Option<usize> {
        falling_factorial(self.pool.len(), self.k)
    }

    /// Get the current permutation tuple.
    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices[..self.k]
            .iter()
            .map(|&i| self.pool[i].clone())
            .collect()
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            self.emitted += 1;
            return Some(self.current_tuple());
        }

        let n = self.pool.len();

        for i in (0..self.k).rev() {
            self.cycles[i] -= 1;
            if self.cycles[i] == 0 {
                // Rotate indices[i..n] left by 1
                self.indices[i..n].rotate_left(1);
                self.cycles[i] = n - i;
            } else {
                let j = n - self.cycles[i];
                self.indices.swap(i, j);
                self.emitted += 1;
                return Some(self.current_tuple());
            }
        }

        self.done = true;
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total_size(), self.emitted)
    }
}

impl<T: Clone> std::iter::FusedIterator for Permutations<T> {}

// =============================================================================
// Combinations
// =============================================================================

/// Successive k-length combinations of elements from the pool.
///
/// Equivalent to Ruby's `Array#combination(k)`.
///
/// # Algorithm
///
/// Index-based lexicographic generation. Each combination is represented
/// by `k` indices `i_0 < i_1 < ... < i_{k-1}` into the pool. The rightmost
/// index that can still move without colliding with its right neighbour is
/// incremented and every index to its right is reset to consecutive values.
///
/// # Performance
///
/// - O(k) per `next()` for advance + tuple construction
/// - O(k) space for indices (SmallVec-backed)
#[derive(Debug, Clone)]
pub struct Combinations<T> {
    pool: Vec<T>,
    indices: IndexVec,
    k: usize,
    emitted: usize,
    first: bool,
    done: bool,
}

impl<T: Clone> Combinations<T> {
    /// Create k-length combinations from the pool.
    pub fn new(pool: Vec<T>, k: usize) -> Self {
        let n = pool.len();
        if k > n {
            return Self {
                pool,
                indices: IndexVec::new(),
                k,
                emitted: 0,
                first: true,
                done: true,
            };
        }

        let indices: IndexVec = (0..k).collect();
        tracing::debug!(pool = n, k, "combination generator created");

        Self {
            pool,
            indices,
            k,
            emitted: 0,
            first: true,
            done: false,
        }
    }

    /// Total number of combinations, C(m,k); `None` on overflow.
    pub fn total_size(&self) -> Option<usize> {
        binomial(self.pool.len(), self.k)
    }

    /// Get the current combination tuple.
    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for Combinations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.k == 0 {
                self.done = true;
            }
            self.emitted += 1;
            return Some(self.current_tuple());
        }

        let n = self.pool.len();

        // Find the rightmost index that can be incremented
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + n - self.k {
                break;
            }
        }

        // Increment it and reset all indices to its right
        self.indices[i] += 1;
        for j in (i + 1)..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        self.emitted += 1;
        Some(self.current_tuple())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total_size(), self.emitted)
    }
}

impl<T: Clone> std::iter::FusedIterator for Combinations<T> {}

// =============================================================================
// RepeatedCombinations
// =============================================================================

/// Successive k-length combinations with repetition.
///
/// Equivalent to Ruby's `Array#repeated_combination(k)`.
///
/// # Algorithm
///
/// Uses a rising index vector: indices satisfy `i_0 <= i_1 <= ... <= i_{k-1}`.
///
/// # Performance
///
/// - O(k) per `next()` for advance + tuple construction
/// - O(k) space for indices (SmallVec-backed)
#[derive(Debug, Clone)]
pub struct RepeatedCombinations<T> {
    pool: Vec<T>,
    indices: IndexVec,
    k: usize,
    emitted: usize,
    first: bool,
    done: bool,
}

impl<T: Clone> RepeatedCombinations<T> {
    /// Create k-length combinations with repetition.
    pub fn new(pool: Vec<T>, k: usize) -> Self {
        let done = pool.is_empty() && k > 0;
        let mut indices = IndexVec::with_capacity(k);
        if !done {
            indices.resize(k, 0); // all start at 0
        }

        Self {
            pool,
            indices,
            k,
            emitted: 0,
            first: true,
            done,
        }
    }

    /// Total number of tuples, C(m+k-1,k); `None` on overflow.
    pub fn total_size(&self) -> Option<usize> {
        let m = self.pool.len();
        if m == 0 {
            return Some(usize::from(self.k == 0));
        }
        binomial((m + self.k).checked_sub(1)?, self.k)
    }

    /// Get the current tuple.
    #[inline]
    fn current_tuple(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for RepeatedCombinations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            if self.k == 0 {
                self.done = true;
            }
            self.emitted += 1;
            return Some(self.current_tuple());
        }

        let n = self.pool.len();

        // Find the rightmost index that can be incremented
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != n - 1 {
                break;
            }
        }

        // Increment it and set all following indices to the same value
        let new_val = self.indices[i] + 1;
        for idx in &mut self.indices[i..] {
            *idx = new_val;
        }

        self.emitted += 1;
        Some(self.current_tuple())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total_size(), self.emitted)
    }
}

impl<T: Clone> std::iter::FusedIterator for RepeatedCombinations<T> {}

// =============================================================================
// Tests
// =============================================================================
