//! Cross-component tests for the adapters.
//!
//! These verify pipelines that span several adapter families, mostly over
//! dynamic [`Value`] elements.

use enumerable_core::Value;
use regex::Regex;

use super::combinatoric::*;
use super::filtering::*;
use super::grouping::*;
use super::repeating::*;

fn int(i: i64) -> Value {
    Value::Int(i)
}

fn vals(ints: &[i64]) -> Vec<Value> {
    ints.iter().map(|&i| int(i)).collect()
}

fn to_ints(v: Vec<Value>) -> Vec<i64> {
    v.into_iter().filter_map(|v| v.as_int()).collect()
}

// =============================================================================
// Infinite sources + short-circuiting
// =============================================================================

#[test]
fn test_cycle_then_each_slice() {
    let cycle = Cycle::new(vals(&[1, 2, 3]).into_iter());
    let slices: Vec<Vec<Value>> = EachSlice::new(cycle, 2).unwrap().take(3).collect();
    let flat: Vec<i64> = slices.into_iter().flat_map(to_ints).collect();
    assert_eq!(flat, vec![1, 2, 3, 1, 2, 3]);
}

#[test]
fn test_infinite_reject_take_while() {
    let odds = Reject::new(1_i64.., |x| x % 2 == 0);
    let result: Vec<i64> = TakeWhile::new(odds, |x| *x < 10).collect();
    assert_eq!(result, vec![1, 3, 5, 7, 9]);
}

#[test]
fn test_each_cons_over_infinite_source() {
    let windows: Vec<Vec<u64>> = EachCons::new(1_u64.., 3).unwrap().take(2).collect();
    assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4]]);
}

#[test]
fn test_chunk_over_cycle_is_lazy() {
    let cycle = Cycle::new(vec![1, 1, 2].into_iter());
    let groups: Vec<(i64, Vec<i64>)> = Chunk::new(cycle, |x| *x).take(3).collect();
    assert_eq!(
        groups,
        vec![(1, vec![1, 1]), (2, vec![2]), (1, vec![1, 1])]
    );
}

// =============================================================================
// Patterns over dynamic values
// =============================================================================

#[test]
fn test_grep_values_by_regex() {
    let mixed = vec![Value::str("apple"), int(3), Value::sym("avocado"), Value::Nil];
    let re = Regex::new("^a").unwrap();
    let hits: Vec<Value> = Grep::new(mixed.into_iter(), re).collect();
    assert_eq!(hits, vec![Value::str("apple"), Value::sym("avocado")]);
}

#[test]
fn test_slice_before_value_pattern() {
    let source = vec![
        Value::str("# a"),
        int(1),
        int(2),
        Value::str("# b"),
        int(3),
    ];
    let re = Regex::new("^#").unwrap();
    let groups: Vec<Vec<Value>> = SliceBy::new(source.into_iter(), re, SliceSide::Before).collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0], vec![Value::str("# a"), int(1), int(2)]);
    assert_eq!(groups[1], vec![Value::str("# b"), int(3)]);
}

#[test]
fn test_compact_then_uniq() {
    let source = vec![Some(3), None, Some(1), Some(3), None, Some(2)];
    let result: Vec<i64> = Uniq::new(Compact::new(source.into_iter()), |x| *x).collect();
    assert_eq!(result, vec![3, 1, 2]);
}

// =============================================================================
// Combinatorics + adapters
// =============================================================================

#[test]
fn test_combinations_then_reject() {
    let sums: Vec<i64> = Reject::new(Combinations::new(vals(&[1, 2, 3, 4]), 2), |c| {
        to_ints(c.clone()).iter().sum::<i64>() % 2 == 0
    })
    .map(|c| to_ints(c).iter().sum())
    .collect();
    assert_eq!(sums, vec![3, 5, 5, 7]);
}

#[test]
fn test_product_zip_with_index() {
    let product = Product::new(vec![vec!['a', 'b'], vec!['x']]);
    let result: Vec<(Vec<char>, i64)> = WithIndex::new(product, 0).collect();
    assert_eq!(result, vec![(vec!['a', 'x'], 0), (vec!['b', 'x'], 1)]);
}

#[test]
fn test_permutations_flatten() {
    let flat: Vec<i64> = Flatten::new(Permutations::full(vec![1, 2])).collect();
    assert_eq!(flat, vec![1, 2, 2, 1]);
}

#[test]
fn test_repeated_permutations_count_matches_size_hint() {
    let perms = RepeatedPermutations::new(vec![0, 1, 2], 3);
    assert_eq!(perms.size_hint(), (27, Some(27)));
    assert_eq!(perms.count(), 27);
}

// =============================================================================
// Zip + reverse
// =============================================================================

#[test]
fn test_zip_reverse_each() {
    let result: Vec<(i64, Option<char>)> =
        Zip::new(ReverseEach::new(vec![1, 2, 3].into_iter()), "ab".chars()).collect();
    assert_eq!(result, vec![(3, Some('a')), (2, Some('b')), (1, None)]);
}

#[test]
fn test_zip_all_over_cycle_others() {
    let others = vec![Cycle::laps(vec![0].into_iter(), 2)];
    let result: Vec<(i64, Vec<Option<i64>>)> = ZipAll::new(1..=3, others).collect();
    assert_eq!(
        result,
        vec![(1, vec![Some(0)]), (2, vec![Some(0)]), (3, vec![None])]
    );
}

#[test]
fn test_chunk_while_consecutive_runs() {
    let runs: Vec<Vec<i64>> =
        ChunkWhile::chunk_while(vec![1, 2, 4, 9, 10, 11, 12, 15].into_iter(), |a, b| b - a == 1)
            .collect();
    assert_eq!(runs, vec![vec![1, 2], vec![4], vec![9, 10, 11, 12], vec![15]]);
}

#[test]
fn test_drop_while_then_each_slice() {
    let slices: Vec<Vec<i64>> =
        EachSlice::new(DropWhile::new(1..=7, |x| *x < 3), 2).unwrap().collect();
    assert_eq!(slices, vec![vec![3, 4], vec![5, 6], vec![7]]);
}
