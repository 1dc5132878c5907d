//! Aggregation primitives.
//!
//! Pure, deterministic helpers over finite in-memory slices. Every
//! higher-level component (segmentation, signals, campaign stats) is
//! built on these, so their zero/empty-input behavior is part of the
//! contract: `average` of nothing is 0, never NaN; `top_n` of nothing
//! is empty.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Partition `records` by `key_fn`, preserving the insertion order of
/// first-seen keys. Callers map missing values to a stable bucket key
/// (conventionally `"unknown"`) rather than dropping records.
pub fn group_by<'a, T, K>(records: &'a [T], key_fn: K) -> Vec<(String, Vec<&'a T>)>
where
    K: Fn(&T) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a T>)> = Vec::new();

    for record in records {
        let key = key_fn(record);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

pub fn count_where<T, P>(records: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

pub fn sum_by<T, F>(records: &[T], value_fn: F) -> f64
where
    F: Fn(&T) -> f64,
{
    records.iter().map(value_fn).sum()
}

/// Mean of `value_fn` over `records`; 0.0 for an empty slice. Callers
/// never need a separate divide-by-zero guard around this.
pub fn average<T, F>(records: &[T], value_fn: F) -> f64
where
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return 0.0;
    }
    sum_by(records, value_fn) / records.len() as f64
}

/// Stable descending sort by `compare`, truncated to `n`. Ties keep
/// their original order. `compare` returns the ordering of `a` relative
/// to `b` in the *output* (so "greater first" comparators sort
/// descending).
pub fn top_n<T, F>(entries: &[T], n: usize, compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut sorted: Vec<T> = entries.to_vec();
    sorted.sort_by(|a, b| compare(a, b));
    sorted.truncate(n);
    sorted
}
