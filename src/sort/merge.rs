//! Top-down merge sort.
//!
//! # Algorithm
//!
//! 1. A sequence of length <= 1 is already sorted
//! 2. Split at `len / 2` (the left half is never the larger one)
//! 3. Sort each half recursively
//! 4. Merge, taking the left head whenever `left <= right`
//!
//! Taking the left head on equality keeps equal elements in their input
//! order, which makes the sort stable.

use super::types::{FieldSource, Value};
use crate::error::{Error, Result};

/// Sorts `items` with a caller-supplied `<=` predicate.
///
/// `le(a, b)` must return `true` when `a` may precede `b`. The input is
/// left untouched; a new vector is returned.
///
/// # Examples
///
/// ```
/// use u_allot::sort::merge_sort_by;
///
/// let sorted = merge_sort_by(&[5, 1, 4, 1], |a, b| a <= b);
/// assert_eq!(sorted, vec![1, 1, 4, 5]);
/// ```
pub fn merge_sort_by<T, F>(items: &[T], le: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    sort_slice(items, &le)
}

fn sort_slice<T, F>(items: &[T], le: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    let mid = items.len() / 2;
    let left = sort_slice(&items[..mid], le);
    let right = sort_slice(&items[mid..], le);
    merge(left, right, le)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, le: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => le(l, r),
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

/// Sorts records ascending by the value stored under `key`.
///
/// Every key is read and checked before merging starts:
///
/// - a record without `key` fails with [`Error::MissingKey`]
/// - keys that are not mutually comparable (mixed kinds, or `NaN`) fail
///   with [`Error::TypeMismatch`]
///
/// The sort is stable. For descending order, reverse the result.
///
/// # Examples
///
/// ```
/// use u_allot::sort::{merge_sort_by_key, Record, Value};
///
/// let rows = vec![
///     Record::new().with("id", 1).with("motivation", 3),
///     Record::new().with("id", 2).with("motivation", 7),
///     Record::new().with("id", 3).with("motivation", 3),
/// ];
/// let sorted = merge_sort_by_key(&rows, "motivation").unwrap();
/// let ids: Vec<_> = sorted.iter().map(|r| r.get("id").cloned().unwrap()).collect();
/// assert_eq!(ids, vec![Value::Int(1), Value::Int(3), Value::Int(2)]);
/// ```
pub fn merge_sort_by_key<T>(records: &[T], key: &str) -> Result<Vec<T>>
where
    T: FieldSource + Clone,
{
    let keyed = extract_keys(records, key)?;
    log::trace!("merge sort of {} records by `{}`", records.len(), key);

    let sorted = merge_sort_by(&keyed, |a, b| a.0 <= b.0);
    Ok(sorted
        .into_iter()
        .map(|(_, idx)| records[idx].clone())
        .collect())
}

/// Reads `key` from every record and verifies the values share one
/// comparison class.
fn extract_keys<T: FieldSource>(records: &[T], key: &str) -> Result<Vec<(Value, usize)>> {
    let mut keyed = Vec::with_capacity(records.len());
    let mut class: Option<&'static str> = None;

    for (idx, record) in records.iter().enumerate() {
        let value = record.field(key).ok_or_else(|| Error::missing(key))?;
        if matches!(value, Value::Float(f) if f.is_nan()) {
            return Err(Error::mismatch(key, "comparable number", "NaN"));
        }
        match class {
            None => class = Some(value.comparable_kind()),
            Some(expected) if expected != value.comparable_kind() => {
                return Err(Error::mismatch(key, expected, value.describe()));
            }
            Some(_) => {}
        }
        keyed.push((value, idx));
    }

    Ok(keyed)
}
