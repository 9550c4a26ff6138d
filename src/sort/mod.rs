//! Stable merge sort over structured records.
//!
//! Orders any sequence of [`FieldSource`] values ascending by a named
//! field, without relying on the standard library's sort. Keys are
//! validated once up front, so a missing or incomparable key is reported
//! before any merging work is done.
//!
//! # References
//!
//! - von Neumann (1945), merge sort as described in Knuth, *TAOCP* Vol. 3, §5.2.4

mod merge;
mod types;

pub use merge::{merge_sort_by, merge_sort_by_key};
pub use types::{FieldSource, Record, Value};
