//! Per-candidate course allocation (0/1 knapsack).
//!
//! Each candidate's available hours form the capacity; each course is an
//! item weighted by its hours and valued by its impact score after the
//! candidate's [`ScoreModifier`] is applied. The solver is exact: the
//! returned selection is always optimal, with ties resolved toward
//! skipping the earlier item.
//!
//! The catalog is borrowed immutably and shared by all allocations. Each
//! call builds and discards its own DP table.

mod config;
mod solver;
mod types;

pub use config::{
    AllocatorConfig, Rounding, ScoreModifier, BASELINE_FACTOR, DEFAULT_MAX_TABLE_CELLS,
    VULNERABLE_BONUS,
};
pub use solver::{allocate, Allocator};
pub use types::{Allocation, Candidate, Course};
