//! Bounded-hours course allocation.
//!
//! Assigns each candidate the subset of a shared course catalog that
//! maximizes adjusted impact without exceeding the candidate's available
//! hours:
//!
//! - **Sort**: stable top-down merge sort over records keyed by a named
//!   field, with up-front key validation.
//! - **Allocate**: exact per-candidate 0/1 knapsack over an explicit DP
//!   table, with a configurable score bonus for vulnerable candidates.
//! - **Plan**: ranks candidates by a priority field and allocates them in
//!   that order.
//! - **Sample** and **Report**: demonstration data and pure summary
//!   aggregation for callers that export or chart results.
//!
//! # Architecture
//!
//! Sorting and allocation are independent: they share only the
//! [`sort::FieldSource`] trait, which lets typed candidates be ordered
//! like generic records. Neither performs I/O. Logging goes through the
//! `log` facade; installing a logger is up to the caller.

pub mod allocate;
pub mod error;
pub mod plan;
pub mod report;
pub mod sample;
pub mod sort;

pub use error::{Error, Result};
