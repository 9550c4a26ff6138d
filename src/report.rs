//! Summary rows and aggregate statistics over a batch of allocations.
//!
//! Pure aggregation only. Rendering and file export are left to the
//! caller; with the `serde` feature every type here serializes directly.

use crate::allocate::{Allocation, Candidate};

/// Condensed view of one allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationSummary {
    /// Candidate identifier.
    pub candidate_id: u64,
    /// Candidate display name.
    pub candidate_name: String,
    /// Hours used by the chosen courses.
    pub total_hours: u64,
    /// Adjusted impact of the chosen courses.
    pub adjusted_impact: u64,
    /// Number of chosen courses.
    pub course_count: usize,
}

impl From<&Allocation> for AllocationSummary {
    fn from(allocation: &Allocation) -> Self {
        Self {
            candidate_id: allocation.candidate_id,
            candidate_name: allocation.candidate_name.clone(),
            total_hours: allocation.total_hours,
            adjusted_impact: allocation.adjusted_impact,
            course_count: allocation.course_count(),
        }
    }
}

/// Summary rows in allocation order.
pub fn summarize(allocations: &[Allocation]) -> Vec<AllocationSummary> {
    allocations.iter().map(AllocationSummary::from).collect()
}

/// Aggregate statistics for a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchStats {
    /// Number of allocations.
    pub count: usize,
    /// Hours used across the batch.
    pub total_hours: u64,
    /// Adjusted impact across the batch, saturating at `u64::MAX`.
    pub total_adjusted_impact: u64,
    /// Mean adjusted impact (0 for an empty batch).
    pub mean_adjusted_impact: f64,
    /// Smallest adjusted impact, if any.
    pub min_adjusted_impact: Option<u64>,
    /// Largest adjusted impact, if any.
    pub max_adjusted_impact: Option<u64>,
    /// Mean number of chosen courses (0 for an empty batch).
    pub mean_course_count: f64,
    /// Used hours over available hours, once capacities are attached.
    pub hours_utilization: Option<f64>,
}

impl BatchStats {
    /// Computes statistics over `allocations`.
    pub fn from_allocations(allocations: &[Allocation]) -> Self {
        let count = allocations.len();
        let total_hours = allocations
            .iter()
            .map(|a| a.total_hours)
            .fold(0, u64::saturating_add);
        let total_adjusted_impact = allocations
            .iter()
            .map(|a| a.adjusted_impact)
            .fold(0, u64::saturating_add);
        let total_courses: usize = allocations.iter().map(Allocation::course_count).sum();

        let (mean_adjusted_impact, mean_course_count) = if count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_adjusted_impact as f64 / count as f64,
                total_courses as f64 / count as f64,
            )
        };

        Self {
            count,
            total_hours,
            total_adjusted_impact,
            mean_adjusted_impact,
            min_adjusted_impact: allocations.iter().map(|a| a.adjusted_impact).min(),
            max_adjusted_impact: allocations.iter().map(|a| a.adjusted_impact).max(),
            mean_course_count,
            hours_utilization: None,
        }
    }

    /// Attaches hours utilization computed against `candidates`.
    ///
    /// Utilization stays `None` when the candidates have no hours at all.
    pub fn with_capacities(mut self, candidates: &[Candidate]) -> Self {
        let available: u64 = candidates
            .iter()
            .map(|c| u64::from(c.hours_available))
            .sum();
        self.hours_utilization = (available > 0).then(|| self.total_hours as f64 / available as f64);
        self
    }
}

/// Equal-width histogram of adjusted impact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactHistogram {
    /// Lower edge of the first bin.
    pub lower: f64,
    /// Width of every bin.
    pub width: f64,
    /// Allocation count per bin.
    pub counts: Vec<usize>,
}

impl ImpactHistogram {
    /// Bin edges, `counts.len() + 1` of them.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.counts.len())
            .map(|i| self.lower + self.width * i as f64)
            .collect()
    }
}

/// Buckets adjusted impact into `bins` equal-width bins spanning the
/// observed range. The last bin is closed on the right.
///
/// When every value is the same, bins are centred on it with unit total
/// range. Returns `None` for zero bins or an empty batch.
pub fn impact_histogram(allocations: &[Allocation], bins: usize) -> Option<ImpactHistogram> {
    if bins == 0 {
        return None;
    }
    let min = allocations.iter().map(|a| a.adjusted_impact).min()? as f64;
    let max = allocations.iter().map(|a| a.adjusted_impact).max()? as f64;

    let (lower, upper) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (upper - lower) / bins as f64;

    let mut counts = vec![0; bins];
    for allocation in allocations {
        let offset = (allocation.adjusted_impact as f64 - lower) / width;
        let bin = (offset.floor() as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Some(ImpactHistogram {
        lower,
        width,
        counts,
    })
}
