//! Exact 0/1 knapsack allocation.
//!
//! # Algorithm
//!
//! Items are catalog rows (weight = hours, value = adjusted impact) and
//! capacity is the candidate's available hours. For each state
//! `(i, r)` the table stores the best value reachable from item `i`
//! onward with `r` hours left, plus whether item `i` is taken:
//!
//! ```text
//! best(n, r) = 0
//! best(i, r) = max(best(i+1, r), value(i) + best(i+1, r - weight(i)))
//! ```
//!
//! The take branch wins only when strictly better, so ties keep the skip
//! branch. The table is filled bottom-up from `i = n` and lives only for
//! the duration of one call.
//!
//! # Reference
//!
//! Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*, Ch. 2.3.

use super::config::{AllocatorConfig, ScoreModifier};
use super::types::{Allocation, Candidate, Course};
use crate::error::{Error, Result};

/// Course allocator for single candidates or whole batches.
///
/// # Examples
///
/// ```
/// use u_allot::allocate::{Allocator, Candidate, Course};
///
/// let catalog = vec![
///     Course::new(1, "Intro to AI", 10, 12.0),
///     Course::new(2, "Data Analysis", 15, 15.0),
///     Course::new(3, "AI Ethics", 5, 7.0),
/// ];
/// let candidate = Candidate::new(1, "Ana", 15, false);
///
/// let allocation = Allocator::default().allocate(&candidate, &catalog).unwrap();
/// assert_eq!(allocation.course_ids, vec![3, 1]);
/// assert_eq!(allocation.adjusted_impact, 19);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator after validating `config`.
    pub fn new(config: AllocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Computes the optimal course selection for one candidate.
    ///
    /// Fails if a course has an invalid impact score or the DP table would
    /// exceed [`AllocatorConfig::max_table_cells`].
    pub fn allocate(&self, candidate: &Candidate, catalog: &[Course]) -> Result<Allocation> {
        for course in catalog {
            course.validate()?;
        }

        let modifier = ScoreModifier::for_candidate(&self.config, candidate);
        let weights: Vec<usize> = catalog.iter().map(|c| c.hours as usize).collect();
        let values: Vec<u64> = catalog.iter().map(|c| modifier.adjust(c.impact)).collect();
        let capacity = candidate.hours_available as usize;

        let cells = table_cells(catalog.len(), capacity);
        if cells > self.config.max_table_cells {
            log::warn!(
                "candidate {}: dp table of {} cells exceeds limit {}",
                candidate.id,
                cells,
                self.config.max_table_cells
            );
            return Err(Error::TableTooLarge {
                cells,
                limit: self.config.max_table_cells,
            });
        }

        let table = KnapsackTable::solve(&weights, &values, capacity);
        let best_value = table.best_value();
        let chosen = table.chosen(&weights);

        let allocation = Allocation {
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
            course_ids: chosen.iter().map(|&i| catalog[i].id).collect(),
            course_titles: chosen.iter().map(|&i| catalog[i].title.clone()).collect(),
            total_hours: chosen.iter().map(|&i| u64::from(catalog[i].hours)).sum(),
            raw_impact: chosen.iter().map(|&i| catalog[i].impact).sum(),
            adjusted_impact: chosen
                .iter()
                .map(|&i| values[i])
                .fold(0, u64::saturating_add),
            best_value,
            chosen_indices: chosen,
        };

        log::debug!(
            "candidate {}: {} courses, {}/{} hours, value {} (factor {}, {} cells)",
            candidate.id,
            allocation.course_count(),
            allocation.total_hours,
            capacity,
            best_value,
            modifier.factor(),
            cells
        );

        Ok(allocation)
    }

    /// Allocates every candidate against the same catalog.
    ///
    /// Results are returned in `candidates` order. The first failing
    /// candidate aborts the batch and its error is returned. With the
    /// `parallel` feature and [`AllocatorConfig::parallel`] set, candidates
    /// are evaluated on the rayon thread pool.
    pub fn allocate_all(
        &self,
        candidates: &[Candidate],
        catalog: &[Course],
    ) -> Result<Vec<Allocation>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;
            return candidates
                .par_iter()
                .map(|c| self.allocate(c, catalog))
                .collect();
        }

        candidates
            .iter()
            .map(|c| self.allocate(c, catalog))
            .collect()
    }
}

/// Allocates one candidate with the default configuration.
pub fn allocate(candidate: &Candidate, catalog: &[Course]) -> Result<Allocation> {
    Allocator::default().allocate(candidate, catalog)
}

fn table_cells(items: usize, capacity: usize) -> usize {
    items
        .checked_add(1)
        .zip(capacity.checked_add(1))
        .and_then(|(rows, cols)| rows.checked_mul(cols))
        .unwrap_or(usize::MAX)
}

/// Filled DP table for one allocation.
///
/// Row `i` holds `best(i, r)` for every `r` in `0..=capacity`.
struct KnapsackTable {
    width: usize,
    capacity: usize,
    items: usize,
    best: Vec<u64>,
    take: Vec<bool>,
}

impl KnapsackTable {
    fn solve(weights: &[usize], values: &[u64], capacity: usize) -> Self {
        let items = weights.len();
        let width = capacity + 1;
        let mut best = vec![0u64; (items + 1) * width];
        let mut take = vec![false; items * width];

        for i in (0..items).rev() {
            let (row, next) = best.split_at_mut((i + 1) * width);
            let row = &mut row[i * width..];
            let next = &next[..width];

            for r in 0..width {
                let skip = next[r];
                row[r] = skip;
                if weights[i] <= r {
                    let with = next[r - weights[i]].saturating_add(values[i]);
                    if with > skip {
                        row[r] = with;
                        take[i * width + r] = true;
                    }
                }
            }
        }

        Self {
            width,
            capacity,
            items,
            best,
            take,
        }
    }

    fn best_value(&self) -> u64 {
        self.best[self.capacity]
    }

    /// Chosen item indices, deepest decision first.
    fn chosen(&self, weights: &[usize]) -> Vec<usize> {
        let mut chosen = Vec::new();
        let mut remaining = self.capacity;
        for i in 0..self.items {
            if self.take[i * self.width + remaining] {
                chosen.push(i);
                remaining -= weights[i];
            }
        }
        chosen.reverse();
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::Rounding;
    use proptest::prelude::*;

    fn unflagged(hours: u32) -> Candidate {
        Candidate::new(1, "Candidate_1", hours, false)
    }

    fn flagged(hours: u32) -> Candidate {
        Candidate::new(7, "Candidate_7", hours, true)
    }

    fn assert_consistent(allocation: &Allocation, capacity: u32) {
        assert!(allocation.total_hours <= u64::from(capacity));
        assert_eq!(allocation.adjusted_impact, allocation.best_value);
        assert_eq!(allocation.course_ids.len(), allocation.course_titles.len());
        assert_eq!(allocation.course_ids.len(), allocation.chosen_indices.len());
    }

    #[test]
    fn test_single_course_fits() {
        let catalog = vec![Course::new(1, "Intro to AI", 10, 12.0)];
        let allocation = allocate(&unflagged(10), &catalog).unwrap();

        assert_eq!(allocation.course_ids, vec![1]);
        assert_eq!(allocation.course_titles, vec!["Intro to AI".to_string()]);
        assert_eq!(allocation.adjusted_impact, 12);
        assert_eq!(allocation.total_hours, 10);
        assert_consistent(&allocation, 10);
    }

    #[test]
    fn test_single_course_too_long() {
        let catalog = vec![Course::new(1, "Intro to AI", 10, 12.0)];
        let allocation = allocate(&unflagged(9), &catalog).unwrap();

        assert!(allocation.is_empty());
        assert_eq!(allocation.adjusted_impact, 0);
        assert_eq!(allocation.best_value, 0);
    }

    #[test]
    fn test_vulnerable_bonus() {
        let catalog = vec![Course::new(4, "UX Design", 5, 10.0)];
        let allocation = allocate(&flagged(5), &catalog).unwrap();

        assert_eq!(allocation.course_ids, vec![4]);
        assert_eq!(allocation.adjusted_impact, 13);
        assert!((allocation.raw_impact - 10.0).abs() < 1e-12);
        assert_consistent(&allocation, 5);
    }

    #[test]
    fn test_two_identical_courses_both_taken() {
        let catalog = vec![
            Course::new(1, "A", 5, 6.0),
            Course::new(1, "A", 5, 6.0),
        ];
        let allocation = allocate(&unflagged(10), &catalog).unwrap();

        // duplicate identifiers are independent rows
        assert_eq!(allocation.chosen_indices, vec![1, 0]);
        assert_eq!(allocation.course_ids, vec![1, 1]);
        assert_eq!(allocation.total_hours, 10);
        assert_eq!(allocation.adjusted_impact, 12);
    }

    #[test]
    fn test_empty_catalog() {
        let allocation = allocate(&unflagged(40), &[]).unwrap();
        assert!(allocation.is_empty());
        assert_eq!(allocation.adjusted_impact, 0);
        assert_eq!(allocation.total_hours, 0);
    }

    #[test]
    fn test_zero_capacity() {
        let catalog = vec![Course::new(1, "A", 1, 5.0), Course::new(2, "B", 3, 9.0)];
        let allocation = allocate(&unflagged(0), &catalog).unwrap();
        assert!(allocation.is_empty());
    }

    #[test]
    fn test_zero_weight_course_always_taken() {
        let catalog = vec![
            Course::new(1, "Full", 10, 12.0),
            Course::new(2, "Free", 0, 5.0),
        ];
        let allocation = allocate(&unflagged(10), &catalog).unwrap();
        assert_eq!(allocation.chosen_indices, vec![1, 0]);
        assert_eq!(allocation.adjusted_impact, 17);

        let allocation = allocate(&unflagged(0), &catalog).unwrap();
        assert_eq!(allocation.course_ids, vec![2]);
        assert_eq!(allocation.adjusted_impact, 5);
    }

    #[test]
    fn test_tie_keeps_skip_branch() {
        let catalog = vec![Course::new(1, "A", 5, 6.0), Course::new(2, "B", 5, 6.0)];
        let allocation = allocate(&unflagged(5), &catalog).unwrap();
        assert_eq!(allocation.course_ids, vec![2]);
    }

    #[test]
    fn test_zero_value_course_skipped() {
        let catalog = vec![Course::new(1, "Filler", 2, 0.0)];
        let allocation = allocate(&unflagged(10), &catalog).unwrap();
        assert!(allocation.is_empty());
    }

    #[test]
    fn test_chosen_order_is_descending_index() {
        let catalog = vec![
            Course::new(10, "A", 2, 3.0),
            Course::new(20, "B", 50, 100.0),
            Course::new(30, "C", 2, 3.0),
            Course::new(40, "D", 2, 3.0),
        ];
        let allocation = allocate(&unflagged(6), &catalog).unwrap();
        assert_eq!(allocation.chosen_indices, vec![3, 2, 0]);
        assert_eq!(allocation.course_ids, vec![40, 30, 10]);
    }

    #[test]
    fn test_rounding_changes_selection() {
        // half-even: A and B score 2 each, so C (5) wins.
        // half-up: A and B score 3 each and beat C together.
        let catalog = vec![
            Course::new(1, "A", 1, 2.5),
            Course::new(2, "B", 1, 2.5),
            Course::new(3, "C", 2, 5.0),
        ];
        let candidate = unflagged(2);

        let even = Allocator::default().allocate(&candidate, &catalog).unwrap();
        assert_eq!(even.course_ids, vec![3]);
        assert_eq!(even.adjusted_impact, 5);

        let up = Allocator::new(AllocatorConfig::default().with_rounding(Rounding::HalfUp))
            .unwrap()
            .allocate(&candidate, &catalog)
            .unwrap();
        assert_eq!(up.course_ids, vec![2, 1]);
        assert_eq!(up.adjusted_impact, 6);
    }

    #[test]
    fn test_huge_scores_saturate() {
        let catalog = vec![Course::new(1, "A", 1, 1e19), Course::new(2, "B", 1, 1e19)];
        let allocation = allocate(&unflagged(2), &catalog).unwrap();

        assert_eq!(allocation.chosen_indices, vec![1, 0]);
        assert_eq!(allocation.best_value, u64::MAX);
        assert_eq!(allocation.adjusted_impact, allocation.best_value);
    }

    #[test]
    fn test_invalid_score_rejected() {
        let catalog = vec![Course::new(5, "Bad", 1, f64::NAN)];
        assert!(matches!(
            allocate(&unflagged(5), &catalog),
            Err(Error::InvalidScore { course: 5, .. })
        ));
    }

    #[test]
    fn test_table_guard() {
        let allocator =
            Allocator::new(AllocatorConfig::default().with_max_table_cells(10)).unwrap();
        let catalog = vec![Course::new(1, "A", 1, 1.0)];
        assert_eq!(
            allocator.allocate(&unflagged(10), &catalog),
            Err(Error::TableTooLarge {
                cells: 22,
                limit: 10,
            })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AllocatorConfig::default().with_vulnerable_factor(f64::INFINITY);
        assert!(Allocator::new(config).is_err());
    }

    #[test]
    fn test_deterministic() {
        let catalog = crate::sample::sample_courses();
        let candidate = flagged(45);
        let first = allocate(&candidate, &catalog).unwrap();
        let second = allocate(&candidate, &catalog).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_allocate_all_preserves_order() {
        let catalog = crate::sample::sample_courses();
        let candidates: Vec<Candidate> = (1..=6)
            .map(|i| Candidate::new(i, format!("C{i}"), (i as u32) * 7, i % 2 == 0))
            .collect();

        let allocator = Allocator::new(AllocatorConfig::default().with_parallel(true)).unwrap();
        let batch = allocator.allocate_all(&candidates, &catalog).unwrap();

        assert_eq!(batch.len(), candidates.len());
        for (candidate, allocation) in candidates.iter().zip(&batch) {
            assert_eq!(allocation.candidate_id, candidate.id);
            assert_eq!(allocation, &allocator.allocate(candidate, &catalog).unwrap());
        }
    }

    #[test]
    fn test_allocate_all_stops_on_error() {
        let allocator = Allocator::new(AllocatorConfig::default().with_max_table_cells(100)).unwrap();
        let catalog = vec![Course::new(1, "A", 1, 1.0)];
        let candidates = vec![unflagged(10), unflagged(1000)];
        assert!(matches!(
            allocator.allocate_all(&candidates, &catalog),
            Err(Error::TableTooLarge { .. })
        ));
    }

    // ---- brute force reference ----

    fn brute_force(weights: &[u32], values: &[u64], capacity: u32) -> u64 {
        let n = weights.len();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let mut hours = 0u64;
            let mut value = 0u64;
            for i in 0..n {
                if mask & (1 << i) != 0 {
                    hours += u64::from(weights[i]);
                    value += values[i];
                }
            }
            if hours <= u64::from(capacity) && value > best {
                best = value;
            }
        }
        best
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<Course>> {
        proptest::collection::vec((0u32..9, 0u32..40), 0..11).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (hours, impact))| {
                    Course::new(i as u64, format!("course-{i}"), hours, f64::from(impact) / 2.0)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn property_optimal_and_feasible(
            catalog in arb_catalog(),
            capacity in 0u32..30,
            vulnerable in any::<bool>(),
        ) {
            let candidate = Candidate::new(1, "P", capacity, vulnerable);
            let config = AllocatorConfig::default();
            let allocation = Allocator::default().allocate(&candidate, &catalog).unwrap();

            let modifier = ScoreModifier::for_candidate(&config, &candidate);
            let weights: Vec<u32> = catalog.iter().map(|c| c.hours).collect();
            let values: Vec<u64> = catalog.iter().map(|c| modifier.adjust(c.impact)).collect();

            prop_assert!(allocation.total_hours <= u64::from(capacity));
            prop_assert_eq!(allocation.adjusted_impact, allocation.best_value);
            prop_assert_eq!(allocation.best_value, brute_force(&weights, &values, capacity));

            let mut indices = allocation.chosen_indices.clone();
            indices.dedup();
            prop_assert_eq!(indices.len(), allocation.chosen_indices.len());
            for pair in allocation.chosen_indices.windows(2) {
                prop_assert!(pair[0] > pair[1]);
            }

            let raw: f64 = allocation.chosen_indices.iter().map(|&i| catalog[i].impact).sum();
            prop_assert!((allocation.raw_impact - raw).abs() < 1e-9);
        }
    }
}
