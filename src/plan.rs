//! Rank-then-allocate pipeline.
//!
//! Candidates are merge-sorted ascending by a priority field, reversed to
//! put the highest priority first, and then allocated one by one against
//! the shared catalog. Reversing the stable ascending order means
//! candidates with equal priority appear in reverse input order.

use crate::allocate::{Allocation, Allocator, Candidate, Course};
use crate::error::Result;
use crate::sort::merge_sort_by_key;

/// Profile field used for ranking when the caller has no preference.
pub const DEFAULT_PRIORITY_KEY: &str = "motivation";

/// Orders candidates by `priority_key`, highest first.
pub fn rank_candidates(candidates: &[Candidate], priority_key: &str) -> Result<Vec<Candidate>> {
    let mut ranked = merge_sort_by_key(candidates, priority_key)?;
    ranked.reverse();
    Ok(ranked)
}

/// Ranks candidates and allocates each one, in ranked order.
///
/// # Examples
///
/// ```
/// use u_allot::allocate::Allocator;
/// use u_allot::plan::{plan, DEFAULT_PRIORITY_KEY};
/// use u_allot::sample::{sample_candidates, sample_courses};
///
/// let allocations = plan(
///     &sample_candidates(),
///     &sample_courses(),
///     DEFAULT_PRIORITY_KEY,
///     &Allocator::default(),
/// )
/// .unwrap();
/// assert_eq!(allocations.len(), 22);
/// ```
pub fn plan(
    candidates: &[Candidate],
    catalog: &[Course],
    priority_key: &str,
    allocator: &Allocator,
) -> Result<Vec<Allocation>> {
    let ranked = rank_candidates(candidates, priority_key)?;
    log::debug!(
        "allocating {} candidates by `{}` against {} courses",
        ranked.len(),
        priority_key,
        catalog.len()
    );
    allocator.allocate_all(&ranked, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sample::{sample_candidates, sample_courses};
    use crate::sort::{FieldSource, Value};

    fn with_motivation(id: u64, motivation: i64) -> Candidate {
        Candidate::new(id, format!("C{id}"), 10, false).with_profile("motivation", motivation)
    }

    #[test]
    fn test_rank_highest_first() {
        let candidates = vec![with_motivation(0, 3), with_motivation(1, 7), with_motivation(2, 3)];
        let ranked = rank_candidates(&candidates, "motivation").unwrap();
        let ids: Vec<u64> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn test_rank_missing_key() {
        let candidates = vec![with_motivation(0, 3), Candidate::new(1, "X", 5, false)];
        assert_eq!(
            rank_candidates(&candidates, "motivation"),
            Err(Error::MissingKey {
                field: "motivation".into(),
            })
        );
    }

    #[test]
    fn test_plan_sample_data() {
        let candidates = sample_candidates();
        let catalog = sample_courses();
        let allocations = plan(&candidates, &catalog, DEFAULT_PRIORITY_KEY, &Allocator::default())
            .unwrap();

        assert_eq!(allocations.len(), candidates.len());

        let motivation = |id: u64| {
            candidates
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.profile.get("motivation").cloned())
        };
        for pair in allocations.windows(2) {
            let a = motivation(pair[0].candidate_id);
            let b = motivation(pair[1].candidate_id);
            assert!(a >= b, "{a:?} ranked before {b:?}");
        }

        for allocation in &allocations {
            let candidate = candidates
                .iter()
                .find(|c| c.id == allocation.candidate_id)
                .unwrap();
            assert!(allocation.total_hours <= u64::from(candidate.hours_available));
            assert_eq!(allocation.adjusted_impact, allocation.best_value);
        }
    }

    #[test]
    fn test_plan_top_candidate() {
        // motivation 10 belongs to ids 9 and 19; reversal puts 19 first
        let allocations = plan(
            &sample_candidates(),
            &sample_courses(),
            DEFAULT_PRIORITY_KEY,
            &Allocator::default(),
        )
        .unwrap();
        assert_eq!(allocations[0].candidate_id, 19);
        assert_eq!(allocations[1].candidate_id, 9);
        assert_eq!(
            sample_candidates()[18].field("motivation"),
            Some(Value::Int(10))
        );
    }
}
