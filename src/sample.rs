//! Sample and synthetic allocation instances.
//!
//! [`sample_candidates`] and [`sample_courses`] rebuild the fixed
//! demonstration dataset (22 candidates, 15 courses). The seeded
//! generators produce larger instances for benchmarks and stress tests.
//! Nothing here touches the filesystem.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::allocate::{Candidate, Course};

const EDUCATION: [&str; 4] = ["High school", "Undergraduate", "Technical", "Postgraduate"];
const REGION: [&str; 4] = ["Zone A", "Zone B", "Zone C", "Zone D"];
const FOCUS_AREA: [&str; 5] = ["AI", "Cloud", "UX", "GreenTech", "Data"];
const ENGLISH_LEVEL: [&str; 3] = ["Basic", "Intermediate", "Advanced"];
const EMPLOYMENT: [&str; 4] = ["Unemployed", "Freelancer", "Part-time", "Full-time"];
const DEVICE: [&str; 3] = ["Phone", "Laptop", "Tablet"];
const WORKLOAD: [&str; 3] = ["Short", "Medium", "Long"];

/// The fixed 15-course catalog.
pub fn sample_courses() -> Vec<Course> {
    [
        (1, "Introduction to AI", 10, 12.0),
        (2, "Data Analysis", 15, 15.0),
        (3, "Cybersecurity", 20, 18.0),
        (4, "UX Design", 12, 10.0),
        (5, "Cloud Fundamentals", 8, 9.0),
        (6, "Python Programming", 14, 14.0),
        (7, "Sustainability and Green Economy", 10, 11.0),
        (8, "Communication and Leadership", 6, 8.0),
        (9, "DevOps Basics", 16, 13.0),
        (10, "Impact Business Modeling", 9, 10.0),
        (11, "AI Ethics", 5, 7.0),
        (12, "Game Design", 12, 9.0),
        (13, "Technical English", 20, 16.0),
        (14, "Microentrepreneurship", 8, 8.0),
        (15, "Data Visualization", 10, 11.0),
    ]
    .into_iter()
    .map(|(id, title, hours, impact)| Course::new(id, title, hours, impact))
    .collect()
}

/// The fixed 22-candidate roster, ids `1..=22`.
///
/// Hours available cycle through `10..=55` in steps of five; every
/// seventh candidate is flagged vulnerable.
pub fn sample_candidates() -> Vec<Candidate> {
    (1..=22u32).map(sample_candidate).collect()
}

fn sample_candidate(i: u32) -> Candidate {
    let idx = i as usize;
    Candidate::new(
        u64::from(i),
        format!("Candidate_{i}"),
        (i % 10) * 5 + 10,
        i % 7 == 0,
    )
    .with_profile("age", 18 + i % 10)
    .with_profile("sex", if i % 2 == 0 { "M" } else { "F" })
    .with_profile("education", EDUCATION[idx % 4])
    .with_profile("region", REGION[idx % 4])
    .with_profile("focus_area", FOCUS_AREA[idx % 5])
    .with_profile("english_level", ENGLISH_LEVEL[idx % 3])
    .with_profile("experience_months", (i * 3) % 60)
    .with_profile("employment", EMPLOYMENT[idx % 4])
    .with_profile("salary", if i % 4 == 0 { 0 } else { 1200 + i * 20 })
    .with_profile("internet_access", i % 5 != 0)
    .with_profile("device", DEVICE[idx % 3])
    .with_profile("needs_transport", i % 6 == 0)
    .with_profile("mental_health", 10 - i % 5)
    .with_profile("motivation", i % 10 + 1)
    .with_profile("technical_skill", i % 7 + 1)
    .with_profile("interpersonal_skill", i % 6 + 2)
    .with_profile("workload_preference", WORKLOAD[idx % 3])
    .with_profile("weekend_availability", i % 2 == 0)
    .with_profile(
        "notes",
        if i % 3 == 0 { "Needs financial support" } else { "None" },
    )
}

/// A seeded random catalog of `len` courses with 1..=20 hours and
/// 1..=20 impact each.
pub fn random_catalog(seed: u64, len: usize) -> Vec<Course> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|i| {
            let hours = rng.random_range(1..=20u32);
            let impact = f64::from(rng.random_range(1..=20u32));
            Course::new(i as u64 + 1, format!("Course_{}", i + 1), hours, impact)
        })
        .collect()
}

/// `count` seeded random candidates with up to `max_hours` available.
///
/// Each carries a `motivation` profile field in `1..=10`.
pub fn random_candidates(seed: u64, count: usize, max_hours: u32) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let hours = rng.random_range(0..=max_hours);
            let vulnerable = rng.random_bool(1.0 / 7.0);
            let motivation = rng.random_range(1..=10u32);
            Candidate::new(i as u64 + 1, format!("Candidate_{}", i + 1), hours, vulnerable)
                .with_profile("motivation", motivation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{FieldSource, Value};

    #[test]
    fn test_sample_courses() {
        let courses = sample_courses();
        assert_eq!(courses.len(), 15);
        assert!(courses.iter().all(|c| c.validate().is_ok()));
        assert_eq!(courses[0], Course::new(1, "Introduction to AI", 10, 12.0));
        let total: u32 = courses.iter().map(|c| c.hours).sum();
        assert_eq!(total, 175);
    }

    #[test]
    fn test_sample_candidates() {
        let candidates = sample_candidates();
        assert_eq!(candidates.len(), 22);

        let flagged: Vec<u64> = candidates
            .iter()
            .filter(|c| c.vulnerable)
            .map(|c| c.id)
            .collect();
        assert_eq!(flagged, vec![7, 14, 21]);

        assert!(candidates
            .iter()
            .all(|c| (10..=55).contains(&c.hours_available)));
        assert_eq!(candidates[9].hours_available, 10);
        assert_eq!(candidates[8].field("motivation"), Some(Value::Int(10)));
        assert!(candidates.iter().all(|c| c.profile.len() >= 19));
    }

    #[test]
    fn test_random_catalog_seeded() {
        let a = random_catalog(42, 30);
        let b = random_catalog(42, 30);
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert!(a.iter().all(|c| (1..=20).contains(&c.hours)));
        assert!(a.iter().all(|c| (1.0..=20.0).contains(&c.impact)));
    }

    #[test]
    fn test_random_candidates_seeded() {
        let a = random_candidates(7, 12, 40);
        assert_eq!(a, random_candidates(7, 12, 40));
        assert!(a.iter().all(|c| c.hours_available <= 40));
        assert!(a.iter().all(|c| c.field("motivation").is_some()));
    }
}
