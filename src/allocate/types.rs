//! Catalog courses, candidates and allocation results.

use crate::error::{Error, Result};
use crate::sort::{FieldSource, Record, Value};

/// A course in the shared catalog.
///
/// `hours` is the knapsack weight; `impact` is the base value before any
/// score adjustment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    /// Course identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Hours the course takes.
    pub hours: u32,
    /// Base impact score, non-negative.
    pub impact: f64,
}

impl Course {
    /// Record field holding the identifier.
    pub const ID: &'static str = "course_id";
    /// Record field holding the title.
    pub const TITLE: &'static str = "title";
    /// Record field holding the hours.
    pub const HOURS: &'static str = "hours";
    /// Record field holding the impact score.
    pub const IMPACT: &'static str = "impact_score";

    /// Creates a course.
    pub fn new(id: u64, title: impl Into<String>, hours: u32, impact: f64) -> Self {
        Self {
            id,
            title: title.into(),
            hours,
            impact,
        }
    }

    /// Builds a course from a generic record.
    ///
    /// Hours are truncated toward zero when given as a float. Negative or
    /// non-finite hours fail with [`Error::InvalidWeight`].
    pub fn from_record(record: &Record) -> Result<Self> {
        let id = read_id(record, Self::ID)?;
        let title = read_text(record, Self::TITLE)?;
        let hours_value = record.require(Self::HOURS)?;
        let hours = coerce_hours(hours_value, Self::HOURS)?.ok_or_else(|| Error::InvalidWeight {
            course: id,
            value: hours_value.to_string(),
        })?;
        let impact = read_number(record, Self::IMPACT)?;

        let course = Self::new(id, title, hours, impact);
        course.validate()?;
        Ok(course)
    }

    /// Checks that the impact score is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.impact.is_finite() || self.impact < 0.0 {
            return Err(Error::InvalidScore {
                course: self.id,
                value: self.impact,
            });
        }
        Ok(())
    }
}

impl FieldSource for Course {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            Self::ID => i64::try_from(self.id).ok().map(Value::Int),
            Self::TITLE => Some(Value::Str(self.title.clone())),
            Self::HOURS => Some(Value::from(self.hours)),
            Self::IMPACT => Some(Value::Float(self.impact)),
            _ => None,
        }
    }
}

/// A candidate receiving a course allocation.
///
/// Only `hours_available` and `vulnerable` influence the allocation. Any
/// other attributes live in `profile` and are visible to the sorter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Candidate identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Hours the candidate can spend; the knapsack capacity.
    pub hours_available: u32,
    /// Whether the score bonus applies.
    pub vulnerable: bool,
    /// Remaining profile attributes.
    pub profile: Record,
}

impl Candidate {
    /// Record field holding the identifier.
    pub const ID: &'static str = "id";
    /// Record field holding the display name.
    pub const NAME: &'static str = "name";
    /// Record field holding the available hours.
    pub const HOURS_AVAILABLE: &'static str = "hours_available";
    /// Record field holding the vulnerability flag.
    pub const VULNERABLE: &'static str = "vulnerable";

    /// Creates a candidate with an empty profile.
    pub fn new(id: u64, name: impl Into<String>, hours_available: u32, vulnerable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            hours_available,
            vulnerable,
            profile: Record::new(),
        }
    }

    /// Adds a profile attribute.
    pub fn with_profile(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(name, value);
        self
    }

    /// Builds a candidate from a generic record.
    ///
    /// An absent vulnerability flag means `false`. Fields other than the
    /// four core attributes are copied into `profile` in record order.
    pub fn from_record(record: &Record) -> Result<Self> {
        let id = read_id(record, Self::ID)?;
        let name = read_text(record, Self::NAME)?;
        let hours_value = record.require(Self::HOURS_AVAILABLE)?;
        let hours_available = coerce_hours(hours_value, Self::HOURS_AVAILABLE)?.ok_or_else(|| {
            Error::InvalidCapacity {
                candidate: id,
                value: hours_value.to_string(),
            }
        })?;
        let vulnerable = match record.get(Self::VULNERABLE) {
            None => false,
            Some(v) => v
                .as_bool()
                .ok_or_else(|| Error::mismatch(Self::VULNERABLE, "boolean", v.describe()))?,
        };

        let core = [Self::ID, Self::NAME, Self::HOURS_AVAILABLE, Self::VULNERABLE];
        let profile = record
            .iter()
            .filter(|(n, _)| !core.contains(n))
            .map(|(n, v)| (n, v.clone()))
            .collect();

        Ok(Self {
            id,
            name,
            hours_available,
            vulnerable,
            profile,
        })
    }
}

impl FieldSource for Candidate {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            Self::ID => i64::try_from(self.id).ok().map(Value::Int),
            Self::NAME => Some(Value::Str(self.name.clone())),
            Self::HOURS_AVAILABLE => Some(Value::from(self.hours_available)),
            Self::VULNERABLE => Some(Value::Bool(self.vulnerable)),
            other => self.profile.field(other),
        }
    }
}

/// Optimal course selection for one candidate.
///
/// Chosen courses are listed in reconstruction order: the item decided
/// last in the recursion comes first, so indices run from the highest
/// chosen catalog position down to the lowest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// Candidate identifier.
    pub candidate_id: u64,
    /// Candidate display name.
    pub candidate_name: String,
    /// Catalog positions of the chosen courses.
    pub chosen_indices: Vec<usize>,
    /// Identifiers of the chosen courses.
    pub course_ids: Vec<u64>,
    /// Titles of the chosen courses, parallel to `course_ids`.
    pub course_titles: Vec<String>,
    /// Sum of chosen course hours.
    pub total_hours: u64,
    /// Sum of unadjusted impact scores.
    pub raw_impact: f64,
    /// Sum of adjusted values.
    pub adjusted_impact: u64,
    /// Optimal value reported by the DP table; equals `adjusted_impact`.
    pub best_value: u64,
}

impl Allocation {
    /// Number of chosen courses.
    pub fn course_count(&self) -> usize {
        self.course_ids.len()
    }

    /// Whether no course was chosen.
    pub fn is_empty(&self) -> bool {
        self.course_ids.is_empty()
    }
}

// ---- record coercion ----

fn read_id(record: &Record, field: &str) -> Result<u64> {
    let value = record.require(field)?;
    match value {
        Value::Int(i) if *i >= 0 => Ok(*i as u64),
        Value::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => Ok(*f as u64),
        other => Err(Error::mismatch(field, "non-negative integer", other.to_string())),
    }
}

fn read_text(record: &Record, field: &str) -> Result<String> {
    let value = record.require(field)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::mismatch(field, "string", value.describe()))
}

fn read_number(record: &Record, field: &str) -> Result<f64> {
    let value = record.require(field)?;
    value
        .as_f64()
        .ok_or_else(|| Error::mismatch(field, "number", value.describe()))
}

/// Coerces a numeric value to whole hours.
///
/// `Err` means the value is not a number at all. `Ok(None)` means it is a
/// number outside `0..=u32::MAX` or non-finite; the caller picks the
/// domain-specific error.
fn coerce_hours(value: &Value, field: &str) -> Result<Option<u32>> {
    match value {
        Value::Int(i) => Ok(u32::try_from(*i).ok()),
        Value::Float(f) if f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Ok(Some(f.trunc() as u32))
        }
        Value::Float(_) => Ok(None),
        other => Err(Error::mismatch(field, "number", other.describe())),
    }
}
