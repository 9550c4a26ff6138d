//! Error type shared by the sorter and the allocator.

/// Errors raised while validating inputs or running an allocation.
///
/// Every operation fails fast: the first malformed record or candidate
/// aborts the call and is reported to the caller unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A record lacks the sort key or a required attribute.
    #[error("missing field `{field}`")]
    MissingKey {
        /// Name of the absent field.
        field: String,
    },

    /// A field holds a value of the wrong kind, or sort keys are not
    /// mutually comparable.
    #[error("field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        /// Field being read or compared.
        field: String,
        /// Kind the operation required.
        expected: &'static str,
        /// Kind (or value) actually found.
        found: String,
    },

    /// A candidate's available hours are negative or non-finite.
    #[error("candidate {candidate}: invalid hours available {value}")]
    InvalidCapacity {
        /// Candidate identifier.
        candidate: u64,
        /// Offending value, rendered for display.
        value: String,
    },

    /// A course's hours are negative or non-finite.
    #[error("course {course}: invalid hours {value}")]
    InvalidWeight {
        /// Course identifier.
        course: u64,
        /// Offending value, rendered for display.
        value: String,
    },

    /// A course's impact score is negative or non-finite.
    #[error("course {course}: invalid impact score {value}")]
    InvalidScore {
        /// Course identifier.
        course: u64,
        /// Offending value.
        value: f64,
    },

    /// The allocator configuration is unusable.
    #[error("invalid allocator config: {0}")]
    InvalidConfig(String),

    /// The DP table for this candidate would exceed the configured limit.
    #[error("dp table of {cells} cells exceeds limit of {limit}")]
    TableTooLarge {
        /// Cells the table would need.
        cells: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn missing(field: &str) -> Self {
        Error::MissingKey {
            field: field.to_string(),
        }
    }

    pub(crate) fn mismatch(field: &str, expected: &'static str, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            field: field.to_string(),
            expected,
            found: found.into(),
        }
    }
}
