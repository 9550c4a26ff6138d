//! Allocator configuration and the score adjustment policy.

use super::types::Candidate;
use crate::error::{Error, Result};

/// Score multiplier applied to vulnerable candidates.
pub const VULNERABLE_BONUS: f64 = 1.3;

/// Score multiplier applied to everyone else.
pub const BASELINE_FACTOR: f64 = 1.0;

/// Default upper bound on DP table cells, `(courses + 1) * (hours + 1)`.
///
/// Each cell costs 9 bytes (a `u64` value and a `bool` decision), so the
/// default caps one allocation at roughly 90 MB.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 10_000_000;

/// How an adjusted score is rounded to an integer value.
///
/// The choice matters only when `impact * factor` lands exactly on `.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Ties go to the even neighbour: `2.5 -> 2`, `3.5 -> 4`.
    #[default]
    HalfEven,

    /// Ties go up: `2.5 -> 3`. Scores are non-negative, so this is the
    /// same as rounding half away from zero.
    HalfUp,
}

impl Rounding {
    /// Rounds `x` to the nearest integral float.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::HalfEven => x.round_ties_even(),
            Rounding::HalfUp => x.round(),
        }
    }
}

/// Multiplicative score adjustment for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreModifier {
    factor: f64,
    rounding: Rounding,
}

impl ScoreModifier {
    /// Creates a modifier with an explicit factor.
    pub fn new(factor: f64, rounding: Rounding) -> Self {
        Self { factor, rounding }
    }

    /// Picks the factor for `candidate` from `config`.
    pub fn for_candidate(config: &AllocatorConfig, candidate: &Candidate) -> Self {
        Self::new(config.factor_for(candidate.vulnerable), config.rounding)
    }

    /// The multiplier.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Adjusted integer value of a base impact score.
    ///
    /// `base` must be finite and non-negative; the result saturates at
    /// `u64::MAX`.
    pub fn adjust(&self, base: f64) -> u64 {
        self.rounding.apply(base * self.factor) as u64
    }
}

/// Configuration for the course allocator.
///
/// # Examples
///
/// ```
/// use u_allot::allocate::{AllocatorConfig, Rounding};
///
/// let config = AllocatorConfig::default()
///     .with_vulnerable_factor(1.5)
///     .with_rounding(Rounding::HalfUp)
///     .with_max_table_cells(1_000_000);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.factor_for(true), 1.5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocatorConfig {
    /// Multiplier for vulnerable candidates.
    pub vulnerable_factor: f64,

    /// Multiplier for all other candidates.
    pub baseline_factor: f64,

    /// Rounding applied to adjusted scores.
    pub rounding: Rounding,

    /// Largest DP table a single allocation may build, at 9 bytes per cell.
    pub max_table_cells: usize,

    /// Whether batch allocation fans out across threads.
    ///
    /// Only effective with the `parallel` cargo feature.
    pub parallel: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            vulnerable_factor: VULNERABLE_BONUS,
            baseline_factor: BASELINE_FACTOR,
            rounding: Rounding::default(),
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            parallel: false,
        }
    }
}

impl AllocatorConfig {
    pub fn with_vulnerable_factor(mut self, factor: f64) -> Self {
        self.vulnerable_factor = factor;
        self
    }

    pub fn with_baseline_factor(mut self, factor: f64) -> Self {
        self.baseline_factor = factor;
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score multiplier for a candidate with the given flag.
    pub fn factor_for(&self, vulnerable: bool) -> f64 {
        if vulnerable {
            self.vulnerable_factor
        } else {
            self.baseline_factor
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, factor) in [
            ("vulnerable_factor", self.vulnerable_factor),
            ("baseline_factor", self.baseline_factor),
        ] {
            if !factor.is_finite() || factor < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {factor}"
                )));
            }
        }
        if self.max_table_cells == 0 {
            return Err(Error::InvalidConfig(
                "max_table_cells must be positive".into(),
            ));
        }
        Ok(())
    }
}
