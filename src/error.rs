//! Error types for projection computations

use thiserror::Error;

/// Failures surfaced by the projection engine and plan loaders.
///
/// All variants are local, synchronous computation failures; nothing is
/// retried.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// A negative period count was supplied. Rejected before any loop runs.
    #[error("invalid period count {0}: periods must be non-negative")]
    InvalidPeriods(i64),

    /// Goal-seeking cannot make progress toward the goal, or exceeded the
    /// configured iteration cutoff. Without this guard the simulation would
    /// loop forever.
    #[error("goal of {goal:.2} is unreachable: net per-period growth is non-positive or the {max_periods}-period cutoff was hit")]
    NonTerminatingGoal { goal: f64, max_periods: u32 },

    /// The running portfolio value left the representable f64 range.
    #[error("projection value overflowed the numeric range at period {period}")]
    NumericOverflow { period: u32 },
}
