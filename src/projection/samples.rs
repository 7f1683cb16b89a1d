//! Sample and result structures for projections

use serde::{Deserialize, Serialize};

/// One charted sample: the running portfolio value at the end of a period
///
/// Values here are the raw running balance. The engine's final-contribution
/// subtraction applies only to [`ProjectionResult::final_value`], never to
/// the recorded rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// 1-based period index
    pub period: u32,
    /// Portfolio value after this period's compounding and contribution
    pub value: f64,
}

/// Result of a value projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Final portfolio value, with the last period's contribution
    /// subtracted back out
    pub final_value: f64,

    /// Per-period samples in period order, empty when detailed output is
    /// disabled
    pub rows: Vec<PeriodRow>,
}

impl ProjectionResult {
    pub fn new(final_value: f64, rows: Vec<PeriodRow>) -> Self {
        Self { final_value, rows }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            total_periods: self.rows.len() as u32,
            first_value: self.rows.first().map(|r| r.value),
            peak_value: self.rows.iter().map(|r| r.value).reduce(f64::max),
            final_value: self.final_value,
        }
    }
}

/// Result of a goal-seeking projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProjection {
    /// Whole periods elapsed before the goal comparison stopped holding
    pub periods: u32,

    /// Running portfolio value when the loop terminated
    pub final_value: f64,

    /// Per-period samples accumulated along the way, empty when detailed
    /// output is disabled
    pub rows: Vec<PeriodRow>,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_periods: u32,
    pub first_value: Option<f64>,
    /// Largest recorded running value; `None` when no rows were collected
    /// (zero periods, or detailed output disabled)
    pub peak_value: Option<f64>,
    pub final_value: f64,
}
