//! Plan parameter data structures matching the plan block format

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Cadence at which the recurring contribution is specified
///
/// Monthly amounts are annualized (x12) before being applied once per
/// period. This is an annualization convention, not a monthly-compounding
/// model: compounding always happens once per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionCadence {
    /// Contribution is already a per-period (yearly) amount
    Yearly,
    /// Contribution is a monthly amount, annualized before use
    Monthly,
}

impl ContributionCadence {
    /// Annualization multiplier applied to the raw contribution
    pub fn periods_per_year(&self) -> f64 {
        match self {
            ContributionCadence::Yearly => 1.0,
            ContributionCadence::Monthly => 12.0,
        }
    }
}

/// Inputs for a single projection
///
/// A plain value object: the engine never mutates it, and every computation
/// is a pure function of these fields plus the engine config.
///
/// Equality is exact field-wise comparison. For the looser "same computed
/// final value" comparison use
/// [`ProjectionEngine::same_projected_value`](crate::projection::ProjectionEngine::same_projected_value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanParameters {
    /// Initial amount invested. Expected zero or positive; negative values
    /// are not rejected and project as debt.
    pub principal: f64,

    /// Number of compounding periods (abstract years)
    pub periods: u32,

    /// Amount added each period, before cadence adjustment. Sign is
    /// unconstrained.
    pub contribution: f64,

    /// Whether `contribution` is a yearly or monthly amount
    pub cadence: ContributionCadence,

    /// Rate of return in percent, applied once per period. May be negative.
    pub rate_of_return_pct: f64,
}

impl PlanParameters {
    /// Create plan parameters with a yearly contribution
    pub fn new(principal: f64, periods: u32, contribution: f64, rate_of_return_pct: f64) -> Self {
        Self::with_cadence(
            principal,
            periods,
            contribution,
            ContributionCadence::Yearly,
            rate_of_return_pct,
        )
    }

    /// Create plan parameters with an explicit contribution cadence
    pub fn with_cadence(
        principal: f64,
        periods: u32,
        contribution: f64,
        cadence: ContributionCadence,
        rate_of_return_pct: f64,
    ) -> Self {
        Self {
            principal,
            periods,
            contribution,
            cadence,
            rate_of_return_pct,
        }
    }

    /// Create plan parameters from a raw (possibly negative) period count
    ///
    /// Callers parsing untrusted input go through here so a negative period
    /// count is rejected before any projection loop runs.
    pub fn try_new(
        principal: f64,
        periods: i64,
        contribution: f64,
        cadence: ContributionCadence,
        rate_of_return_pct: f64,
    ) -> Result<Self, ProjectionError> {
        if periods < 0 {
            return Err(ProjectionError::InvalidPeriods(periods));
        }
        Ok(Self::with_cadence(
            principal,
            periods as u32,
            contribution,
            cadence,
            rate_of_return_pct,
        ))
    }

    /// Contribution actually applied each period, after cadence adjustment
    ///
    /// This same adjusted amount feeds the engine's final-period subtraction.
    pub fn per_period_contribution(&self) -> f64 {
        self.contribution * self.cadence.periods_per_year()
    }

    /// Per-period growth factor implied by the rate of return
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.rate_of_return_pct / 100.0
    }
}
