//! Core projection engine for compound-growth projections

use crate::error::ProjectionError;
use crate::plan::PlanParameters;

use super::samples::{GoalProjection, PeriodRow, ProjectionResult};

/// When the contribution lands relative to the compounding step
///
/// Calculator-style and chart-style front ends disagree on this ordering,
/// so both are exposed as named policies rather than reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionTiming {
    /// Compound first, then add the contribution (calculator behavior)
    EndOfPeriod,
    /// Add the contribution first, then compound (chart-view behavior)
    StartOfPeriod,
}

/// Termination test for goal-seeking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalComparison {
    /// Keep going while `value <= goal`: landing exactly on the goal does
    /// not terminate, the result strictly exceeds it
    Exceed,
    /// Keep going while `value < goal`: landing exactly on the goal counts
    Reach,
}

impl GoalComparison {
    fn holds(&self, value: f64, goal: f64) -> bool {
        match self {
            GoalComparison::Exceed => value <= goal,
            GoalComparison::Reach => value < goal,
        }
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Contribution timing for the value projections
    pub value_timing: ContributionTiming,

    /// Contribution timing for goal-seeking
    pub goal_timing: ContributionTiming,

    /// Termination test for goal-seeking
    pub goal_comparison: GoalComparison,

    /// Whether to collect per-period sample rows
    pub detailed_output: bool,

    /// Hard iteration cutoff for goal-seeking. Hitting it reports
    /// `NonTerminatingGoal` instead of looping forever.
    pub max_goal_periods: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            value_timing: ContributionTiming::EndOfPeriod,
            goal_timing: ContributionTiming::StartOfPeriod,
            goal_comparison: GoalComparison::Exceed,
            detailed_output: true,
            max_goal_periods: 10_000,
        }
    }
}

/// Main projection engine
///
/// Holds configuration only; plan parameters are passed per call and never
/// mutated, so every computation is a pure function of `(config, plan)` and
/// repeated calls give identical results.
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project the final portfolio value after `plan.periods` periods
    ///
    /// Each period compounds the running value by the rate of return and
    /// adds the cadence-adjusted contribution, ordered per
    /// `config.value_timing`. The final period's contribution is subtracted
    /// back out of the returned `final_value`: the contribution for the
    /// period the loop exits on is not counted. With `periods == 0` this
    /// yields `principal - contribution`.
    pub fn project_value(&self, plan: &PlanParameters) -> Result<ProjectionResult, ProjectionError> {
        let contribution = plan.per_period_contribution();
        let factor = plan.growth_factor();

        let mut value = plan.principal;
        let mut rows = self.row_buffer(plan.periods as usize);

        for period in 1..=plan.periods {
            value = self.apply_period(value, contribution, factor, self.config.value_timing);

            if !value.is_finite() {
                return Err(ProjectionError::NumericOverflow { period });
            }
            if self.config.detailed_output {
                rows.push(PeriodRow { period, value });
            }
        }

        Ok(ProjectionResult::new(value - contribution, rows))
    }

    /// Project the final value when the contribution itself grows by
    /// `growth_rate_pct` percent each period
    ///
    /// Starts from the base projection, then runs a second loop of
    /// `plan.periods` iterations that keeps compounding the balance while a
    /// local copy of the contribution grows. The growing contribution is
    /// never added to the balance in this phase; it only feeds the final
    /// subtraction. Second-phase rows continue the period numbering so the
    /// whole trajectory charts as one series.
    pub fn project_with_growing_contribution(
        &self,
        plan: &PlanParameters,
        growth_rate_pct: f64,
    ) -> Result<ProjectionResult, ProjectionError> {
        let base = self.project_value(plan)?;
        let factor = plan.growth_factor();
        let contribution_growth = 1.0 + growth_rate_pct / 100.0;

        let mut value = base.final_value;
        let mut contribution = plan.per_period_contribution();
        let mut rows = base.rows;

        for offset in 1..=plan.periods {
            let period = plan.periods + offset;
            value *= factor;
            contribution *= contribution_growth;

            if !value.is_finite() || !contribution.is_finite() {
                return Err(ProjectionError::NumericOverflow { period });
            }
            if self.config.detailed_output {
                rows.push(PeriodRow { period, value });
            }
        }

        Ok(ProjectionResult::new(value - contribution, rows))
    }

    /// Count the whole periods needed for the portfolio to pass `goal_value`
    ///
    /// Forward simulation with the same per-period step as the value
    /// projections, ordered per `config.goal_timing` and terminated per
    /// `config.goal_comparison`. A goal that cannot be reached (non-positive
    /// rate and non-positive contribution, or more than
    /// `config.max_goal_periods` iterations) reports `NonTerminatingGoal`.
    pub fn periods_to_reach_goal(
        &self,
        plan: &PlanParameters,
        goal_value: f64,
    ) -> Result<GoalProjection, ProjectionError> {
        let contribution = plan.per_period_contribution();
        let factor = plan.growth_factor();
        let comparison = self.config.goal_comparison;

        let mut value = plan.principal;

        // Fast reject: the loop would run but no step can increase value
        if comparison.holds(value, goal_value)
            && plan.rate_of_return_pct <= 0.0
            && contribution <= 0.0
        {
            return Err(self.non_terminating(goal_value));
        }

        let mut count: u32 = 0;
        let mut rows = self.row_buffer(0);

        while comparison.holds(value, goal_value) {
            if count >= self.config.max_goal_periods {
                return Err(self.non_terminating(goal_value));
            }

            value = self.apply_period(value, contribution, factor, self.config.goal_timing);
            count += 1;

            if !value.is_finite() {
                return Err(ProjectionError::NumericOverflow { period: count });
            }
            if self.config.detailed_output {
                rows.push(PeriodRow { period: count, value });
            }
        }

        Ok(GoalProjection {
            periods: count,
            final_value: value,
            rows,
        })
    }

    /// Whether two plans project to exactly the same final value
    ///
    /// Output-value comparison, distinct from `PlanParameters` equality
    /// which compares fields. Two differently-parameterized plans that land
    /// on the same number compare equal here.
    pub fn same_projected_value(
        &self,
        a: &PlanParameters,
        b: &PlanParameters,
    ) -> Result<bool, ProjectionError> {
        Ok(self.project_value(a)?.final_value == self.project_value(b)?.final_value)
    }

    fn apply_period(
        &self,
        value: f64,
        contribution: f64,
        factor: f64,
        timing: ContributionTiming,
    ) -> f64 {
        match timing {
            ContributionTiming::EndOfPeriod => value * factor + contribution,
            ContributionTiming::StartOfPeriod => (value + contribution) * factor,
        }
    }

    fn row_buffer(&self, capacity: usize) -> Vec<PeriodRow> {
        if self.config.detailed_output {
            Vec::with_capacity(capacity)
        } else {
            Vec::new()
        }
    }

    fn non_terminating(&self, goal: f64) -> ProjectionError {
        ProjectionError::NonTerminatingGoal {
            goal,
            max_periods: self.config.max_goal_periods,
        }
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ContributionCadence;
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::default()
    }

    #[test]
    fn test_zero_rate_zero_contribution_returns_principal() {
        for periods in [0, 1, 10, 100] {
            let plan = PlanParameters::new(1234.56, periods, 0.0, 0.0);
            let result = engine().project_value(&plan).unwrap();
            assert_eq!(result.final_value, 1234.56);
        }
    }

    #[test]
    fn test_zero_periods_subtracts_contribution() {
        let plan = PlanParameters::new(1000.0, 0, 100.0, 7.0);
        let result = engine().project_value(&plan).unwrap();
        assert_eq!(result.final_value, 900.0);
        assert!(result.rows.is_empty());

        // Monthly cadence subtracts the annualized amount
        let monthly =
            PlanParameters::with_cadence(1000.0, 0, 100.0, ContributionCadence::Monthly, 7.0);
        let result = engine().project_value(&monthly).unwrap();
        assert_eq!(result.final_value, 1000.0 - 1200.0);
    }

    #[test]
    fn test_concrete_ten_year_projection() {
        // 1000 at 7% with 100/yr: compound-then-add for 10 periods, then
        // the last contribution comes back out.
        let plan = PlanParameters::new(1000.0, 10, 100.0, 7.0);
        let result = engine().project_value(&plan).unwrap();

        assert_relative_eq!(result.final_value, 3248.7961534175174, epsilon = 1e-9);
        assert_eq!(result.rows.len(), 10);
        assert_relative_eq!(result.rows[0].value, 1170.0, epsilon = 1e-9);
        // The running balance keeps the last contribution; final_value does not
        assert_relative_eq!(
            result.rows[9].value,
            result.final_value + 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_monotone_in_periods() {
        let mut previous = f64::NEG_INFINITY;
        for periods in 0..=25 {
            let plan = PlanParameters::new(500.0, periods, 50.0, 4.0);
            let value = engine().project_value(&plan).unwrap().final_value;
            assert!(
                value >= previous,
                "value {} at {} periods dropped below {}",
                value,
                periods,
                previous
            );
            previous = value;
        }
    }

    #[test]
    fn test_negative_rate_decays() {
        let plan = PlanParameters::new(1000.0, 5, 0.0, -10.0);
        let result = engine().project_value(&plan).unwrap();

        assert_relative_eq!(result.final_value, 1000.0 * 0.9_f64.powi(5), epsilon = 1e-9);

        let mut previous = 1000.0;
        for row in &result.rows {
            assert!(row.value < previous);
            previous = row.value;
        }
    }

    #[test]
    fn test_start_of_period_timing() {
        let config = ProjectionConfig {
            value_timing: ContributionTiming::StartOfPeriod,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(config);

        // (1000 + 100) * 1.07 = 1177, minus the contribution back out
        let plan = PlanParameters::new(1000.0, 1, 100.0, 7.0);
        let result = engine.project_value(&plan).unwrap();
        assert_relative_eq!(result.final_value, 1077.0, epsilon = 1e-9);
    }

    #[test]
    fn test_growing_contribution_concrete() {
        let plan = PlanParameters::new(1000.0, 10, 100.0, 7.0);
        let result = engine()
            .project_with_growing_contribution(&plan, 3.0)
            .unwrap();

        assert_relative_eq!(result.final_value, 6256.48212481798, epsilon = 1e-9);
        // Both phases chart as one series
        assert_eq!(result.rows.len(), 20);
        assert_eq!(result.rows[19].period, 20);
    }

    #[test]
    fn test_growing_contribution_is_pure() {
        let plan = PlanParameters::new(1000.0, 10, 100.0, 7.0);
        let eng = engine();

        let first = eng.project_with_growing_contribution(&plan, 3.0).unwrap();
        let second = eng.project_with_growing_contribution(&plan, 3.0).unwrap();

        // Repeated calls must not compound on each other
        assert_eq!(first.final_value, second.final_value);
        assert_eq!(plan.contribution, 100.0);
    }

    #[test]
    fn test_growing_contribution_zero_growth_only_compounds() {
        let plan = PlanParameters::new(1000.0, 3, 100.0, 7.0);
        let base = engine().project_value(&plan).unwrap().final_value;
        let result = engine()
            .project_with_growing_contribution(&plan, 0.0)
            .unwrap();

        // Second phase compounds the base for 3 more periods; the
        // contribution stays at 100 and comes out at the end.
        let expected = base * 1.07_f64.powi(3) - 100.0;
        assert_relative_eq!(result.final_value, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_goal_seek_monthly_millionaire() {
        // 1000/month annualized to 12000/period at 5%, from zero
        let plan =
            PlanParameters::with_cadence(0.0, 0, 1000.0, ContributionCadence::Monthly, 5.0);
        let result = engine().periods_to_reach_goal(&plan, 1_000_000.0).unwrap();

        assert_eq!(result.periods, 33);
        assert!(result.final_value > 1_000_000.0);
        assert_relative_eq!(result.final_value, 1008803.5125925146, epsilon = 1e-6);
    }

    #[test]
    fn test_goal_seek_boundary() {
        let plan =
            PlanParameters::with_cadence(0.0, 0, 1000.0, ContributionCadence::Monthly, 5.0);
        let goal = 1_000_000.0;
        let result = engine().periods_to_reach_goal(&plan, goal).unwrap();

        let k = result.periods as usize;
        assert!(k >= 2);
        assert!(result.rows[k - 1].value > goal);
        assert!(result.rows[k - 2].value <= goal);
    }

    #[test]
    fn test_goal_seek_end_of_period_timing() {
        let config = ProjectionConfig {
            goal_timing: ContributionTiming::EndOfPeriod,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(config);

        let plan =
            PlanParameters::with_cadence(0.0, 0, 1000.0, ContributionCadence::Monthly, 5.0);
        let result = engine.periods_to_reach_goal(&plan, 1_000_000.0).unwrap();

        // Contribution compounds one period less under this ordering
        assert_eq!(result.periods, 34);
    }

    #[test]
    fn test_goal_seek_exactly_at_goal_keeps_going() {
        // value == goal does not terminate under Exceed
        let plan = PlanParameters::new(1000.0, 0, 0.0, 7.0);
        let result = engine().periods_to_reach_goal(&plan, 1000.0).unwrap();
        assert_eq!(result.periods, 1);
        assert_relative_eq!(result.final_value, 1070.0, epsilon = 1e-9);

        // Under Reach it terminates immediately
        let config = ProjectionConfig {
            goal_comparison: GoalComparison::Reach,
            ..Default::default()
        };
        let result = ProjectionEngine::new(config)
            .periods_to_reach_goal(&plan, 1000.0)
            .unwrap();
        assert_eq!(result.periods, 0);
    }

    #[test]
    fn test_goal_seek_already_past_goal() {
        let plan = PlanParameters::new(5000.0, 0, 100.0, 7.0);
        let result = engine().periods_to_reach_goal(&plan, 1000.0).unwrap();
        assert_eq!(result.periods, 0);
        assert_eq!(result.final_value, 5000.0);
    }

    #[test]
    fn test_goal_seek_rejects_non_positive_growth() {
        let plan = PlanParameters::new(100.0, 0, 0.0, 0.0);
        let err = engine().periods_to_reach_goal(&plan, 1000.0).unwrap_err();
        assert!(matches!(err, ProjectionError::NonTerminatingGoal { .. }));

        // Negative contribution with negative rate is equally hopeless
        let plan = PlanParameters::new(100.0, 0, -10.0, -5.0);
        let err = engine().periods_to_reach_goal(&plan, 1000.0).unwrap_err();
        assert!(matches!(err, ProjectionError::NonTerminatingGoal { .. }));
    }

    #[test]
    fn test_goal_seek_cutoff() {
        // Positive rate but nothing to compound: passes the fast reject,
        // caught by the iteration cutoff instead.
        let config = ProjectionConfig {
            max_goal_periods: 100,
            ..Default::default()
        };
        let plan = PlanParameters::new(0.0, 0, 0.0, 5.0);
        let err = ProjectionEngine::new(config)
            .periods_to_reach_goal(&plan, 1000.0)
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::NonTerminatingGoal {
                goal: 1000.0,
                max_periods: 100
            }
        );
    }

    #[test]
    fn test_numeric_overflow_reported() {
        let plan = PlanParameters::new(1.0e308, 5, 0.0, 100.0);
        let err = engine().project_value(&plan).unwrap_err();
        assert_eq!(err, ProjectionError::NumericOverflow { period: 1 });
    }

    #[test]
    fn test_same_projected_value() {
        let eng = engine();

        // Different inputs, same output: 1000 for 0 periods at any rate
        let a = PlanParameters::new(1000.0, 0, 0.0, 7.0);
        let b = PlanParameters::new(1000.0, 0, 0.0, 3.0);
        assert_ne!(a, b);
        assert!(eng.same_projected_value(&a, &b).unwrap());

        let c = PlanParameters::new(1000.0, 1, 0.0, 7.0);
        assert!(!eng.same_projected_value(&a, &c).unwrap());
    }

    #[test]
    fn test_detailed_output_disabled_keeps_no_rows() {
        let config = ProjectionConfig {
            detailed_output: false,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(config);
        let plan = PlanParameters::new(1000.0, 10, 100.0, 7.0);

        let result = engine.project_value(&plan).unwrap();
        assert!(result.rows.is_empty());
        assert_relative_eq!(result.final_value, 3248.7961534175174, epsilon = 1e-9);

        let goal = engine.periods_to_reach_goal(&plan, 2000.0).unwrap();
        assert!(goal.rows.is_empty());
        assert!(goal.periods > 0);
    }
}
