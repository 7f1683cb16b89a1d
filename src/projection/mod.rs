//! Projection engine for value, growing-contribution, and goal projections

mod engine;
mod samples;

pub use engine::{ContributionTiming, GoalComparison, ProjectionConfig, ProjectionEngine};
pub use samples::{GoalProjection, PeriodRow, ProjectionResult, ProjectionSummary};
