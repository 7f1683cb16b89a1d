//! WealthCurve - Compound-growth projection engine for recurring-contribution plans
//!
//! This library provides:
//! - Final-value projections for an initial principal with recurring contributions
//! - A growing-contribution variant (contribution increases by a fixed percentage)
//! - Goal-seeking: periods needed for a portfolio to pass a target value
//! - Per-period `(period, value)` sample sequences for charting
//! - Batch projection over CSV plan blocks

pub mod error;
pub mod plan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::ProjectionError;
pub use plan::{ContributionCadence, PlanParameters};
pub use projection::{GoalProjection, PeriodRow, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
