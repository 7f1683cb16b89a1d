//! Scenario runner for efficient batch projections
//!
//! Builds the engine once from a base config, then allows running many
//! projections over plan blocks or rate grids without reconstructing it.

use crate::error::ProjectionError;
use crate::plan::PlanParameters;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-configured scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Run a rate grid for one plan
/// let results = runner.run_rate_scenarios(&plan, &[3.0, 5.0, 7.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the default config
    pub fn new() -> Self {
        Self {
            base_config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with a specific base config
    pub fn with_config(base_config: ProjectionConfig) -> Self {
        Self { base_config }
    }

    /// Run a single value projection with the base config
    pub fn run(&self, plan: &PlanParameters) -> Result<ProjectionResult, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_config.clone());
        engine.project_value(plan)
    }

    /// Run value projections for multiple plans with the same config
    pub fn run_batch(
        &self,
        plans: &[PlanParameters],
    ) -> Result<Vec<ProjectionResult>, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_config.clone());
        plans.iter().map(|p| engine.project_value(p)).collect()
    }

    /// Run one plan across a grid of rate-of-return scenarios
    ///
    /// The plan's own rate is ignored; each result corresponds to one entry
    /// of `rates_pct` in order.
    pub fn run_rate_scenarios(
        &self,
        plan: &PlanParameters,
        rates_pct: &[f64],
    ) -> Result<Vec<ProjectionResult>, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_config.clone());
        rates_pct
            .iter()
            .map(|&rate| {
                let scenario = PlanParameters {
                    rate_of_return_pct: rate,
                    ..plan.clone()
                };
                engine.project_value(&scenario)
            })
            .collect()
    }

    /// Get reference to the base config for inspection
    pub fn config(&self) -> &ProjectionConfig {
        &self.base_config
    }

    /// Get mutable reference to the base config for customization
    pub fn config_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
