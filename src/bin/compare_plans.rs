//! Compare two plans from a block side by side
//!
//! Usage: cargo run --bin compare_plans [plans.csv] [plan_id_a] [plan_id_b]
//!
//! Projects both plans to their horizon, seeks the same goal for each, and
//! reports which plan comes out ahead.

use anyhow::Context;
use std::env;

use wealthcurve::plan::loader::{load_plans, DEFAULT_PLANS_PATH};
use wealthcurve::plan::PlanRecord;
use wealthcurve::projection::ProjectionEngine;
use wealthcurve::ScenarioRunner;

const DEFAULT_GOAL: f64 = 1_000_000.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_PLANS_PATH.to_string());
    let id_a: u32 = args.next().as_deref().unwrap_or("1").parse()?;
    let id_b: u32 = args.next().as_deref().unwrap_or("2").parse()?;

    println!("Loading plans from {}...", path);
    let plans = load_plans(&path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to load plans from {}", path))?;

    let plan_a = find_plan(&plans, id_a)?;
    let plan_b = find_plan(&plans, id_b)?;

    let mut runner = ScenarioRunner::new();
    // No charting in this report, skip row collection
    runner.config_mut().detailed_output = false;
    let engine = ProjectionEngine::new(runner.config().clone());

    let mut finals = [0.0f64; 2];
    for (slot, record) in [(0, plan_a), (1, plan_b)] {
        println!("\n{}", "=".repeat(60));
        println!("Plan {}", record.plan_id);
        println!("{}", "=".repeat(60));
        println!(
            "  Principal: {:.2}, Periods: {}, Contribution: {:.2}/{:?}, Rate: {}%",
            record.params.principal,
            record.params.periods,
            record.params.contribution,
            record.params.cadence,
            record.params.rate_of_return_pct,
        );

        let result = runner
            .run(&record.params)
            .with_context(|| format!("Projection failed for plan {}", record.plan_id))?;
        finals[slot] = result.final_value;
        println!(
            "  Total portfolio after {} periods: {:.2}",
            record.params.periods, result.final_value
        );

        match engine.periods_to_reach_goal(&record.params, DEFAULT_GOAL) {
            Ok(goal) => println!(
                "  Periods to reach {:.2}: {}",
                DEFAULT_GOAL, goal.periods
            ),
            Err(e) => println!("  Goal of {:.2} unreachable: {}", DEFAULT_GOAL, e),
        }
    }

    println!();
    if engine.same_projected_value(&plan_a.params, &plan_b.params)? {
        println!("Both plans project to the same final value.");
    } else if finals[0] > finals[1] {
        println!("Plan {} comes out ahead.", plan_a.plan_id);
    } else {
        println!("Plan {} comes out ahead.", plan_b.plan_id);
    }

    Ok(())
}

fn find_plan(plans: &[PlanRecord], plan_id: u32) -> anyhow::Result<&PlanRecord> {
    plans
        .iter()
        .find(|p| p.plan_id == plan_id)
        .with_context(|| format!("Plan {} not found", plan_id))
}
