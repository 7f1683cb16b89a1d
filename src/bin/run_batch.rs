//! Project an entire plan block from plans.csv
//!
//! Outputs one row of final values per plan for comparison across the block

use anyhow::Context;
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use wealthcurve::plan::loader::{load_plans, DEFAULT_PLANS_PATH};
use wealthcurve::plan::PlanRecord;
use wealthcurve::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// One output row for a projected plan
#[derive(Debug, Clone)]
struct BatchRow {
    plan_id: u32,
    periods: u32,
    rate_of_return_pct: f64,
    per_period_contribution: f64,
    final_value: f64,
    peak_value: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_PLANS_PATH.to_string());

    let start = Instant::now();
    println!("Loading plans from {}...", path);

    let plans = load_plans(&path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to load plans from {}", path))?;
    println!("Loaded {} plans in {:?}", plans.len(), start.elapsed());

    let config = ProjectionConfig::default();

    println!("Running projections...");
    let proj_start = Instant::now();

    // Run projections in parallel
    let results: Vec<(PlanRecord, Result<ProjectionResult, _>)> = plans
        .into_par_iter()
        .map(|record| {
            let engine = ProjectionEngine::new(config.clone());
            let result = engine.project_value(&record.params);
            (record, result)
        })
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut rows = Vec::with_capacity(results.len());
    for (record, result) in results {
        let result = result
            .with_context(|| format!("Projection failed for plan {}", record.plan_id))?;
        let summary = result.summary();
        rows.push(BatchRow {
            plan_id: record.plan_id,
            periods: record.params.periods,
            rate_of_return_pct: record.params.rate_of_return_pct,
            per_period_contribution: record.params.per_period_contribution(),
            final_value: result.final_value,
            // Zero-period plans record no rows; report the final value
            peak_value: summary.peak_value.unwrap_or(result.final_value),
        });
    }

    // Write output
    let output_path = "batch_projection_output.csv";
    let mut file = File::create(output_path).context("Failed to create output file")?;

    writeln!(file, "PlanID,Periods,RateOfReturnPct,PerPeriodContribution,FinalValue,PeakValue")?;
    for row in &rows {
        writeln!(
            file,
            "{},{},{},{:.2},{:.2},{:.2}",
            row.plan_id,
            row.periods,
            row.rate_of_return_pct,
            row.per_period_contribution,
            row.final_value,
            row.peak_value,
        )?;
    }

    println!("Output written to {}", output_path);

    // Print summary stats
    let total: f64 = rows.iter().map(|r| r.final_value).sum();
    let best = rows
        .iter()
        .max_by(|a, b| a.final_value.total_cmp(&b.final_value));

    println!("\nBlock Summary:");
    println!("  Plans projected: {}", rows.len());
    println!("  Combined final value: {:.2}", total);
    if let Some(best) = best {
        println!(
            "  Largest final value: plan {} at {:.2}",
            best.plan_id, best.final_value
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
