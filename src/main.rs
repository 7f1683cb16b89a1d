//! WealthCurve CLI
//!
//! Command-line interface for running compound-growth projections

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::Write;

use wealthcurve::projection::{
    ContributionTiming, GoalComparison, PeriodRow, ProjectionConfig, ProjectionEngine,
};
use wealthcurve::{ContributionCadence, PlanParameters};

#[derive(Parser)]
#[command(name = "wealthcurve", version, about = "Compound-growth projections for recurring-contribution plans")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project the final portfolio value after a number of periods
    Value {
        #[command(flatten)]
        plan: PlanArgs,

        /// Number of compounding periods (years)
        #[arg(long)]
        periods: i64,

        /// Contribution timing within a period
        #[arg(long, value_enum, default_value = "end")]
        timing: TimingArg,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Project the final value with a contribution that grows each period
    Growth {
        #[command(flatten)]
        plan: PlanArgs,

        /// Number of compounding periods (years)
        #[arg(long)]
        periods: i64,

        /// Percentage by which the contribution grows each period
        #[arg(long)]
        growth_rate: f64,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Count the periods needed to pass a goal value
    Goal {
        #[command(flatten)]
        plan: PlanArgs,

        /// Target portfolio value
        #[arg(long, default_value_t = 1_000_000.0)]
        goal: f64,

        /// Whether landing exactly on the goal counts as reaching it
        #[arg(long, value_enum, default_value = "exceed")]
        comparison: ComparisonArg,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct PlanArgs {
    /// Initial amount invested
    #[arg(long, default_value_t = 0.0)]
    principal: f64,

    /// Amount contributed each period (yearly or monthly per --cadence)
    #[arg(long, default_value_t = 0.0)]
    contribution: f64,

    /// Contribution cadence; monthly amounts are annualized (x12)
    #[arg(long, value_enum, default_value = "yearly")]
    cadence: CadenceArg,

    /// Rate of return in percent per period
    #[arg(long)]
    rate: f64,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Write the (period, value) samples to a CSV file
    #[arg(long, value_name = "PATH")]
    chart: Option<String>,

    /// Print the full result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CadenceArg {
    Yearly,
    Monthly,
}

impl From<CadenceArg> for ContributionCadence {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::Yearly => ContributionCadence::Yearly,
            CadenceArg::Monthly => ContributionCadence::Monthly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    /// Compound first, then add the contribution
    End,
    /// Add the contribution first, then compound
    Start,
}

impl From<TimingArg> for ContributionTiming {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::End => ContributionTiming::EndOfPeriod,
            TimingArg::Start => ContributionTiming::StartOfPeriod,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ComparisonArg {
    /// Stop only once the value strictly exceeds the goal
    Exceed,
    /// Stop as soon as the value reaches the goal
    Reach,
}

impl From<ComparisonArg> for GoalComparison {
    fn from(arg: ComparisonArg) -> Self {
        match arg {
            ComparisonArg::Exceed => GoalComparison::Exceed,
            ComparisonArg::Reach => GoalComparison::Reach,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Value {
            plan,
            periods,
            timing,
            output,
        } => {
            let params = build_plan(&plan, periods)?;
            let config = ProjectionConfig {
                value_timing: timing.into(),
                ..Default::default()
            };
            let engine = ProjectionEngine::new(config);

            log::info!(
                "projecting {} periods at {}%",
                params.periods,
                params.rate_of_return_pct
            );
            let result = engine.project_value(&params)?;

            if output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "Total portfolio after {} periods: {:.2}",
                    params.periods, result.final_value
                );
            }
            write_chart(&output, &result.rows)?;
        }
        Command::Growth {
            plan,
            periods,
            growth_rate,
            output,
        } => {
            let params = build_plan(&plan, periods)?;
            let engine = ProjectionEngine::default();

            let base = engine.project_value(&params)?;
            let grown = engine.project_with_growing_contribution(&params, growth_rate)?;

            if output.json {
                println!("{}", serde_json::to_string_pretty(&grown)?);
            } else {
                println!(
                    "Total portfolio after {} periods: {:.2}",
                    params.periods, base.final_value
                );
                println!(
                    "With the contribution growing {}% per period: {:.2}",
                    growth_rate, grown.final_value
                );
            }
            write_chart(&output, &grown.rows)?;
        }
        Command::Goal {
            plan,
            goal,
            comparison,
            output,
        } => {
            let params = build_plan(&plan, 0)?;
            let config = ProjectionConfig {
                goal_comparison: comparison.into(),
                ..Default::default()
            };
            let engine = ProjectionEngine::new(config);

            log::info!("seeking goal {:.2} at {}%", goal, params.rate_of_return_pct);
            let result = engine.periods_to_reach_goal(&params, goal)?;

            if output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "Periods to reach {:.2}: {} (ending value {:.2})",
                    goal, result.periods, result.final_value
                );
            }
            write_chart(&output, &result.rows)?;
        }
    }

    Ok(())
}

fn build_plan(args: &PlanArgs, periods: i64) -> anyhow::Result<PlanParameters> {
    Ok(PlanParameters::try_new(
        args.principal,
        periods,
        args.contribution,
        args.cadence.into(),
        args.rate,
    )?)
}

fn write_chart(output: &OutputArgs, rows: &[PeriodRow]) -> anyhow::Result<()> {
    let Some(path) = &output.chart else {
        return Ok(());
    };

    let mut file =
        File::create(path).with_context(|| format!("Unable to create chart file {}", path))?;
    writeln!(file, "Period,Value")?;
    for row in rows {
        writeln!(file, "{},{:.2}", row.period, row.value)?;
    }

    if !output.json {
        println!("Chart samples written to: {}", path);
    }
    Ok(())
}
