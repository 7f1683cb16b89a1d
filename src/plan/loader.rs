//! Load plan blocks from plans.csv

use super::{ContributionCadence, PlanParameters};
use crate::error::ProjectionError;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Default path to the sample plan block
pub const DEFAULT_PLANS_PATH: &str = "data/plans.csv";

/// A plan row from a block file, tagged with its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub plan_id: u32,
    pub params: PlanParameters,
}

/// Raw CSV row matching plans.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PlanID")]
    plan_id: u32,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "Periods")]
    periods: i64,
    #[serde(rename = "Contribution")]
    contribution: f64,
    #[serde(rename = "Cadence")]
    cadence: String,
    #[serde(rename = "RateOfReturnPct")]
    rate_of_return_pct: f64,
}

impl CsvRow {
    fn to_record(self) -> Result<PlanRecord, Box<dyn Error>> {
        let cadence = match self.cadence.as_str() {
            "yearly" => ContributionCadence::Yearly,
            "monthly" => ContributionCadence::Monthly,
            other => return Err(format!("Unknown Cadence: {}", other).into()),
        };

        let params = PlanParameters::try_new(
            self.principal,
            self.periods,
            self.contribution,
            cadence,
            self.rate_of_return_pct,
        )
        .map_err(|e: ProjectionError| format!("Plan {}: {}", self.plan_id, e))?;

        Ok(PlanRecord {
            plan_id: self.plan_id,
            params,
        })
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<PlanRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut plans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_record()?);
    }

    Ok(plans)
}

/// Load plans from any reader (e.g., string buffer)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PlanRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_record()?);
    }

    Ok(plans)
}

/// Load plans from the default plans.csv location
pub fn load_default_plans() -> Result<Vec<PlanRecord>, Box<dyn Error>> {
    load_plans(DEFAULT_PLANS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PlanID,Principal,Periods,Contribution,Cadence,RateOfReturnPct
1,1000,10,100,yearly,7
2,0,30,1000,monthly,5
3,50000,20,0,yearly,-2.5
";

    #[test]
    fn test_load_plans_from_reader() {
        let plans = load_plans_from_reader(SAMPLE.as_bytes()).expect("Failed to parse plans");
        assert_eq!(plans.len(), 3);

        let p1 = &plans[0];
        assert_eq!(p1.plan_id, 1);
        assert_eq!(p1.params.periods, 10);
        assert_eq!(p1.params.cadence, ContributionCadence::Yearly);

        let p2 = &plans[1];
        assert_eq!(p2.params.cadence, ContributionCadence::Monthly);
        assert_eq!(p2.params.per_period_contribution(), 12000.0);

        let p3 = &plans[2];
        assert_eq!(p3.params.rate_of_return_pct, -2.5);
    }

    #[test]
    fn test_negative_periods_reported_with_plan_id() {
        let bad = "\
PlanID,Principal,Periods,Contribution,Cadence,RateOfReturnPct
7,1000,-5,100,yearly,7
";
        let err = load_plans_from_reader(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Plan 7"));
    }

    #[test]
    fn test_unknown_cadence_rejected() {
        let bad = "\
PlanID,Principal,Periods,Contribution,Cadence,RateOfReturnPct
1,1000,5,100,weekly,7
";
        assert!(load_plans_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_load_default_plans() {
        let plans = load_default_plans().expect("Failed to load plans");
        assert!(!plans.is_empty());
        assert_eq!(plans[0].plan_id, 1);
    }
}
