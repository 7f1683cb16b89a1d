//! Plan parameter types and block loading

pub mod data;
pub mod loader;

pub use data::{ContributionCadence, PlanParameters};
pub use loader::{load_default_plans, load_plans, load_plans_from_reader, PlanRecord};
