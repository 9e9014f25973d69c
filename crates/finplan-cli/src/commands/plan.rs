use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use finplan_core::plan::{EmergencyFundConfig, FinancialPlan};
use finplan_core::{Money, RetirementData};

use crate::commands::goals::{GoalPayload, ProfilePayload};
use crate::input;

/// JSON shape of retirement data.
#[derive(Debug, Deserialize)]
pub struct RetirementPayload {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub pension_amount: f64,
}

impl RetirementPayload {
    fn build(&self) -> Result<RetirementData, Box<dyn std::error::Error>> {
        Ok(RetirementData::new(
            self.current_age,
            self.retirement_age,
            self.life_expectancy,
            Money::jpy(self.monthly_expenses)?,
            Money::jpy(self.pension_amount)?,
        )?)
    }
}

/// JSON shape of the emergency fund settings.
#[derive(Debug, Deserialize)]
pub struct EmergencyFundPayload {
    pub target_months: i32,
    #[serde(default)]
    pub current_fund: f64,
}

/// JSON shape of a whole plan.
#[derive(Debug, Deserialize)]
struct PlanPayload {
    profile: ProfilePayload,
    #[serde(default)]
    goals: Vec<GoalPayload>,
    retirement: Option<RetirementPayload>,
    emergency_fund: Option<EmergencyFundPayload>,
}

impl PlanPayload {
    fn build(&self) -> Result<FinancialPlan, Box<dyn std::error::Error>> {
        let profile = self.profile.build()?;
        let mut plan = FinancialPlan::new(profile)?;

        for goal in &self.goals {
            plan.add_goal(goal.build()?)?;
        }

        if let Some(retirement) = &self.retirement {
            plan.set_retirement_data(retirement.build()?);
        }

        if let Some(emergency) = &self.emergency_fund {
            plan.update_emergency_fund(EmergencyFundConfig::new(
                emergency.target_months,
                Money::jpy(emergency.current_fund)?,
            )?);
        }

        Ok(plan)
    }
}

/// Arguments for the combined plan projection
#[derive(Args)]
pub struct ProjectionArgs {
    /// Path to a JSON file with {profile, goals?, retirement?, emergency_fund?}
    #[arg(long)]
    pub input: Option<String>,

    /// Years to project forward
    #[arg(long, default_value = "10")]
    pub years: i32,
}

pub fn run_projection(args: ProjectionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload: PlanPayload = input::read_input(&args.input, "projection")?;
    let plan = payload.build()?;

    let projection = plan.generate_projection(args.years)?;
    Ok(serde_json::to_value(projection)?)
}

/// Arguments for whole-plan validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a JSON file with {profile, goals?, retirement?, emergency_fund?}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload: PlanPayload = input::read_input(&args.input, "validate")?;
    let plan = payload.build()?;

    let issues = plan.validate_plan();
    Ok(serde_json::to_value(issues)?)
}
