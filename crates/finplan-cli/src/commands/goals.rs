use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use finplan_core::advice;
use finplan_core::profile::{
    ExpenseCollection, ExpenseItem, SavingsCollection, SavingsItem,
};
use finplan_core::{FinancialProfile, Goal, GoalType, Money, Period, Rate};

use crate::input;

/// JSON shape of a goal.
#[derive(Debug, Deserialize)]
pub struct GoalPayload {
    pub goal_type: GoalType,
    pub title: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
}

impl GoalPayload {
    pub fn build(&self) -> Result<Goal, Box<dyn std::error::Error>> {
        let mut goal = Goal::new(
            self.goal_type,
            &self.title,
            Money::jpy(self.target_amount)?,
            self.target_date,
            Money::jpy(self.monthly_contribution)?,
        )?;

        if self.current_amount != 0.0 {
            goal.update_current_amount(Money::jpy(self.current_amount)?)?;
        }

        Ok(goal)
    }
}

/// JSON shape of one expense line.
#[derive(Debug, Deserialize)]
pub struct ExpensePayload {
    pub category: String,
    pub amount: f64,
}

/// JSON shape of one savings holding.
#[derive(Debug, Deserialize)]
pub struct SavingsPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

/// JSON shape of a financial profile.
#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub monthly_income: f64,
    #[serde(default)]
    pub monthly_expenses: Vec<ExpensePayload>,
    #[serde(default)]
    pub current_savings: Vec<SavingsPayload>,
    #[serde(default)]
    pub investment_return: f64,
    #[serde(default)]
    pub inflation_rate: f64,
}

impl ProfilePayload {
    pub fn build(&self) -> Result<FinancialProfile, Box<dyn std::error::Error>> {
        let mut expenses = Vec::with_capacity(self.monthly_expenses.len());
        for e in &self.monthly_expenses {
            expenses.push(ExpenseItem::new(&e.category, Money::jpy(e.amount)?));
        }

        let mut savings = Vec::with_capacity(self.current_savings.len());
        for s in &self.current_savings {
            savings.push(SavingsItem::new(&s.kind, Money::jpy(s.amount)?));
        }

        let profile = FinancialProfile::new(
            Money::jpy(self.monthly_income)?,
            ExpenseCollection::from(expenses),
            SavingsCollection::from(savings),
            Rate::new(self.investment_return)?,
            Rate::new(self.inflation_rate)?,
        )?;

        Ok(profile)
    }
}

#[derive(Debug, Deserialize)]
struct RecommendPayload {
    goal: GoalPayload,
    #[serde(default)]
    current_savings: f64,
    /// Months left to save; derived from the goal's deadline when omitted.
    months_remaining: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GoalProfilePayload {
    goal: GoalPayload,
    profile: ProfilePayload,
}

/// Arguments for the monthly savings recommendation
#[derive(Args)]
pub struct RecommendArgs {
    /// Path to a JSON file with {goal, current_savings?, months_remaining?}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload: RecommendPayload = input::read_input(&args.input, "recommend-savings")?;

    let goal = payload.goal.build()?;
    let current_savings = Money::jpy(payload.current_savings)?;

    let months = match payload.months_remaining {
        Some(m) => m,
        None => (goal.remaining_days() / 30) as i32,
    };
    let time_remaining = Period::from_months(months)?;

    let result = advice::recommend_monthly_savings(&goal, current_savings, time_remaining)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for goal adjustment suggestions
#[derive(Args)]
pub struct AdjustmentsArgs {
    /// Path to a JSON file with {goal, profile}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_adjustments(args: AdjustmentsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload: GoalProfilePayload = input::read_input(&args.input, "suggest-adjustments")?;

    let goal = payload.goal.build()?;
    let profile = payload.profile.build()?;

    let result = advice::suggest_goal_adjustments(&goal, &profile)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the goal feasibility report
#[derive(Args)]
pub struct FeasibilityArgs {
    /// Path to a JSON file with {goal, profile}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_feasibility(args: FeasibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload: GoalProfilePayload = input::read_input(&args.input, "feasibility")?;

    let goal = payload.goal.build()?;
    let profile = payload.profile.build()?;

    let result = advice::analyze_goal_feasibility(&goal, &profile)?;
    Ok(serde_json::to_value(result)?)
}
