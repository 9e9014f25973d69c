use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::advice::RecommendationPriority;
use crate::goal::{Goal, GoalType};
use crate::money::Money;
use crate::profile::FinancialProfile;
use crate::PlanResult;

/// Horizon below which switching investment strategy is not worth it.
const MIN_INVESTMENT_HORIZON_DAYS: i64 = 365;

/// Returns at or above this percentage need no strategy change.
const ADEQUATE_RETURN_PCT: f64 = 5.0;

/// One suggested adjustment to an off-track goal.
#[derive(Debug, Clone, Serialize)]
pub struct GoalRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub priority: RecommendationPriority,
    pub impact: String,
    pub new_value: Value,
    pub reason: String,
}

/// Suggest adjustments for a goal the profile cannot currently reach.
///
/// An achievable goal yields no suggestions. Otherwise five candidates are
/// evaluated in a fixed order — increase savings, extend the deadline, reduce
/// the target, reduce expenses, change the investment strategy — and the ones
/// that apply are returned in that order.
pub fn suggest_goal_adjustments(
    goal: &Goal,
    profile: &FinancialProfile,
) -> PlanResult<Vec<GoalRecommendation>> {
    let mut recommendations = Vec::new();

    if goal.is_achievable(profile)? {
        return Ok(recommendations);
    }

    let net_savings = profile.net_savings()?;
    let required_monthly_savings = goal.required_monthly_savings()?;

    if net_savings.is_positive() {
        if let Some(rec) = suggest_savings_increase(goal, net_savings, required_monthly_savings) {
            recommendations.push(rec);
        }
    }

    if let Some(rec) = suggest_deadline_extension(goal, net_savings) {
        recommendations.push(rec);
    }

    if let Some(rec) = suggest_target_reduction(goal, net_savings) {
        recommendations.push(rec);
    }

    if let Some(rec) = suggest_expense_reduction(goal, profile) {
        recommendations.push(rec);
    }

    if let Some(rec) = suggest_investment_strategy(goal, profile) {
        recommendations.push(rec);
    }

    Ok(recommendations)
}

fn suggest_savings_increase(
    goal: &Goal,
    net_savings: Money,
    required_monthly_savings: Money,
) -> Option<GoalRecommendation> {
    // Skip when the current net savings already cover the requirement
    if let Ok(true) = net_savings.greater_than(required_monthly_savings) {
        return None;
    }

    let additional_savings = required_monthly_savings
        .subtract(goal.monthly_contribution())
        .ok()?;

    Some(GoalRecommendation {
        kind: "increase_savings".into(),
        title: "Increase monthly savings".into(),
        description: format!(
            "Raising the monthly savings to {} is recommended to reach this goal.",
            required_monthly_savings
        ),
        priority: RecommendationPriority::High,
        impact: "Keeps the goal on track for its current deadline.".into(),
        new_value: json!(required_monthly_savings.amount()),
        reason: format!(
            "The current savings pace falls {} short of what the goal requires.",
            additional_savings
        ),
    })
}

fn suggest_deadline_extension(goal: &Goal, net_savings: Money) -> Option<GoalRecommendation> {
    if net_savings.is_zero() || net_savings.is_negative() {
        return None;
    }

    let remaining_amount = goal.remaining_amount().ok()?;

    let months_needed = (remaining_amount.amount() / net_savings.amount()).ceil() as i64;
    let new_target_date = today().checked_add_months(Months::new(months_needed as u32))?;

    // Already enough runway
    if new_target_date < goal.target_date() {
        return None;
    }

    let extension_months = months_needed - goal.remaining_days() / 30;

    Some(GoalRecommendation {
        kind: "extend_deadline".into(),
        title: "Extend the goal deadline".into(),
        description: format!(
            "Extending the deadline by {} months to {} is recommended.",
            extension_months,
            new_target_date.format("%B %Y")
        ),
        priority: RecommendationPriority::Medium,
        impact: "Makes the goal reachable at the current savings pace.".into(),
        new_value: json!(new_target_date.to_string()),
        reason: "A deadline aligned with the current savings capacity is more realistic.".into(),
    })
}

fn suggest_target_reduction(goal: &Goal, net_savings: Money) -> Option<GoalRecommendation> {
    if net_savings.is_zero() || net_savings.is_negative() {
        return None;
    }

    let remaining_days = goal.remaining_days();
    if remaining_days <= 0 {
        return None;
    }

    let remaining_months = remaining_days / 30;
    let achievable_amount = net_savings.amount() * remaining_months as f64;

    let new_target_amount = goal.current_amount().amount() + achievable_amount;

    // Only worth suggesting when it actually lowers the target
    if new_target_amount >= goal.target_amount().amount() {
        return None;
    }

    let reduction_amount = goal.target_amount().amount() - new_target_amount;

    let currency = goal.target_amount().currency();
    let new_target = Money::new(new_target_amount, currency).ok()?;
    let reduction = Money::new(reduction_amount, currency).ok()?;

    Some(GoalRecommendation {
        kind: "reduce_target".into(),
        title: "Adjust the target amount".into(),
        description: format!("Lowering the target amount to {} is recommended.", new_target),
        priority: RecommendationPriority::Low,
        impact: "Creates a goal the current savings capacity can reliably reach.".into(),
        new_value: json!(new_target_amount),
        reason: format!(
            "The current target exceeds what the savings capacity supports by {}.",
            reduction
        ),
    })
}

fn suggest_expense_reduction(
    goal: &Goal,
    profile: &FinancialProfile,
) -> Option<GoalRecommendation> {
    let required_monthly_savings = goal.required_monthly_savings().ok()?;
    let net_savings = profile.net_savings().ok()?;

    let shortfall = required_monthly_savings.subtract(net_savings).ok()?;
    if shortfall.is_negative() {
        return None;
    }

    let monthly_income = profile.monthly_income();
    let reduction_percentage = shortfall.amount() / monthly_income.amount() * 100.0;

    Some(GoalRecommendation {
        kind: "reduce_expenses".into(),
        title: "Review monthly spending".into(),
        description: format!(
            "Cutting monthly expenses by {} ({:.1}% of income) is recommended.",
            shortfall, reduction_percentage
        ),
        priority: RecommendationPriority::Medium,
        impact: "Frees up the savings the goal schedule requires.".into(),
        new_value: json!(shortfall.amount()),
        reason: "Current income does not leave enough room for the required savings.".into(),
    })
}

fn suggest_investment_strategy(
    goal: &Goal,
    profile: &FinancialProfile,
) -> Option<GoalRecommendation> {
    // Too short a horizon for investing to make a difference
    if goal.remaining_days() < MIN_INVESTMENT_HORIZON_DAYS {
        return None;
    }

    let current_return = profile.investment_return();
    if current_return.as_percentage() >= ADEQUATE_RETURN_PCT {
        return None;
    }

    let (recommended_return, strategy) = match goal.goal_type() {
        GoalType::Retirement => (
            6.0,
            "Consider an equity-weighted portfolio for long-term asset growth.",
        ),
        GoalType::Emergency => (
            2.0,
            "Keep emergency funds in safe instruments such as time deposits or government bonds.",
        ),
        _ => (4.0, "Consider a balanced investment fund."),
    };

    Some(GoalRecommendation {
        kind: "investment_strategy".into(),
        title: "Review the investment strategy".into(),
        description: format!(
            "Raising the investment return to {:.1}% is recommended.",
            recommended_return
        ),
        priority: RecommendationPriority::Medium,
        impact: "Compounding makes the goal easier to reach.".into(),
        new_value: json!(recommended_return),
        reason: strategy.into(),
    })
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
