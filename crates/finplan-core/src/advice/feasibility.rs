use std::fmt;

use serde::Serialize;

use crate::goal::{Goal, GoalType};
use crate::profile::FinancialProfile;
use crate::PlanResult;

/// How risky reaching a goal currently looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "low risk")]
    Low,
    #[serde(rename = "medium risk")]
    Medium,
    #[serde(rename = "high risk")]
    High,
    #[serde(rename = "unassessable")]
    Unassessable,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low risk",
            RiskLevel::Medium => "medium risk",
            RiskLevel::High => "high risk",
            RiskLevel::Unassessable => "unassessable",
        };
        f.write_str(label)
    }
}

/// Flat feasibility report for one goal against one profile.
#[derive(Debug, Clone, Serialize)]
pub struct GoalFeasibility {
    pub goal_type: GoalType,
    pub target_amount: f64,
    pub current_amount: f64,
    pub remaining_days: i64,
    pub net_savings: f64,
    pub required_monthly_savings: f64,
    pub achievable: bool,
    pub progress_percentage: f64,
    pub risk_level: RiskLevel,
}

/// Analyze how feasible a goal is under a profile.
pub fn analyze_goal_feasibility(
    goal: &Goal,
    profile: &FinancialProfile,
) -> PlanResult<GoalFeasibility> {
    let net_savings = profile.net_savings()?;
    let required_monthly_savings = goal.required_monthly_savings()?;
    let achievable = goal.is_achievable(profile)?;
    let progress = goal.calculate_progress(goal.current_amount())?;
    let risk_level = assess_risk_level(goal, profile);

    Ok(GoalFeasibility {
        goal_type: goal.goal_type(),
        target_amount: goal.target_amount().amount(),
        current_amount: goal.current_amount().amount(),
        remaining_days: goal.remaining_days(),
        net_savings: net_savings.amount(),
        required_monthly_savings: required_monthly_savings.amount(),
        achievable,
        progress_percentage: progress.as_percentage(),
        risk_level,
    })
}

/// Risk from the ratio of required savings to available net savings.
///
/// Negative net savings are high risk outright. Exactly-zero net savings are
/// also treated as high risk (nothing can be saved at all) rather than
/// letting the ratio degenerate.
fn assess_risk_level(goal: &Goal, profile: &FinancialProfile) -> RiskLevel {
    let net_savings = match profile.net_savings() {
        Ok(n) if !n.is_negative() => n,
        _ => return RiskLevel::High,
    };

    let required_monthly_savings = match goal.required_monthly_savings() {
        Ok(r) => r,
        Err(_) => return RiskLevel::Unassessable,
    };

    if net_savings.is_zero() {
        return RiskLevel::High;
    }

    let ratio = required_monthly_savings.amount() / net_savings.amount();

    if ratio <= 0.5 {
        RiskLevel::Low
    } else if ratio <= 0.8 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::profile::{ExpenseCollection, ExpenseItem, SavingsCollection};
    use crate::rate::Rate;
    use chrono::{Months, Utc};

    fn goal_with_target(target: f64, months_out: u32) -> Goal {
        let target_date = Utc::now()
            .date_naive()
            .checked_add_months(Months::new(months_out))
            .unwrap();

        Goal::new(
            GoalType::Savings,
            "goal",
            Money::jpy(target).unwrap(),
            target_date,
            Money::jpy(10_000.0).unwrap(),
        )
        .unwrap()
    }

    fn profile(income: f64, expenses: f64) -> FinancialProfile {
        FinancialProfile::new(
            Money::jpy(income).unwrap(),
            ExpenseCollection::from(vec![ExpenseItem::new(
                "living",
                Money::jpy(expenses).unwrap(),
            )]),
            SavingsCollection::default(),
            Rate::new(3.0).unwrap(),
            Rate::new(1.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_report_fields() {
        let mut goal = goal_with_target(1_000_000.0, 12);
        goal.update_current_amount(Money::jpy(250_000.0).unwrap())
            .unwrap();
        let profile = profile(400_000.0, 250_000.0);

        let report = analyze_goal_feasibility(&goal, &profile).unwrap();

        assert_eq!(report.goal_type, GoalType::Savings);
        assert_eq!(report.target_amount, 1_000_000.0);
        assert_eq!(report.current_amount, 250_000.0);
        assert!(report.remaining_days > 300);
        assert_eq!(report.net_savings, 150_000.0);
        assert_eq!(report.progress_percentage, 25.0);
        assert!(report.achievable);
    }

    #[test]
    fn test_low_risk_when_requirement_is_small() {
        // Requirement ~62k/month against 150k of net savings: ratio ~0.41
        let goal = goal_with_target(750_000.0, 12);
        let profile = profile(400_000.0, 250_000.0);

        let report = analyze_goal_feasibility(&goal, &profile).unwrap();
        assert_eq!(report.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_medium_risk_band() {
        // Requirement ~99k/month against 150k: ratio ~0.66
        let goal = goal_with_target(1_200_000.0, 12);
        let profile = profile(400_000.0, 250_000.0);

        let report = analyze_goal_feasibility(&goal, &profile).unwrap();
        assert_eq!(report.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_high_risk_when_requirement_dominates() {
        let goal = goal_with_target(5_000_000.0, 12);
        let profile = profile(400_000.0, 250_000.0);

        let report = analyze_goal_feasibility(&goal, &profile).unwrap();
        assert_eq!(report.risk_level, RiskLevel::High);
        assert!(!report.achievable);
    }

    #[test]
    fn test_high_risk_for_deficit_spending() {
        let goal = goal_with_target(1_000_000.0, 12);
        let profile = profile(250_000.0, 300_000.0);

        let report = analyze_goal_feasibility(&goal, &profile).unwrap();
        assert_eq!(report.risk_level, RiskLevel::High);
        assert!(report.net_savings < 0.0);
    }

    #[test]
    fn test_high_risk_for_zero_net_savings() {
        let goal = goal_with_target(1_000_000.0, 12);
        let profile = profile(300_000.0, 300_000.0);

        let report = analyze_goal_feasibility(&goal, &profile).unwrap();
        assert_eq!(report.net_savings, 0.0);
        assert_eq!(report.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_risk_serializes_with_spaces() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"medium risk\"");
    }
}
