use serde::Serialize;

use crate::error::PlanError;
use crate::goal::{Goal, GoalType, ProgressRate};
use crate::money::Money;
use crate::profile::{AssetProjection, FinancialProfile};
use crate::retirement::{RetirementCalculation, RetirementData};
use crate::PlanResult;

/// Emergency reserves above this many months of expenses are not supported.
const MAX_EMERGENCY_MONTHS: i32 = 24;
const DEFAULT_EMERGENCY_MONTHS: i32 = 3;

/// How many months of living expenses to hold in reserve, and how much of
/// the reserve already exists.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyFundConfig {
    pub target_months: i32,
    pub current_fund: Money,
}

impl EmergencyFundConfig {
    pub fn new(target_months: i32, current_fund: Money) -> PlanResult<EmergencyFundConfig> {
        if target_months < 0 {
            return Err(PlanError::invalid_input(
                "target_months",
                "target months cannot be negative",
            ));
        }

        if target_months > MAX_EMERGENCY_MONTHS {
            return Err(PlanError::invalid_input(
                "target_months",
                "target months must be 24 or below",
            ));
        }

        if current_fund.is_negative() {
            return Err(PlanError::invalid_input(
                "current_fund",
                "current fund cannot be negative",
            ));
        }

        Ok(EmergencyFundConfig {
            target_months,
            current_fund,
        })
    }
}

/// Emergency reserve position relative to its target.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyFundStatus {
    pub required_amount: Money,
    pub current_amount: Money,
    pub shortfall: Money,
    pub months_to_target: i32,
}

/// Progress summary for a single goal inside a plan.
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress: ProgressRate,
    pub on_track: bool,
    pub message: String,
}

/// The combined forward view of a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanProjection {
    pub asset_projections: Vec<AssetProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retirement_calculation: Option<RetirementCalculation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_fund_status: Option<EmergencyFundStatus>,
    pub goal_progress: Vec<GoalProgress>,
}

/// A single finding from whole-plan validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// A financial plan: one profile, its goals, optional retirement data, and
/// an emergency-fund target.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialPlan {
    profile: FinancialProfile,
    goals: Vec<Goal>,
    retirement_data: Option<RetirementData>,
    emergency_fund: EmergencyFundConfig,
}

impl FinancialPlan {
    /// Create a plan with the default emergency reserve target of three
    /// months and no reserve yet.
    pub fn new(profile: FinancialProfile) -> PlanResult<FinancialPlan> {
        let emergency_fund = EmergencyFundConfig::new(
            DEFAULT_EMERGENCY_MONTHS,
            Money::zero(profile.monthly_income().currency()),
        )?;

        Ok(FinancialPlan {
            profile,
            goals: Vec::new(),
            retirement_data: None,
            emergency_fund,
        })
    }

    pub fn profile(&self) -> &FinancialProfile {
        &self.profile
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn retirement_data(&self) -> Option<&RetirementData> {
        self.retirement_data.as_ref()
    }

    pub fn emergency_fund(&self) -> &EmergencyFundConfig {
        &self.emergency_fund
    }

    /// Add a goal to the plan. Retirement and emergency goals are limited to
    /// one active instance each, and a goal the profile cannot reach is
    /// rejected outright.
    pub fn add_goal(&mut self, goal: Goal) -> PlanResult<()> {
        if matches!(goal.goal_type(), GoalType::Retirement | GoalType::Emergency) {
            let duplicate = self
                .goals
                .iter()
                .any(|g| g.goal_type() == goal.goal_type() && g.is_active());
            if duplicate {
                return Err(PlanError::invalid_input(
                    "goal_type",
                    "an active goal of this type already exists",
                ));
            }
        }

        if !goal.is_achievable(&self.profile)? {
            return Err(PlanError::FinancialImpossibility(
                "the goal is not reachable under the current financial situation; \
                 adjust the target amount or date"
                    .into(),
            ));
        }

        self.goals.push(goal);
        Ok(())
    }

    pub fn update_profile(&mut self, profile: FinancialProfile) {
        self.profile = profile;
    }

    pub fn set_retirement_data(&mut self, retirement_data: RetirementData) {
        self.retirement_data = Some(retirement_data);
    }

    pub fn update_emergency_fund(&mut self, config: EmergencyFundConfig) {
        self.emergency_fund = config;
    }

    /// Build the combined projection: asset growth, retirement sufficiency
    /// when retirement data is present, emergency-fund status, and per-goal
    /// progress.
    pub fn generate_projection(&self, years: i32) -> PlanResult<PlanProjection> {
        if years <= 0 {
            return Err(PlanError::invalid_input(
                "years",
                "projection years must be positive",
            ));
        }

        let asset_projections = self.profile.project_assets(years)?;

        let retirement_calculation = match &self.retirement_data {
            Some(retirement_data) => {
                let current_savings = self.profile.current_savings().total()?;
                let net_savings = self.profile.net_savings()?;

                Some(retirement_data.retirement_sufficiency(
                    current_savings,
                    net_savings,
                    self.profile.investment_return(),
                    self.profile.inflation_rate(),
                )?)
            }
            None => None,
        };

        let emergency_fund_status = Some(self.emergency_fund_status()?);

        let mut goal_progress = Vec::new();
        for goal in &self.goals {
            if !goal.is_active() {
                continue;
            }

            let progress = goal.calculate_progress(goal.current_amount())?;
            let (on_track, message) = self.evaluate_goal_progress(goal);

            goal_progress.push(GoalProgress {
                goal: goal.clone(),
                progress,
                on_track,
                message,
            });
        }

        Ok(PlanProjection {
            asset_projections,
            retirement_calculation,
            emergency_fund_status,
            goal_progress,
        })
    }

    fn emergency_fund_status(&self) -> PlanResult<EmergencyFundStatus> {
        let monthly_expenses = self.profile.monthly_expenses().total()?;
        let required_amount =
            monthly_expenses.multiply_by(f64::from(self.emergency_fund.target_months))?;

        let mut shortfall = required_amount.subtract(self.emergency_fund.current_fund)?;
        if shortfall.is_negative() {
            shortfall = Money::zero(required_amount.currency());
        }

        let mut months_to_target = 0;
        if shortfall.is_positive() {
            if let Ok(net_savings) = self.profile.net_savings() {
                if net_savings.is_positive() {
                    months_to_target = (shortfall.amount() / net_savings.amount()) as i32;
                }
            }
        }

        Ok(EmergencyFundStatus {
            required_amount,
            current_amount: self.emergency_fund.current_fund,
            shortfall,
            months_to_target,
        })
    }

    fn evaluate_goal_progress(&self, goal: &Goal) -> (bool, String) {
        let achievable = match goal.is_achievable(&self.profile) {
            Ok(a) => a,
            Err(_) => return (false, "progress could not be evaluated".into()),
        };

        if !achievable {
            return (
                false,
                "the goal is unlikely to be reached at the current pace".into(),
            );
        }

        if goal.is_overdue() {
            return (false, "the goal deadline has passed".into());
        }

        if goal.is_completed() {
            return (true, "the goal has been achieved".into());
        }

        let progress = match goal.calculate_progress(goal.current_amount()) {
            Ok(p) => p,
            Err(_) => return (false, "progress could not be evaluated".into()),
        };

        let remaining_days = goal.remaining_days();
        if remaining_days <= 0 {
            return (false, "the goal deadline has passed".into());
        }

        // Expected progress is linear in elapsed time since the goal was set.
        let total_days = (goal.target_date() - goal.created_at()).num_days();
        let elapsed_days = total_days - remaining_days;
        let expected_progress = if total_days > 0 {
            elapsed_days as f64 / total_days as f64 * 100.0
        } else {
            0.0
        };

        let actual_progress = progress.as_percentage();

        if actual_progress >= expected_progress {
            (true, "progress is on schedule".into())
        } else if actual_progress >= expected_progress * 0.8 {
            (true, "progress is roughly on schedule".into())
        } else {
            (
                false,
                "progress is behind schedule; consider raising the monthly savings".into(),
            )
        }
    }

    /// Validate the whole plan: profile health, goal achievability, and the
    /// emergency reserve level.
    pub fn validate_plan(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if let Err(err) = self.profile.validate_financial_health() {
            issues.push(ValidationIssue {
                field: "financial_profile".into(),
                message: err.to_string(),
            });
        }

        for (i, goal) in self.goals.iter().enumerate() {
            if !goal.is_active() {
                continue;
            }

            match goal.is_achievable(&self.profile) {
                Ok(false) => issues.push(ValidationIssue {
                    field: format!("goals[{}]", i),
                    message: "the goal is not reachable under the current financial situation"
                        .into(),
                }),
                Ok(true) => {}
                Err(err) => issues.push(ValidationIssue {
                    field: format!("goals[{}]", i),
                    message: format!("achievability check failed: {}", err),
                }),
            }
        }

        if let Some(issue) = self.emergency_fund_issue() {
            issues.push(issue);
        }

        issues
    }

    fn emergency_fund_issue(&self) -> Option<ValidationIssue> {
        let monthly_expenses = self.profile.monthly_expenses().total().ok()?;
        let required = monthly_expenses
            .multiply_by(f64::from(self.emergency_fund.target_months))
            .ok()?;
        let shortfall = required.subtract(self.emergency_fund.current_fund).ok()?;

        if !shortfall.is_positive() || !required.is_positive() {
            return None;
        }

        let shortfall_ratio = shortfall.amount() / required.amount();
        if shortfall_ratio > 0.5 {
            return Some(ValidationIssue {
                field: "emergency_fund".into(),
                message: "the emergency reserve is far below target; prioritize funding it"
                    .into(),
            });
        }

        None
    }

    pub fn active_goals(&self) -> Vec<&Goal> {
        self.goals.iter().filter(|g| g.is_active()).collect()
    }

    pub fn goals_by_type(&self, goal_type: GoalType) -> Vec<&Goal> {
        self.goals
            .iter()
            .filter(|g| g.goal_type() == goal_type)
            .collect()
    }

    pub fn has_retirement_goal(&self) -> bool {
        self.goals_by_type(GoalType::Retirement)
            .iter()
            .any(|g| g.is_active())
    }

    pub fn has_emergency_goal(&self) -> bool {
        self.goals_by_type(GoalType::Emergency)
            .iter()
            .any(|g| g.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ExpenseCollection, ExpenseItem, SavingsCollection, SavingsItem};
    use crate::rate::Rate;
    use chrono::{Months, Utc};

    fn sample_profile() -> FinancialProfile {
        FinancialProfile::new(
            Money::jpy(400_000.0).unwrap(),
            ExpenseCollection::from(vec![ExpenseItem::new(
                "living",
                Money::jpy(250_000.0).unwrap(),
            )]),
            SavingsCollection::from(vec![SavingsItem::new(
                "deposit",
                Money::jpy(2_000_000.0).unwrap(),
            )]),
            Rate::new(3.0).unwrap(),
            Rate::new(1.0).unwrap(),
        )
        .unwrap()
    }

    fn goal(goal_type: GoalType, target: f64, months_out: u32) -> Goal {
        let target_date = Utc::now()
            .date_naive()
            .checked_add_months(Months::new(months_out))
            .unwrap();

        Goal::new(
            goal_type,
            "goal",
            Money::jpy(target).unwrap(),
            target_date,
            Money::jpy(50_000.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_plan_defaults() {
        let plan = FinancialPlan::new(sample_profile()).unwrap();

        assert_eq!(plan.emergency_fund().target_months, 3);
        assert!(plan.emergency_fund().current_fund.is_zero());
        assert!(plan.goals().is_empty());
        assert!(plan.retirement_data().is_none());
    }

    #[test]
    fn test_add_goal_accepts_reachable_goal() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();

        // 150k/month of net savings covers 1M over a year comfortably
        plan.add_goal(goal(GoalType::Savings, 1_000_000.0, 12)).unwrap();
        assert_eq!(plan.goals().len(), 1);
    }

    #[test]
    fn test_add_goal_rejects_unreachable_goal() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();

        let result = plan.add_goal(goal(GoalType::Savings, 100_000_000.0, 6));
        assert!(matches!(
            result,
            Err(PlanError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_add_goal_rejects_duplicate_emergency_goal() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();

        plan.add_goal(goal(GoalType::Emergency, 500_000.0, 12)).unwrap();
        let result = plan.add_goal(goal(GoalType::Emergency, 300_000.0, 12));
        assert!(result.is_err());

        // A second savings goal is fine
        plan.add_goal(goal(GoalType::Savings, 500_000.0, 12)).unwrap();
        plan.add_goal(goal(GoalType::Savings, 400_000.0, 12)).unwrap();
    }

    #[test]
    fn test_generate_projection_contents() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();
        plan.add_goal(goal(GoalType::Savings, 1_000_000.0, 12)).unwrap();
        plan.set_retirement_data(
            RetirementData::new(
                40,
                65,
                90,
                Money::jpy(300_000.0).unwrap(),
                Money::jpy(150_000.0).unwrap(),
            )
            .unwrap(),
        );

        let projection = plan.generate_projection(10).unwrap();

        assert_eq!(projection.asset_projections.len(), 10);
        assert!(projection.retirement_calculation.is_some());
        assert!(projection.emergency_fund_status.is_some());
        assert_eq!(projection.goal_progress.len(), 1);

        let status = projection.emergency_fund_status.unwrap();
        // 250k expenses x 3 months, nothing funded yet
        assert_eq!(status.required_amount.amount(), 750_000.0);
        assert_eq!(status.shortfall.amount(), 750_000.0);
        // 750k shortfall / 150k net savings
        assert_eq!(status.months_to_target, 5);
    }

    #[test]
    fn test_generate_projection_rejects_non_positive_years() {
        let plan = FinancialPlan::new(sample_profile()).unwrap();
        assert!(plan.generate_projection(0).is_err());
    }

    #[test]
    fn test_inactive_goals_skipped_in_projection() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();

        let mut g = goal(GoalType::Savings, 1_000_000.0, 12);
        g.deactivate();
        plan.goals.push(g);

        let projection = plan.generate_projection(1).unwrap();
        assert!(projection.goal_progress.is_empty());
    }

    #[test]
    fn test_validate_plan_flags_underfunded_emergency_reserve() {
        let plan = FinancialPlan::new(sample_profile()).unwrap();

        let issues = plan.validate_plan();
        assert!(issues.iter().any(|i| i.field == "emergency_fund"));
    }

    #[test]
    fn test_validate_plan_clean_with_funded_reserve() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();
        plan.update_emergency_fund(
            EmergencyFundConfig::new(3, Money::jpy(750_000.0).unwrap()).unwrap(),
        );

        assert!(plan.validate_plan().is_empty());
    }

    #[test]
    fn test_validate_plan_flags_unachievable_goal() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();
        plan.update_emergency_fund(
            EmergencyFundConfig::new(3, Money::jpy(750_000.0).unwrap()).unwrap(),
        );

        // Push directly to bypass add_goal's achievability gate
        plan.goals.push(goal(GoalType::Savings, 100_000_000.0, 6));

        let issues = plan.validate_plan();
        assert!(issues.iter().any(|i| i.field == "goals[0]"));
    }

    #[test]
    fn test_goal_lookups() {
        let mut plan = FinancialPlan::new(sample_profile()).unwrap();
        plan.add_goal(goal(GoalType::Emergency, 500_000.0, 12)).unwrap();
        plan.add_goal(goal(GoalType::Savings, 500_000.0, 12)).unwrap();

        assert_eq!(plan.active_goals().len(), 2);
        assert_eq!(plan.goals_by_type(GoalType::Emergency).len(), 1);
        assert!(plan.has_emergency_goal());
        assert!(!plan.has_retirement_goal());
    }

    #[test]
    fn test_emergency_fund_config_bounds() {
        let fund = Money::jpy(0.0).unwrap();
        assert!(EmergencyFundConfig::new(-1, fund).is_err());
        assert!(EmergencyFundConfig::new(25, fund).is_err());
        assert!(EmergencyFundConfig::new(24, fund).is_ok());
        assert!(EmergencyFundConfig::new(3, Money::jpy(-1.0).unwrap()).is_err());
    }
}
