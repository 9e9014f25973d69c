use std::fmt;

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::money::Money;
use crate::profile::FinancialProfile;
use crate::rate::Rate;
use crate::PlanResult;

/// Approximate month length used for deadline arithmetic.
const DAYS_PER_MONTH: i64 = 30;

/// The kind of financial goal being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Savings,
    Retirement,
    Emergency,
    Custom,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalType::Savings => "savings goal",
            GoalType::Retirement => "retirement goal",
            GoalType::Emergency => "emergency fund goal",
            GoalType::Custom => "custom goal",
        };
        f.write_str(label)
    }
}

/// Progress toward a goal, clamped to 0–100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRate {
    rate: Rate,
}

impl ProgressRate {
    pub fn new(percentage: f64) -> PlanResult<ProgressRate> {
        let clamped = percentage.clamp(0.0, 100.0);
        Ok(ProgressRate {
            rate: Rate::new(clamped)?,
        })
    }

    pub fn as_percentage(&self) -> f64 {
        self.rate.as_percentage()
    }

    pub fn is_complete(&self) -> bool {
        self.rate.as_percentage() >= 100.0
    }
}

impl fmt::Display for ProgressRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.rate.as_percentage())
    }
}

/// A financial goal: a target amount to reach by a target date.
#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    goal_type: GoalType,
    title: String,
    target_amount: Money,
    target_date: NaiveDate,
    current_amount: Money,
    monthly_contribution: Money,
    is_active: bool,
    created_at: NaiveDate,
}

impl Goal {
    /// Create a goal. The target must be positive, the date must not lie in
    /// the past, and the planned contribution cannot be negative. Progress
    /// starts at zero.
    pub fn new(
        goal_type: GoalType,
        title: &str,
        target_amount: Money,
        target_date: NaiveDate,
        monthly_contribution: Money,
    ) -> PlanResult<Goal> {
        if title.is_empty() {
            return Err(PlanError::invalid_input("title", "title is required"));
        }

        if !target_amount.is_positive() {
            return Err(PlanError::invalid_input(
                "target_amount",
                "target amount must be positive",
            ));
        }

        if target_date < today() {
            return Err(PlanError::invalid_input(
                "target_date",
                "target date must not be in the past",
            ));
        }

        if monthly_contribution.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_contribution",
                "monthly contribution cannot be negative",
            ));
        }

        Ok(Goal {
            goal_type,
            title: title.to_string(),
            target_amount,
            target_date,
            current_amount: Money::zero(target_amount.currency()),
            monthly_contribution,
            is_active: true,
            created_at: today(),
        })
    }

    pub fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target_amount(&self) -> Money {
        self.target_amount
    }

    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }

    pub fn current_amount(&self) -> Money {
        self.current_amount
    }

    pub fn monthly_contribution(&self) -> Money {
        self.monthly_contribution
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Progress of `current_amount` toward the target, clamped to 0–100%.
    /// A zero target counts as fully achieved.
    pub fn calculate_progress(&self, current_amount: Money) -> PlanResult<ProgressRate> {
        if self.target_amount.is_zero() {
            return ProgressRate::new(100.0);
        }

        let progress = current_amount.amount() / self.target_amount.amount() * 100.0;
        ProgressRate::new(progress)
    }

    /// Estimate when the goal completes at the given monthly savings pace.
    pub fn estimate_completion_date(&self, monthly_savings: Money) -> PlanResult<NaiveDate> {
        if !monthly_savings.is_positive() {
            return Err(PlanError::invalid_input(
                "monthly_savings",
                "monthly savings must be positive",
            ));
        }

        let remaining = self.remaining_amount()?;
        if remaining.is_zero() || remaining.is_negative() {
            return Ok(today());
        }

        let months_needed = (remaining.amount() / monthly_savings.amount()) as u32;
        today()
            .checked_add_months(Months::new(months_needed))
            .ok_or_else(|| PlanError::InvalidPeriod("completion date out of range".into()))
    }

    /// Whether the goal can be reached from the profile's monthly net savings
    /// within the time left until the target date.
    pub fn is_achievable(&self, profile: &FinancialProfile) -> PlanResult<bool> {
        let net_savings = profile.net_savings()?;
        if net_savings.is_negative() || net_savings.is_zero() {
            return Ok(false);
        }

        let now = today();
        if self.target_date < now {
            return Ok(false);
        }

        let months_until_target = (self.target_date - now).num_days() / DAYS_PER_MONTH;
        if months_until_target <= 0 {
            return Ok(false);
        }

        let remaining = self.remaining_amount()?;
        if remaining.is_zero() || remaining.is_negative() {
            return Ok(true);
        }

        let required_monthly = remaining.amount() / months_until_target as f64;
        Ok(net_savings.amount() >= required_monthly)
    }

    pub fn update_current_amount(&mut self, new_amount: Money) -> PlanResult<()> {
        if new_amount.is_negative() {
            return Err(PlanError::invalid_input(
                "current_amount",
                "current amount cannot be negative",
            ));
        }

        self.current_amount = new_amount;
        Ok(())
    }

    pub fn update_monthly_contribution(&mut self, new_contribution: Money) -> PlanResult<()> {
        if new_contribution.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_contribution",
                "monthly contribution cannot be negative",
            ));
        }

        self.monthly_contribution = new_contribution;
        Ok(())
    }

    pub fn update_target_amount(&mut self, new_amount: Money) -> PlanResult<()> {
        if !new_amount.is_positive() {
            return Err(PlanError::invalid_input(
                "target_amount",
                "target amount must be positive",
            ));
        }

        self.target_amount = new_amount;
        Ok(())
    }

    pub fn update_target_date(&mut self, new_date: NaiveDate) -> PlanResult<()> {
        if new_date < today() {
            return Err(PlanError::invalid_input(
                "target_date",
                "target date must not be in the past",
            ));
        }

        self.target_date = new_date;
        Ok(())
    }

    pub fn update_title(&mut self, new_title: &str) -> PlanResult<()> {
        if new_title.is_empty() {
            return Err(PlanError::invalid_input("title", "title is required"));
        }

        self.title = new_title.to_string();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn is_overdue(&self) -> bool {
        today() > self.target_date && !self.is_completed()
    }

    pub fn is_completed(&self) -> bool {
        let reached = self
            .current_amount
            .greater_than(self.target_amount)
            .unwrap_or(false);
        let exact = self
            .current_amount
            .equals(self.target_amount)
            .unwrap_or(false);

        reached || exact
    }

    /// The amount still needed; zero once the goal is completed.
    pub fn remaining_amount(&self) -> PlanResult<Money> {
        if self.is_completed() {
            return Ok(Money::zero(self.target_amount.currency()));
        }

        self.target_amount.subtract(self.current_amount)
    }

    /// Days until the target date, clamped at zero once it has passed.
    pub fn remaining_days(&self) -> i64 {
        let now = today();
        if self.target_date < now {
            return 0;
        }

        (self.target_date - now).num_days()
    }

    /// Monthly savings needed to close the remaining amount by the target
    /// date. Once the deadline has passed the full remaining amount is due.
    pub fn required_monthly_savings(&self) -> PlanResult<Money> {
        let remaining = self.remaining_amount()?;
        if remaining.is_zero() || remaining.is_negative() {
            return Ok(Money::zero(self.target_amount.currency()));
        }

        let remaining_days = self.remaining_days();
        if remaining_days <= 0 {
            return Ok(remaining);
        }

        let remaining_months = (remaining_days as f64 / DAYS_PER_MONTH as f64).max(1.0);
        Money::new(
            remaining.amount() / remaining_months,
            self.target_amount.currency(),
        )
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ExpenseCollection, ExpenseItem, SavingsCollection};

    fn date_in_months(months: u32) -> NaiveDate {
        today()
            .checked_add_months(Months::new(months))
            .expect("date in range")
    }

    fn goal_with_target(target: f64, months_out: u32) -> Goal {
        Goal::new(
            GoalType::Savings,
            "house deposit",
            Money::jpy(target).unwrap(),
            date_in_months(months_out),
            Money::jpy(30_000.0).unwrap(),
        )
        .unwrap()
    }

    fn profile_with_net_savings(income: f64, expenses: f64) -> FinancialProfile {
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
    fn test_new_validations() {
        let target = Money::jpy(1_000_000.0).unwrap();
        let contribution = Money::jpy(10_000.0).unwrap();

        assert!(Goal::new(
            GoalType::Savings,
            "",
            target,
            date_in_months(12),
            contribution
        )
        .is_err());

        assert!(Goal::new(
            GoalType::Savings,
            "trip",
            Money::jpy(0.0).unwrap(),
            date_in_months(12),
            contribution
        )
        .is_err());

        let past = today().pred_opt().unwrap();
        assert!(Goal::new(GoalType::Savings, "trip", target, past, contribution).is_err());

        assert!(Goal::new(
            GoalType::Savings,
            "trip",
            target,
            date_in_months(12),
            Money::jpy(-1.0).unwrap()
        )
        .is_err());
    }

    #[test]
    fn test_progress_is_clamped() {
        let goal = goal_with_target(1_000_000.0, 12);

        let halfway = goal
            .calculate_progress(Money::jpy(500_000.0).unwrap())
            .unwrap();
        assert_eq!(halfway.as_percentage(), 50.0);

        let over = goal
            .calculate_progress(Money::jpy(2_000_000.0).unwrap())
            .unwrap();
        assert_eq!(over.as_percentage(), 100.0);
        assert!(over.is_complete());
    }

    #[test]
    fn test_remaining_amount_zero_when_completed() {
        let mut goal = goal_with_target(1_000_000.0, 12);
        goal.update_current_amount(Money::jpy(1_000_000.0).unwrap())
            .unwrap();

        assert!(goal.is_completed());
        assert!(goal.remaining_amount().unwrap().is_zero());
    }

    #[test]
    fn test_required_monthly_savings() {
        let goal = goal_with_target(1_200_000.0, 12);

        // Roughly a year out: about 12 months of runway, so the requirement
        // lands near 100k per month.
        let required = goal.required_monthly_savings().unwrap();
        assert!(required.amount() > 90_000.0 && required.amount() < 110_000.0);
    }

    #[test]
    fn test_estimate_completion_date() {
        let goal = goal_with_target(600_000.0, 24);

        let date = goal
            .estimate_completion_date(Money::jpy(100_000.0).unwrap())
            .unwrap();
        assert_eq!(date, date_in_months(6));

        assert!(goal
            .estimate_completion_date(Money::jpy(0.0).unwrap())
            .is_err());
    }

    #[test]
    fn test_is_achievable_with_ample_savings() {
        let goal = goal_with_target(500_000.0, 12);
        let profile = profile_with_net_savings(400_000.0, 300_000.0);

        assert!(goal.is_achievable(&profile).unwrap());
    }

    #[test]
    fn test_is_not_achievable_with_deficit() {
        let goal = goal_with_target(500_000.0, 12);
        let profile = profile_with_net_savings(300_000.0, 350_000.0);

        assert!(!goal.is_achievable(&profile).unwrap());
    }

    #[test]
    fn test_is_not_achievable_when_target_too_large() {
        let goal = goal_with_target(50_000_000.0, 12);
        let profile = profile_with_net_savings(400_000.0, 300_000.0);

        assert!(!goal.is_achievable(&profile).unwrap());
    }

    #[test]
    fn test_update_validations() {
        let mut goal = goal_with_target(1_000_000.0, 12);

        assert!(goal
            .update_current_amount(Money::jpy(-1.0).unwrap())
            .is_err());
        assert!(goal
            .update_target_amount(Money::jpy(0.0).unwrap())
            .is_err());
        assert!(goal
            .update_target_date(today().pred_opt().unwrap())
            .is_err());
        assert!(goal.update_title("").is_err());

        goal.update_current_amount(Money::jpy(250_000.0).unwrap())
            .unwrap();
        assert_eq!(goal.current_amount().amount(), 250_000.0);
    }

    #[test]
    fn test_activation_toggle() {
        let mut goal = goal_with_target(1_000_000.0, 12);
        assert!(goal.is_active());

        goal.deactivate();
        assert!(!goal.is_active());

        goal.activate();
        assert!(goal.is_active());
    }
}
