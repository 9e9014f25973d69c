use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::money::{Currency, Money};
use crate::rate::Rate;
use crate::PlanResult;

/// Minimum share of income that should be saved each month.
const MIN_SAVINGS_SHARE: f64 = 0.1;

/// A single categorized monthly expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub category: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpenseItem {
    pub fn new(category: &str, amount: Money) -> ExpenseItem {
        ExpenseItem {
            category: category.to_string(),
            amount,
            description: None,
        }
    }
}

/// The monthly expenses of a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseCollection(Vec<ExpenseItem>);

impl ExpenseCollection {
    pub fn total(&self) -> PlanResult<Money> {
        let mut total = Money::zero(Currency::JPY);
        for expense in &self.0 {
            total = total.add(expense.amount)?;
        }
        Ok(total)
    }

    pub fn by_category(&self, category: &str) -> Vec<&ExpenseItem> {
        self.0.iter().filter(|e| e.category == category).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseItem> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ExpenseItem>> for ExpenseCollection {
    fn from(items: Vec<ExpenseItem>) -> Self {
        ExpenseCollection(items)
    }
}

/// A single savings holding ("deposit", "investment", "other").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SavingsItem {
    pub fn new(kind: &str, amount: Money) -> SavingsItem {
        SavingsItem {
            kind: kind.to_string(),
            amount,
            description: None,
        }
    }
}

/// The current savings holdings of a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavingsCollection(Vec<SavingsItem>);

impl SavingsCollection {
    pub fn total(&self) -> PlanResult<Money> {
        let mut total = Money::zero(Currency::JPY);
        for savings in &self.0 {
            total = total.add(savings.amount)?;
        }
        Ok(total)
    }

    pub fn by_kind(&self, kind: &str) -> Vec<&SavingsItem> {
        self.0.iter().filter(|s| s.kind == kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavingsItem> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SavingsItem>> for SavingsCollection {
    fn from(items: Vec<SavingsItem>) -> Self {
        SavingsCollection(items)
    }
}

/// One projected year of asset growth.
#[derive(Debug, Clone, Serialize)]
pub struct AssetProjection {
    pub year: i32,
    pub total_assets: Money,
    pub real_value: Money,
    pub contributed_amount: Money,
    pub investment_gains: Money,
}

/// A user's financial situation: income, spending, holdings, and the rates
/// used to project them forward.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialProfile {
    monthly_income: Money,
    monthly_expenses: ExpenseCollection,
    current_savings: SavingsCollection,
    investment_return: Rate,
    inflation_rate: Rate,
}

impl FinancialProfile {
    pub fn new(
        monthly_income: Money,
        monthly_expenses: ExpenseCollection,
        current_savings: SavingsCollection,
        investment_return: Rate,
        inflation_rate: Rate,
    ) -> PlanResult<FinancialProfile> {
        if !monthly_income.is_positive() {
            return Err(PlanError::invalid_input(
                "monthly_income",
                "monthly income must be positive",
            ));
        }

        let total_expenses = monthly_expenses.total()?;
        if total_expenses.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_expenses",
                "total expenses cannot be negative",
            ));
        }

        let total_savings = current_savings.total()?;
        if total_savings.is_negative() {
            return Err(PlanError::invalid_input(
                "current_savings",
                "total savings cannot be negative",
            ));
        }

        Ok(FinancialProfile {
            monthly_income,
            monthly_expenses,
            current_savings,
            investment_return,
            inflation_rate,
        })
    }

    pub fn monthly_income(&self) -> Money {
        self.monthly_income
    }

    pub fn monthly_expenses(&self) -> &ExpenseCollection {
        &self.monthly_expenses
    }

    pub fn current_savings(&self) -> &SavingsCollection {
        &self.current_savings
    }

    pub fn investment_return(&self) -> Rate {
        self.investment_return
    }

    pub fn inflation_rate(&self) -> Rate {
        self.inflation_rate
    }

    /// Monthly net savings: income minus total expenses. Can be negative.
    pub fn net_savings(&self) -> PlanResult<Money> {
        let total_expenses = self.monthly_expenses.total()?;
        self.monthly_income.subtract(total_expenses)
    }

    /// Basic health check: spending must not exceed income, and at least 10%
    /// of income should be saved.
    pub fn validate_financial_health(&self) -> PlanResult<()> {
        let net_savings = self.net_savings()?;

        if net_savings.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_expenses",
                "monthly expenses exceed income; spending needs review",
            ));
        }

        let minimum_target = self.monthly_income.multiply_by(MIN_SAVINGS_SHARE)?;
        if net_savings.less_than(minimum_target)? {
            return Err(PlanError::invalid_input(
                "net_savings",
                "savings rate is below 10% of income",
            ));
        }

        Ok(())
    }

    /// Project asset growth over the given number of years.
    ///
    /// Simulated month by month: investment returns accrue on the running
    /// balance at the monthly-equivalent rate first, then the monthly net
    /// savings are contributed. Real values deflate the year-end balance by
    /// the cumulative inflation factor.
    pub fn project_assets(&self, years: i32) -> PlanResult<Vec<AssetProjection>> {
        if years <= 0 {
            return Err(PlanError::invalid_input(
                "years",
                "projection years must be positive",
            ));
        }

        let net_savings = self.net_savings()?;
        let starting_assets = self.current_savings.total()?;
        let monthly_rate = self.investment_return.monthly_rate()?;

        let mut projections = Vec::with_capacity(years as usize);
        let mut current_assets = starting_assets;
        let mut total_contributed = starting_assets;

        for year in 1..=years {
            for _month in 0..12 {
                let investment_gain = current_assets.multiply(monthly_rate)?;
                current_assets = current_assets.add(investment_gain)?;

                current_assets = current_assets.add(net_savings)?;
                total_contributed = total_contributed.add(net_savings)?;
            }

            let investment_gains = current_assets.subtract(total_contributed)?;

            let inflation_factor = self.inflation_rate.compound_factor(year);
            let real_value = current_assets.multiply_by(1.0 / inflation_factor)?;

            projections.push(AssetProjection {
                year,
                total_assets: current_assets,
                real_value,
                contributed_amount: total_contributed,
                investment_gains,
            });
        }

        Ok(projections)
    }

    pub fn update_monthly_income(&mut self, new_income: Money) -> PlanResult<()> {
        if !new_income.is_positive() {
            return Err(PlanError::invalid_input(
                "monthly_income",
                "monthly income must be positive",
            ));
        }

        self.monthly_income = new_income;
        Ok(())
    }

    pub fn update_monthly_expenses(&mut self, new_expenses: ExpenseCollection) -> PlanResult<()> {
        if new_expenses.total()?.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_expenses",
                "total expenses cannot be negative",
            ));
        }

        self.monthly_expenses = new_expenses;
        Ok(())
    }

    pub fn update_current_savings(&mut self, new_savings: SavingsCollection) -> PlanResult<()> {
        if new_savings.total()?.is_negative() {
            return Err(PlanError::invalid_input(
                "current_savings",
                "total savings cannot be negative",
            ));
        }

        self.current_savings = new_savings;
        Ok(())
    }

    pub fn update_investment_return(&mut self, new_rate: Rate) {
        self.investment_return = new_rate;
    }

    pub fn update_inflation_rate(&mut self, new_rate: Rate) {
        self.inflation_rate = new_rate;
    }
}
