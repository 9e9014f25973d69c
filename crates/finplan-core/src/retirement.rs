use serde::Serialize;

use crate::error::PlanError;
use crate::money::Money;
use crate::rate::Rate;
use crate::PlanResult;

const MAX_AGE: u32 = 150;
const MAX_RETIREMENT_AGE: u32 = 100;

/// Outcome of a retirement sufficiency analysis.
#[derive(Debug, Clone, Serialize)]
pub struct RetirementCalculation {
    pub required_amount: Money,
    pub projected_amount: Money,
    pub shortfall: Money,
    pub sufficiency_rate: Rate,
    pub recommended_monthly_savings: Money,
}

/// Retirement and pension data for a user.
#[derive(Debug, Clone, Serialize)]
pub struct RetirementData {
    current_age: u32,
    retirement_age: u32,
    life_expectancy: u32,
    monthly_retirement_expenses: Money,
    pension_amount: Money,
}

impl RetirementData {
    pub fn new(
        current_age: u32,
        retirement_age: u32,
        life_expectancy: u32,
        monthly_retirement_expenses: Money,
        pension_amount: Money,
    ) -> PlanResult<RetirementData> {
        if current_age > MAX_AGE {
            return Err(PlanError::invalid_input(
                "current_age",
                "current age must be between 0 and 150",
            ));
        }

        if retirement_age < current_age {
            return Err(PlanError::invalid_input(
                "retirement_age",
                "retirement age must not precede the current age",
            ));
        }

        if retirement_age > MAX_RETIREMENT_AGE {
            return Err(PlanError::invalid_input(
                "retirement_age",
                "retirement age must be 100 or below",
            ));
        }

        if life_expectancy < retirement_age {
            return Err(PlanError::invalid_input(
                "life_expectancy",
                "life expectancy must not precede the retirement age",
            ));
        }

        if life_expectancy > MAX_AGE {
            return Err(PlanError::invalid_input(
                "life_expectancy",
                "life expectancy must be 150 or below",
            ));
        }

        if monthly_retirement_expenses.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_retirement_expenses",
                "retirement expenses cannot be negative",
            ));
        }

        if pension_amount.is_negative() {
            return Err(PlanError::invalid_input(
                "pension_amount",
                "pension amount cannot be negative",
            ));
        }

        Ok(RetirementData {
            current_age,
            retirement_age,
            life_expectancy,
            monthly_retirement_expenses,
            pension_amount,
        })
    }

    pub fn current_age(&self) -> u32 {
        self.current_age
    }

    pub fn retirement_age(&self) -> u32 {
        self.retirement_age
    }

    pub fn life_expectancy(&self) -> u32 {
        self.life_expectancy
    }

    pub fn monthly_retirement_expenses(&self) -> Money {
        self.monthly_retirement_expenses
    }

    pub fn pension_amount(&self) -> Money {
        self.pension_amount
    }

    pub fn years_until_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    pub fn retirement_years(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.retirement_age)
    }

    pub fn is_retired(&self) -> bool {
        self.current_age >= self.retirement_age
    }

    /// Monthly pension gap, clamped at zero when the pension covers the
    /// projected expenses.
    pub fn pension_shortfall(&self) -> PlanResult<Money> {
        let shortfall = self
            .monthly_retirement_expenses
            .subtract(self.pension_amount)?;

        if shortfall.is_negative() {
            return Ok(Money::zero(self.monthly_retirement_expenses.currency()));
        }

        Ok(shortfall)
    }

    /// A pension equal to the projected expenses counts as sufficient.
    pub fn is_pension_sufficient(&self) -> PlanResult<bool> {
        Ok(self.pension_shortfall()?.is_zero())
    }

    /// Total fund needed to cover the pension gap through retirement.
    ///
    /// The monthly gap is inflated to its value at the retirement date, then
    /// multiplied over the retirement months.
    pub fn required_retirement_fund(&self, inflation_rate: Rate) -> PlanResult<Money> {
        let retirement_years = self.retirement_years();
        if retirement_years == 0 {
            return Ok(Money::zero(self.monthly_retirement_expenses.currency()));
        }

        let monthly_shortfall = self
            .monthly_retirement_expenses
            .subtract(self.pension_amount)?;
        if monthly_shortfall.is_negative() || monthly_shortfall.is_zero() {
            return Ok(Money::zero(self.monthly_retirement_expenses.currency()));
        }

        let inflation_factor = inflation_rate.compound_factor(self.years_until_retirement() as i32);
        let adjusted_shortfall = monthly_shortfall.multiply_by(inflation_factor)?;

        let total_months = retirement_years * 12;
        adjusted_shortfall.multiply_by(f64::from(total_months))
    }

    /// Full sufficiency analysis: required fund, assets projected to the
    /// retirement date, the resulting shortfall, and the savings pace that
    /// would close it.
    pub fn retirement_sufficiency(
        &self,
        current_savings: Money,
        monthly_savings: Money,
        investment_return: Rate,
        inflation_rate: Rate,
    ) -> PlanResult<RetirementCalculation> {
        let required_amount = self.required_retirement_fund(inflation_rate)?;

        let years_until_retirement = self.years_until_retirement();
        let projected_amount = project_assets_monthly(
            current_savings,
            monthly_savings,
            investment_return,
            years_until_retirement,
        )?;

        let mut shortfall = required_amount.subtract(projected_amount)?;
        if shortfall.is_negative() {
            shortfall = Money::zero(required_amount.currency());
        }

        let sufficiency_rate = if required_amount.is_zero() {
            Rate::new(100.0)?
        } else {
            let percentage =
                (projected_amount.amount() / required_amount.amount() * 100.0).min(100.0);
            Rate::new(percentage)?
        };

        let recommended_monthly_savings = self.recommended_monthly_savings(
            current_savings,
            required_amount,
            investment_return,
            years_until_retirement,
        )?;

        Ok(RetirementCalculation {
            required_amount,
            projected_amount,
            shortfall,
            sufficiency_rate,
            recommended_monthly_savings,
        })
    }

    fn recommended_monthly_savings(
        &self,
        current_savings: Money,
        required_amount: Money,
        investment_return: Rate,
        years: u32,
    ) -> PlanResult<Money> {
        if years == 0 {
            // No runway left: the whole gap is due now.
            let shortfall = required_amount.subtract(current_savings)?;
            if shortfall.is_negative() {
                return Ok(Money::zero(required_amount.currency()));
            }
            return Ok(shortfall);
        }

        // Growth of the existing savings; falls back to the nominal amount
        // if the projection fails.
        let compound_factor = investment_return.compound_factor(years as i32);
        let future_savings = current_savings
            .multiply_by(compound_factor)
            .unwrap_or(current_savings);

        let additional_required = required_amount.subtract(future_savings)?;
        if additional_required.is_negative() || additional_required.is_zero() {
            return Ok(Money::zero(required_amount.currency()));
        }

        let total_months = years * 12;
        Money::new(
            additional_required.amount() / f64::from(total_months),
            required_amount.currency(),
        )
    }

    pub fn update_current_age(&mut self, new_age: u32) -> PlanResult<()> {
        if new_age > MAX_AGE {
            return Err(PlanError::invalid_input(
                "current_age",
                "age must be between 0 and 150",
            ));
        }

        if new_age > self.retirement_age {
            return Err(PlanError::invalid_input(
                "current_age",
                "current age must not exceed the retirement age",
            ));
        }

        self.current_age = new_age;
        Ok(())
    }

    pub fn update_retirement_age(&mut self, new_age: u32) -> PlanResult<()> {
        if new_age < self.current_age {
            return Err(PlanError::invalid_input(
                "retirement_age",
                "retirement age must not precede the current age",
            ));
        }

        if new_age > MAX_RETIREMENT_AGE {
            return Err(PlanError::invalid_input(
                "retirement_age",
                "retirement age must be 100 or below",
            ));
        }

        if new_age > self.life_expectancy {
            return Err(PlanError::invalid_input(
                "retirement_age",
                "retirement age must not exceed the life expectancy",
            ));
        }

        self.retirement_age = new_age;
        Ok(())
    }

    pub fn update_life_expectancy(&mut self, new_age: u32) -> PlanResult<()> {
        if new_age < self.retirement_age {
            return Err(PlanError::invalid_input(
                "life_expectancy",
                "life expectancy must not precede the retirement age",
            ));
        }

        if new_age > MAX_AGE {
            return Err(PlanError::invalid_input(
                "life_expectancy",
                "life expectancy must be 150 or below",
            ));
        }

        self.life_expectancy = new_age;
        Ok(())
    }

    pub fn update_monthly_retirement_expenses(&mut self, new_expenses: Money) -> PlanResult<()> {
        if new_expenses.is_negative() {
            return Err(PlanError::invalid_input(
                "monthly_retirement_expenses",
                "retirement expenses cannot be negative",
            ));
        }

        self.monthly_retirement_expenses = new_expenses;
        Ok(())
    }

    pub fn update_pension_amount(&mut self, new_amount: Money) -> PlanResult<()> {
        if new_amount.is_negative() {
            return Err(PlanError::invalid_input(
                "pension_amount",
                "pension amount cannot be negative",
            ));
        }

        self.pension_amount = new_amount;
        Ok(())
    }
}

/// Month-by-month asset projection: interest accrues on the running balance
/// first, then the monthly contribution lands.
fn project_assets_monthly(
    current_savings: Money,
    monthly_savings: Money,
    investment_return: Rate,
    years: u32,
) -> PlanResult<Money> {
    if years == 0 {
        return Ok(current_savings);
    }

    let monthly_rate = investment_return.monthly_rate()?;
    let mut assets = current_savings;

    for _month in 0..years * 12 {
        let gain = assets.multiply(monthly_rate)?;
        assets = assets.add(gain)?;
        assets = assets.add(monthly_savings)?;
    }

    Ok(assets)
}
