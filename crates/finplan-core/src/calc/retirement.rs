use serde::Serialize;

use crate::calc::time_value::future_value;
use crate::error::PlanError;
use crate::money::Money;
use crate::rate::Rate;
use crate::PlanResult;

/// Outcome of sizing the retirement funding gap.
#[derive(Debug, Clone, Serialize)]
pub struct RetirementNeedsResult {
    pub total_needs: Money,
    pub monthly_needs: Money,
    pub years_in_retirement: i32,
    pub inflation_adjusted: bool,
    pub pension_coverage: Money,
    pub additional_required: Money,
}

/// Size the total funds needed to cover retirement expenses beyond the
/// pension.
///
/// When the pension covers the monthly expenses everything is zero except
/// `pension_coverage`, which echoes the monthly pension amount. Otherwise the
/// totals multiply the nominal monthly shortfall over the retirement months;
/// the inflation rate is accepted but not applied to the shortfall.
pub fn retirement_needs(
    monthly_expenses: Money,
    years_in_retirement: i32,
    _inflation_rate: Rate,
    pension_amount: Money,
) -> PlanResult<RetirementNeedsResult> {
    if years_in_retirement < 0 {
        return Err(PlanError::invalid_input(
            "years_in_retirement",
            "years in retirement cannot be negative",
        ));
    }

    if monthly_expenses.is_negative() {
        return Err(PlanError::invalid_input(
            "monthly_expenses",
            "monthly expenses cannot be negative",
        ));
    }

    if pension_amount.is_negative() {
        return Err(PlanError::invalid_input(
            "pension_amount",
            "pension amount cannot be negative",
        ));
    }

    let monthly_shortfall = monthly_expenses.subtract(pension_amount)?;

    // Pension fully covers expenses
    if monthly_shortfall.is_negative() || monthly_shortfall.is_zero() {
        let zero = Money::zero(monthly_expenses.currency());
        return Ok(RetirementNeedsResult {
            total_needs: zero,
            monthly_needs: zero,
            years_in_retirement,
            inflation_adjusted: true,
            pension_coverage: pension_amount,
            additional_required: zero,
        });
    }

    let total_months = years_in_retirement * 12;
    let total_needs = monthly_shortfall.multiply_by(f64::from(total_months))?;
    let pension_coverage = pension_amount.multiply_by(f64::from(total_months))?;

    Ok(RetirementNeedsResult {
        total_needs,
        monthly_needs: monthly_shortfall,
        years_in_retirement,
        inflation_adjusted: true,
        pension_coverage,
        additional_required: total_needs,
    })
}

/// Share of income that must be saved each year to reach a target.
///
/// The future value of the current savings is subtracted from the target
/// first; whatever remains is divided evenly over the years (compounding of
/// the future contributions is deliberately ignored) and expressed as a
/// percentage of the current income.
pub fn required_savings_rate(
    current_income: Money,
    target_amount: Money,
    current_savings: Money,
    investment_return: Rate,
    years: i32,
) -> PlanResult<Rate> {
    if years <= 0 {
        return Err(PlanError::invalid_input(
            "years",
            "years must be positive",
        ));
    }

    if current_income.is_zero() || current_income.is_negative() {
        return Err(PlanError::invalid_input(
            "current_income",
            "current income must be positive",
        ));
    }

    let future_savings = future_value(current_savings, investment_return, years)?;

    let additional_required = target_amount.subtract(future_savings)?;
    if additional_required.is_negative() || additional_required.is_zero() {
        return Ok(Rate::zero());
    }

    let annual_savings_required = additional_required.amount() / f64::from(years);
    let required_rate = annual_savings_required / current_income.amount() * 100.0;

    Rate::new(required_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retirement_needs_with_shortfall() {
        let result = retirement_needs(
            Money::jpy(300_000.0).unwrap(),
            20,
            Rate::new(2.0).unwrap(),
            Money::jpy(150_000.0).unwrap(),
        )
        .unwrap();

        // 150k monthly gap, exactly
        assert_eq!(result.monthly_needs.amount(), 150_000.0);
        // 150k x 12 x 20 = 36M, exactly
        assert_eq!(result.total_needs.amount(), 36_000_000.0);
        assert_eq!(result.additional_required.amount(), 36_000_000.0);
        // Pension coverage over the same horizon
        assert_eq!(result.pension_coverage.amount(), 150_000.0 * 240.0);
        assert_eq!(result.years_in_retirement, 20);
        assert!(result.inflation_adjusted);
    }

    #[test]
    fn test_retirement_needs_pension_covers_expenses() {
        let pension = Money::jpy(250_000.0).unwrap();
        let result = retirement_needs(
            Money::jpy(200_000.0).unwrap(),
            20,
            Rate::new(2.0).unwrap(),
            pension,
        )
        .unwrap();

        assert!(result.total_needs.is_zero());
        assert!(result.monthly_needs.is_zero());
        assert!(result.additional_required.is_zero());
        // The monthly pension is echoed, not the horizon total
        assert_eq!(result.pension_coverage.amount(), pension.amount());
    }

    #[test]
    fn test_retirement_needs_pension_exactly_equal() {
        let result = retirement_needs(
            Money::jpy(200_000.0).unwrap(),
            20,
            Rate::new(2.0).unwrap(),
            Money::jpy(200_000.0).unwrap(),
        )
        .unwrap();

        assert!(result.total_needs.is_zero());
        assert!(result.monthly_needs.is_zero());
    }

    #[test]
    fn test_retirement_needs_rejects_negative_inputs() {
        let expenses = Money::jpy(300_000.0).unwrap();
        let pension = Money::jpy(150_000.0).unwrap();
        let rate = Rate::new(2.0).unwrap();

        assert!(retirement_needs(expenses, -1, rate, pension).is_err());
        assert!(retirement_needs(Money::jpy(-1.0).unwrap(), 20, rate, pension).is_err());
        assert!(retirement_needs(expenses, 20, rate, Money::jpy(-1.0).unwrap()).is_err());
    }

    #[test]
    fn test_required_savings_rate_basic() {
        // Target 10M in 10 years; 1M saved at 5% grows to ~1.63M.
        // Additional ~8.37M over 10 years = ~837k/year = ~16.7% of 5M income.
        let rate = required_savings_rate(
            Money::jpy(5_000_000.0).unwrap(),
            Money::jpy(10_000_000.0).unwrap(),
            Money::jpy(1_000_000.0).unwrap(),
            Rate::new(5.0).unwrap(),
            10,
        )
        .unwrap();

        assert!((rate.as_percentage() - 16.74).abs() < 0.1);
    }

    #[test]
    fn test_required_savings_rate_already_covered() {
        let rate = required_savings_rate(
            Money::jpy(5_000_000.0).unwrap(),
            Money::jpy(1_000_000.0).unwrap(),
            Money::jpy(2_000_000.0).unwrap(),
            Rate::new(5.0).unwrap(),
            10,
        )
        .unwrap();

        assert!(rate.is_zero());
    }

    #[test]
    fn test_required_savings_rate_input_validation() {
        let income = Money::jpy(5_000_000.0).unwrap();
        let target = Money::jpy(10_000_000.0).unwrap();
        let savings = Money::jpy(1_000_000.0).unwrap();
        let ret = Rate::new(5.0).unwrap();

        assert!(required_savings_rate(income, target, savings, ret, 0).is_err());
        assert!(required_savings_rate(income, target, savings, ret, -5).is_err());
        assert!(
            required_savings_rate(Money::jpy(0.0).unwrap(), target, savings, ret, 10).is_err()
        );
    }

    #[test]
    fn test_required_savings_rate_above_100_percent_fails() {
        // Needing 2M/year on a 1M income cannot construct a valid rate
        let result = required_savings_rate(
            Money::jpy(1_000_000.0).unwrap(),
            Money::jpy(20_000_000.0).unwrap(),
            Money::jpy(0.0).unwrap(),
            Rate::zero(),
            10,
        );

        assert!(result.is_err());
    }
}
