use crate::error::PlanError;
use crate::money::Money;
use crate::rate::Rate;
use crate::PlanResult;

/// Hard cap on the simulated payoff horizon: 100 years.
const MAX_PAYOFF_MONTHS: u32 = 1200;

/// Months needed to pay off a debt at a fixed monthly payment.
///
/// Zero or negative debt is already paid off. At a zero rate the answer is
/// the exact ceiling division. Otherwise the balance is simulated month by
/// month — interest accrues first, then the payment lands — until the debt
/// is gone or the 100-year cap is hit. A payment that does not even cover
/// the first month's interest can never terminate and is rejected up front.
pub fn debt_payoff_months(
    debt_amount: Money,
    monthly_payment: Money,
    interest_rate: Rate,
) -> PlanResult<u32> {
    if debt_amount.is_negative() || debt_amount.is_zero() {
        return Ok(0);
    }

    if monthly_payment.is_negative() || monthly_payment.is_zero() {
        return Err(PlanError::invalid_input(
            "monthly_payment",
            "monthly payment must be positive",
        ));
    }

    let monthly_rate = interest_rate.monthly_rate()?;

    if !monthly_rate.is_zero() {
        if let Ok(monthly_interest) = debt_amount.multiply(monthly_rate) {
            if let Ok(true) = monthly_payment.less_than(monthly_interest) {
                return Err(PlanError::FinancialImpossibility(
                    "monthly payment does not cover the accruing interest".into(),
                ));
            }
        }
    }

    if monthly_rate.is_zero() {
        let months = (debt_amount.amount() / monthly_payment.amount()).ceil();
        return Ok(months as u32);
    }

    let mut remaining_debt = debt_amount;
    let mut months: u32 = 0;

    while months < MAX_PAYOFF_MONTHS && remaining_debt.is_positive() {
        let interest = match remaining_debt.multiply(monthly_rate) {
            Ok(i) => i,
            Err(_) => break,
        };

        remaining_debt = match remaining_debt.add(interest) {
            Ok(d) => d,
            Err(_) => break,
        };

        remaining_debt = match remaining_debt.subtract(monthly_payment) {
            Ok(d) => d,
            Err(_) => break,
        };

        months += 1;
    }

    if months >= MAX_PAYOFF_MONTHS {
        return Err(PlanError::FinancialImpossibility(
            "payoff period too long".into(),
        ));
    }

    Ok(months)
}
