use serde::Serialize;

use crate::error::PlanError;
use crate::money::Money;
use crate::rate::Rate;
use crate::PlanResult;

/// Outcome of a compound-interest projection.
#[derive(Debug, Clone, Serialize)]
pub struct CompoundInterestResult {
    pub final_amount: Money,
    pub total_contribution: Money,
    pub interest_earned: Money,
    pub effective_rate: Rate,
}

/// Compound a principal over whole periods: A = P(1 + r)^n.
///
/// The effective rate reports the annualized rate implied by the compound
/// factor; if that rate cannot be constructed the input rate is reported
/// instead.
pub fn compound_interest(
    principal: Money,
    rate: Rate,
    periods: i32,
) -> PlanResult<CompoundInterestResult> {
    if periods < 0 {
        return Err(PlanError::invalid_input(
            "periods",
            "period cannot be negative",
        ));
    }

    if periods == 0 {
        return Ok(CompoundInterestResult {
            final_amount: principal,
            total_contribution: principal,
            interest_earned: Money::zero(principal.currency()),
            effective_rate: rate,
        });
    }

    let compound_factor = rate.compound_factor(periods);
    let final_amount = principal.multiply_by(compound_factor)?;
    let interest_earned = final_amount.subtract(principal)?;

    let effective_decimal = compound_factor.powf(1.0 / f64::from(periods)) - 1.0;
    let effective_rate = Rate::from_decimal(effective_decimal).unwrap_or(rate);

    Ok(CompoundInterestResult {
        final_amount,
        total_contribution: principal,
        interest_earned,
        effective_rate,
    })
}

/// Compound a principal with a fixed payment added every month.
///
/// Simulated month by month over `years * 12` months: interest accrues on
/// the running balance first (skipped entirely at a zero monthly rate), then
/// the payment lands. Contributions accumulate from a base of the principal.
pub fn compound_interest_with_regular_payments(
    principal: Money,
    monthly_payment: Money,
    annual_rate: Rate,
    years: i32,
) -> PlanResult<CompoundInterestResult> {
    if years < 0 {
        return Err(PlanError::invalid_input(
            "years",
            "years cannot be negative",
        ));
    }

    if years == 0 {
        return Ok(CompoundInterestResult {
            final_amount: principal,
            total_contribution: principal,
            interest_earned: Money::zero(principal.currency()),
            effective_rate: annual_rate,
        });
    }

    let monthly_rate = annual_rate.monthly_rate()?;

    let mut current_amount = principal;
    let mut total_contribution = principal;
    let total_months = years * 12;

    for _month in 0..total_months {
        if !monthly_rate.is_zero() {
            let interest_gain = current_amount.multiply(monthly_rate)?;
            current_amount = current_amount.add(interest_gain)?;
        }

        current_amount = current_amount.add(monthly_payment)?;
        total_contribution = total_contribution.add(monthly_payment)?;
    }

    let interest_earned = current_amount.subtract(total_contribution)?;

    Ok(CompoundInterestResult {
        final_amount: current_amount,
        total_contribution,
        interest_earned,
        effective_rate: annual_rate,
    })
}
