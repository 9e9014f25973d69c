use crate::error::PlanError;
use crate::money::Money;
use crate::rate::Rate;
use crate::PlanResult;

/// Size an emergency reserve of `target_months` of living expenses.
///
/// When the reserve is being built up over years, the target is inflated to
/// its value at that point; if the inflation adjustment fails the nominal
/// base target is returned instead of an error.
pub fn emergency_fund_target(
    monthly_expenses: Money,
    target_months: i32,
    inflation_rate: Rate,
    years_to_target: i32,
) -> PlanResult<Money> {
    if target_months < 0 {
        return Err(PlanError::invalid_input(
            "target_months",
            "target months cannot be negative",
        ));
    }

    if years_to_target < 0 {
        return Err(PlanError::invalid_input(
            "years_to_target",
            "years to target cannot be negative",
        ));
    }

    let base_target = monthly_expenses.multiply_by(f64::from(target_months))?;

    if years_to_target > 0 && !inflation_rate.is_zero() {
        let inflation_factor = inflation_rate.compound_factor(years_to_target);
        return match base_target.multiply_by(inflation_factor) {
            Ok(adjusted) => Ok(adjusted),
            Err(_) => Ok(base_target),
        };
    }

    Ok(base_target)
}
