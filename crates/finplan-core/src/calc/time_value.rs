use serde::Serialize;

use crate::error::PlanError;
use crate::money::Money;
use crate::rate::Rate;
use crate::PlanResult;

/// Outcome of deflating a nominal amount by inflation.
#[derive(Debug, Clone, Serialize)]
pub struct InflationAdjustmentResult {
    pub nominal_value: Money,
    pub real_value: Money,
    pub purchasing_power_loss: Money,
    pub inflation_impact: Rate,
}

/// Future value: FV = PV(1 + r)^n.
pub fn future_value(present_value: Money, rate: Rate, periods: i32) -> PlanResult<Money> {
    if periods < 0 {
        return Err(PlanError::invalid_input(
            "periods",
            "period cannot be negative",
        ));
    }

    if periods == 0 {
        return Ok(present_value);
    }

    present_value.multiply_by(rate.compound_factor(periods))
}

/// Present value: PV = FV / (1 + r)^n. A zero rate skips the division.
pub fn present_value(future_value: Money, rate: Rate, periods: i32) -> PlanResult<Money> {
    if periods < 0 {
        return Err(PlanError::invalid_input(
            "periods",
            "period cannot be negative",
        ));
    }

    if periods == 0 {
        return Ok(future_value);
    }

    if rate.is_zero() {
        return Ok(future_value);
    }

    future_value.multiply_by(1.0 / rate.compound_factor(periods))
}

/// Deflate a nominal amount by the inflation expected over `years`.
///
/// The impact rate is the purchasing-power loss as a share of the nominal
/// amount; when that share cannot be expressed as a rate (a zero nominal
/// amount included) the input inflation rate is reported instead.
pub fn inflation_adjusted_value(
    amount: Money,
    inflation_rate: Rate,
    years: i32,
) -> PlanResult<InflationAdjustmentResult> {
    if years < 0 {
        return Err(PlanError::invalid_input(
            "years",
            "years cannot be negative",
        ));
    }

    if years == 0 {
        return Ok(InflationAdjustmentResult {
            nominal_value: amount,
            real_value: amount,
            purchasing_power_loss: Money::zero(amount.currency()),
            inflation_impact: inflation_rate,
        });
    }

    let inflation_factor = inflation_rate.compound_factor(years);
    let real_value = amount.multiply_by(1.0 / inflation_factor)?;
    let purchasing_power_loss = amount.subtract(real_value)?;

    let impact_percentage = purchasing_power_loss.amount() / amount.amount() * 100.0;
    let inflation_impact = Rate::new(impact_percentage).unwrap_or(inflation_rate);

    Ok(InflationAdjustmentResult {
        nominal_value: amount,
        real_value,
        purchasing_power_loss,
        inflation_impact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_value_basic() {
        let fv = future_value(Money::jpy(100_000.0).unwrap(), Rate::new(5.0).unwrap(), 3).unwrap();

        // 100,000 x 1.05^3 = 115,762.50
        assert_eq!(fv.amount(), 115_762.5);
    }

    #[test]
    fn test_present_value_basic() {
        let pv = present_value(Money::jpy(115_762.5).unwrap(), Rate::new(5.0).unwrap(), 3).unwrap();

        assert!((pv.amount() - 100_000.0).abs() < 0.01);
    }

    #[test]
    fn test_round_trip() {
        let original = Money::jpy(1_234_567.0).unwrap();
        let rate = Rate::new(4.0).unwrap();

        let fv = future_value(original, rate, 7).unwrap();
        let back = present_value(fv, rate, 7).unwrap();

        assert!((back.amount() - original.amount()).abs() < 1.0);
    }

    #[test]
    fn test_zero_periods_identity() {
        let amount = Money::jpy(50_000.0).unwrap();
        let rate = Rate::new(5.0).unwrap();

        assert_eq!(future_value(amount, rate, 0).unwrap().amount(), 50_000.0);
        assert_eq!(present_value(amount, rate, 0).unwrap().amount(), 50_000.0);
    }

    #[test]
    fn test_negative_periods_rejected() {
        let amount = Money::jpy(50_000.0).unwrap();
        let rate = Rate::new(5.0).unwrap();

        assert!(future_value(amount, rate, -1).is_err());
        assert!(present_value(amount, rate, -1).is_err());
    }

    #[test]
    fn test_present_value_zero_rate_skips_division() {
        let amount = Money::jpy(50_000.0).unwrap();
        assert_eq!(
            present_value(amount, Rate::zero(), 10).unwrap().amount(),
            50_000.0
        );
    }

    #[test]
    fn test_inflation_adjustment_ten_years() {
        let result = inflation_adjusted_value(
            Money::jpy(1_000_000.0).unwrap(),
            Rate::new(2.0).unwrap(),
            10,
        )
        .unwrap();

        // 1,000,000 / 1.02^10 = 820,348.30
        let expected = 820_348.30;
        assert!((result.real_value.amount() - expected).abs() / expected < 0.01);
        assert!(result.purchasing_power_loss.is_positive());
        assert_eq!(result.nominal_value.amount(), 1_000_000.0);

        // Loss of ~18% of the nominal amount
        assert!((result.inflation_impact.as_percentage() - 17.965).abs() < 0.1);
    }

    #[test]
    fn test_inflation_adjustment_zero_years() {
        let rate = Rate::new(2.0).unwrap();
        let result =
            inflation_adjusted_value(Money::jpy(1_000_000.0).unwrap(), rate, 0).unwrap();

        assert_eq!(result.real_value.amount(), 1_000_000.0);
        assert!(result.purchasing_power_loss.is_zero());
        assert_eq!(result.inflation_impact, rate);
    }

    #[test]
    fn test_inflation_adjustment_zero_amount_falls_back() {
        let rate = Rate::new(2.0).unwrap();
        let result = inflation_adjusted_value(Money::jpy(0.0).unwrap(), rate, 5).unwrap();

        // 0/0 impact cannot be expressed; the input rate is echoed
        assert_eq!(result.inflation_impact, rate);
    }

    #[test]
    fn test_inflation_adjustment_negative_years_rejected() {
        assert!(inflation_adjusted_value(
            Money::jpy(1_000_000.0).unwrap(),
            Rate::new(2.0).unwrap(),
            -1
        )
        .is_err());
    }
}
