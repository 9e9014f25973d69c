use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::PlanResult;

/// A percentage rate (interest, investment return, inflation).
///
/// Stored as a percentage value: `5.0` means 5%. Constructors reject values
/// outside 0–100% and round to four decimal places of a percent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Rate {
    value: f64,
}

impl Rate {
    /// Create a rate from a percentage value (5.0 = 5%).
    pub fn new(percentage: f64) -> PlanResult<Rate> {
        if percentage.is_nan() || percentage.is_infinite() {
            return Err(PlanError::InvalidRate(
                "rate must be a finite number".into(),
            ));
        }

        if percentage < 0.0 {
            return Err(PlanError::InvalidRate("rate cannot be negative".into()));
        }

        if percentage > 100.0 {
            return Err(PlanError::InvalidRate("rate cannot exceed 100%".into()));
        }

        Ok(Rate {
            value: (percentage * 10_000.0).round() / 10_000.0,
        })
    }

    /// Create a rate from a decimal fraction (0.05 = 5%).
    pub fn from_decimal(decimal: f64) -> PlanResult<Rate> {
        Rate::new(decimal * 100.0)
    }

    /// Zero percent. Infallible, for fallback values.
    pub const fn zero() -> Rate {
        Rate { value: 0.0 }
    }

    /// The rate as a decimal fraction (5% -> 0.05).
    pub fn as_decimal(&self) -> f64 {
        self.value / 100.0
    }

    /// The rate as a percentage (5% -> 5.0).
    pub fn as_percentage(&self) -> f64 {
        self.value
    }

    /// Rates below a ten-thousandth of a percent count as zero.
    pub fn is_zero(&self) -> bool {
        self.value.abs() < 0.0001
    }

    pub fn add(&self, other: Rate) -> PlanResult<Rate> {
        Rate::new(self.value + other.value)
    }

    pub fn subtract(&self, other: Rate) -> PlanResult<Rate> {
        Rate::new(self.value - other.value)
    }

    pub fn scale(&self, factor: f64) -> PlanResult<Rate> {
        if factor.is_nan() || factor.is_infinite() {
            return Err(PlanError::InvalidRate(
                "factor must be a finite number".into(),
            ));
        }

        if factor < 0.0 {
            return Err(PlanError::InvalidRate("factor cannot be negative".into()));
        }

        Rate::new(self.value * factor)
    }

    /// The compounding multiplier over `periods`: (1 + rate)^periods.
    ///
    /// Negative period counts yield 0 and zero periods yield 1, matching the
    /// guard behavior the calculation layer relies on.
    pub fn compound_factor(&self, periods: i32) -> f64 {
        if periods < 0 {
            return 0.0;
        }

        if periods == 0 {
            return 1.0;
        }

        (1.0 + self.as_decimal()).powf(f64::from(periods))
    }

    /// The monthly-compounding-equivalent of an annual rate:
    /// (1 + annual)^(1/12) - 1. This is NOT annual/12; downstream debt and
    /// contribution schedules depend on the compounding-equivalent form.
    pub fn monthly_rate(&self) -> PlanResult<Rate> {
        let monthly = (1.0 + self.as_decimal()).powf(1.0 / 12.0) - 1.0;
        Rate::from_decimal(monthly)
    }

    /// The annual-compounding-equivalent of a monthly rate:
    /// (1 + monthly)^12 - 1.
    pub fn annual_rate(&self) -> PlanResult<Rate> {
        let annual = (1.0 + self.as_decimal()).powf(12.0) - 1.0;
        Rate::from_decimal(annual)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.value)
    }
}
