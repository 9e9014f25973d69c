use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::PlanResult;

/// A time span of whole years and months.
///
/// Months are normalized into 0–11 with the overflow carried into years, so
/// two periods covering the same number of months compare equal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    years: i32,
    months: i32,
}

impl Period {
    pub fn new(years: i32, months: i32) -> PlanResult<Period> {
        if years < 0 {
            return Err(PlanError::InvalidPeriod("years cannot be negative".into()));
        }

        if months < 0 {
            return Err(PlanError::InvalidPeriod("months cannot be negative".into()));
        }

        Ok(Period {
            years: years + months / 12,
            months: months % 12,
        })
    }

    pub fn from_years(years: i32) -> PlanResult<Period> {
        Period::new(years, 0)
    }

    pub fn from_months(months: i32) -> PlanResult<Period> {
        Period::new(0, months)
    }

    /// Build a period from a fractional year count, rounded to whole months.
    pub fn from_years_f64(years: f64) -> PlanResult<Period> {
        if years.is_nan() || years.is_infinite() {
            return Err(PlanError::InvalidPeriod(
                "years must be a finite number".into(),
            ));
        }

        if years < 0.0 {
            return Err(PlanError::InvalidPeriod("years cannot be negative".into()));
        }

        Period::from_months((years * 12.0).round() as i32)
    }

    pub fn years(&self) -> i32 {
        self.years
    }

    pub fn months(&self) -> i32 {
        self.months
    }

    pub fn to_months(&self) -> i32 {
        self.years * 12 + self.months
    }

    pub fn to_years(&self) -> f64 {
        f64::from(self.years) + f64::from(self.months) / 12.0
    }

    pub fn add(&self, other: Period) -> PlanResult<Period> {
        Period::new(self.years + other.years, self.months + other.months)
    }

    /// Subtraction fails rather than produce a negative span.
    pub fn subtract(&self, other: Period) -> PlanResult<Period> {
        let total = self.to_months() - other.to_months();
        if total < 0 {
            return Err(PlanError::InvalidPeriod(
                "resulting period cannot be negative".into(),
            ));
        }

        Period::from_months(total)
    }

    pub fn multiply(&self, factor: f64) -> PlanResult<Period> {
        if factor.is_nan() || factor.is_infinite() {
            return Err(PlanError::InvalidPeriod(
                "factor must be a finite number".into(),
            ));
        }

        if factor < 0.0 {
            return Err(PlanError::InvalidPeriod("factor cannot be negative".into()));
        }

        Period::from_months((f64::from(self.to_months()) * factor).round() as i32)
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0
    }

    pub fn is_positive(&self) -> bool {
        self.years > 0 || self.months > 0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, m) => write!(f, "{}m", m),
            (y, 0) => write!(f, "{}y", y),
            (y, m) => write!(f, "{}y {}m", y, m),
        }
    }
}
