use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::rate::Rate;
use crate::PlanResult;

/// Supported currencies. Amounts are tracked in JPY in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    JPY,
    USD,
    EUR,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::JPY => "JPY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        };
        f.write_str(code)
    }
}

/// A monetary amount in a single currency.
///
/// Immutable: every operation returns a freshly constructed value. Arithmetic
/// is only defined between amounts of the same currency, and every
/// construction re-rounds to two decimal places (half away from zero) so
/// repeated operations stay on cent boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    amount: f64,
    currency: Currency,
}

impl Money {
    /// Create a validated amount. NaN and infinite inputs are rejected.
    pub fn new(amount: f64, currency: Currency) -> PlanResult<Money> {
        if amount.is_nan() || amount.is_infinite() {
            return Err(PlanError::InvalidAmount(
                "amount must be a finite number".into(),
            ));
        }

        Ok(Money {
            amount: round_to_cents(amount),
            currency,
        })
    }

    /// Create a validated JPY amount.
    pub fn jpy(amount: f64) -> PlanResult<Money> {
        Money::new(amount, Currency::JPY)
    }

    /// Zero in the given currency. Infallible, for fallback values.
    pub const fn zero(currency: Currency) -> Money {
        Money {
            amount: 0.0,
            currency,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn add(&self, other: Money) -> PlanResult<Money> {
        self.check_currency(other)?;
        Money::new(self.amount + other.amount, self.currency)
    }

    pub fn subtract(&self, other: Money) -> PlanResult<Money> {
        self.check_currency(other)?;
        Money::new(self.amount - other.amount, self.currency)
    }

    /// Multiply the amount by a rate (uses the rate's decimal form).
    pub fn multiply(&self, rate: Rate) -> PlanResult<Money> {
        Money::new(self.amount * rate.as_decimal(), self.currency)
    }

    /// Multiply the amount by a plain factor. NaN/infinite factors rejected.
    pub fn multiply_by(&self, factor: f64) -> PlanResult<Money> {
        if factor.is_nan() || factor.is_infinite() {
            return Err(PlanError::InvalidAmount(
                "multiplier must be a finite number".into(),
            ));
        }

        Money::new(self.amount * factor, self.currency)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0.0
    }

    /// Sub-cent amounts count as zero.
    pub fn is_zero(&self) -> bool {
        self.amount.abs() < 0.01
    }

    pub fn greater_than(&self, other: Money) -> PlanResult<bool> {
        self.check_currency(other)?;
        Ok(self.amount > other.amount)
    }

    pub fn less_than(&self, other: Money) -> PlanResult<bool> {
        self.check_currency(other)?;
        Ok(self.amount < other.amount)
    }

    /// Equality within half a cent.
    pub fn equals(&self, other: Money) -> PlanResult<bool> {
        self.check_currency(other)?;
        Ok((self.amount - other.amount).abs() < 0.01)
    }

    pub fn abs(&self) -> Money {
        Money {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    fn check_currency(&self, other: Money) -> PlanResult<()> {
        if self.currency != other.currency {
            return Err(PlanError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
