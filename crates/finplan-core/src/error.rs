use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Currency mismatch: cannot combine {left} and {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),
}

impl PlanError {
    /// Shorthand for the common field/reason validation error.
    pub fn invalid_input(field: &str, reason: &str) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
