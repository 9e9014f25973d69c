//! Stateless financial calculations.
//!
//! Every function is pure: explicit value-object arguments in, a result
//! struct or error out. The iterative schedules (regular contributions, debt
//! payoff) are simulated month by month on purpose; their per-month operation
//! order is part of the contract.

pub mod compound;
pub mod debt;
pub mod emergency;
pub mod retirement;
pub mod time_value;

pub use compound::{
    compound_interest, compound_interest_with_regular_payments, CompoundInterestResult,
};
pub use debt::debt_payoff_months;
pub use emergency::emergency_fund_target;
pub use retirement::{required_savings_rate, retirement_needs, RetirementNeedsResult};
pub use time_value::{
    future_value, inflation_adjusted_value, present_value, InflationAdjustmentResult,
};
