pub mod calc;
pub mod goals;
pub mod plan;
