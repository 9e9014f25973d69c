use clap::Args;
use serde::Serialize;
use serde_json::Value;

use finplan_core::calc;
use finplan_core::{Money, Rate};

/// Arguments for plain compound interest
#[derive(Args)]
pub struct CompoundArgs {
    /// Principal amount in yen
    #[arg(long)]
    pub principal: f64,

    /// Annual rate as a percentage (5 = 5%)
    #[arg(long)]
    pub rate: f64,

    /// Number of compounding periods (years)
    #[arg(long)]
    pub periods: i32,
}

pub fn run_compound(args: CompoundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let principal = Money::jpy(args.principal)?;
    let rate = Rate::new(args.rate)?;

    let result = calc::compound_interest(principal, rate, args.periods)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for compound interest with monthly contributions
#[derive(Args)]
pub struct ContributionsArgs {
    /// Starting principal in yen
    #[arg(long)]
    pub principal: f64,

    /// Contribution added every month, in yen
    #[arg(long)]
    pub monthly_payment: f64,

    /// Annual rate as a percentage
    #[arg(long)]
    pub rate: f64,

    /// Number of years to contribute
    #[arg(long)]
    pub years: i32,
}

pub fn run_contributions(args: ContributionsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let principal = Money::jpy(args.principal)?;
    let monthly_payment = Money::jpy(args.monthly_payment)?;
    let rate = Rate::new(args.rate)?;

    let result = calc::compound_interest_with_regular_payments(
        principal,
        monthly_payment,
        rate,
        args.years,
    )?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for inflation adjustment
#[derive(Args)]
pub struct InflationArgs {
    /// Nominal amount in yen
    #[arg(long)]
    pub amount: f64,

    /// Annual inflation rate as a percentage
    #[arg(long)]
    pub inflation_rate: f64,

    /// Number of years of inflation
    #[arg(long)]
    pub years: i32,
}

pub fn run_inflation(args: InflationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = Money::jpy(args.amount)?;
    let inflation_rate = Rate::new(args.inflation_rate)?;

    let result = calc::inflation_adjusted_value(amount, inflation_rate, args.years)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for future value
#[derive(Args)]
pub struct FutureValueArgs {
    /// Present value in yen
    #[arg(long)]
    pub amount: f64,

    /// Rate per period as a percentage
    #[arg(long)]
    pub rate: f64,

    /// Number of periods
    #[arg(long)]
    pub periods: i32,
}

#[derive(Serialize)]
struct SingleValueOutput {
    value: Money,
}

pub fn run_future_value(args: FutureValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = Money::jpy(args.amount)?;
    let rate = Rate::new(args.rate)?;

    let value = calc::future_value(amount, rate, args.periods)?;
    Ok(serde_json::to_value(SingleValueOutput { value })?)
}

/// Arguments for present value
#[derive(Args)]
pub struct PresentValueArgs {
    /// Future value in yen
    #[arg(long)]
    pub amount: f64,

    /// Rate per period as a percentage
    #[arg(long)]
    pub rate: f64,

    /// Number of periods
    #[arg(long)]
    pub periods: i32,
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = Money::jpy(args.amount)?;
    let rate = Rate::new(args.rate)?;

    let value = calc::present_value(amount, rate, args.periods)?;
    Ok(serde_json::to_value(SingleValueOutput { value })?)
}

/// Arguments for the required savings rate
#[derive(Args)]
pub struct SavingsRateArgs {
    /// Current annual income in yen
    #[arg(long)]
    pub income: f64,

    /// Target amount in yen
    #[arg(long)]
    pub target: f64,

    /// Current savings in yen
    #[arg(long, default_value = "0")]
    pub savings: f64,

    /// Expected investment return as a percentage
    #[arg(long, default_value = "0")]
    pub investment_return: f64,

    /// Years until the target
    #[arg(long)]
    pub years: i32,
}

#[derive(Serialize)]
struct SavingsRateOutput {
    required_rate: Rate,
}

pub fn run_savings_rate(args: SavingsRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let income = Money::jpy(args.income)?;
    let target = Money::jpy(args.target)?;
    let savings = Money::jpy(args.savings)?;
    let investment_return = Rate::new(args.investment_return)?;

    let required_rate =
        calc::required_savings_rate(income, target, savings, investment_return, args.years)?;
    Ok(serde_json::to_value(SavingsRateOutput { required_rate })?)
}

/// Arguments for retirement needs
#[derive(Args)]
pub struct RetirementNeedsArgs {
    /// Expected monthly expenses in retirement, in yen
    #[arg(long)]
    pub monthly_expenses: f64,

    /// Years the retirement is expected to last
    #[arg(long)]
    pub years: i32,

    /// Annual inflation rate as a percentage
    #[arg(long, default_value = "0")]
    pub inflation_rate: f64,

    /// Expected monthly pension in yen
    #[arg(long, default_value = "0")]
    pub pension: f64,
}

pub fn run_retirement_needs(
    args: RetirementNeedsArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_expenses = Money::jpy(args.monthly_expenses)?;
    let inflation_rate = Rate::new(args.inflation_rate)?;
    let pension = Money::jpy(args.pension)?;

    let result = calc::retirement_needs(monthly_expenses, args.years, inflation_rate, pension)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the emergency fund target
#[derive(Args)]
pub struct EmergencyFundArgs {
    /// Monthly living expenses in yen
    #[arg(long)]
    pub monthly_expenses: f64,

    /// Months of expenses to hold in reserve
    #[arg(long, default_value = "6")]
    pub months: i32,

    /// Annual inflation rate as a percentage
    #[arg(long, default_value = "0")]
    pub inflation_rate: f64,

    /// Years until the reserve is fully funded
    #[arg(long, default_value = "0")]
    pub years_to_target: i32,
}

#[derive(Serialize)]
struct EmergencyFundOutput {
    target_amount: Money,
    target_months: i32,
}

pub fn run_emergency_fund(args: EmergencyFundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_expenses = Money::jpy(args.monthly_expenses)?;
    let inflation_rate = Rate::new(args.inflation_rate)?;

    let target_amount = calc::emergency_fund_target(
        monthly_expenses,
        args.months,
        inflation_rate,
        args.years_to_target,
    )?;
    Ok(serde_json::to_value(EmergencyFundOutput {
        target_amount,
        target_months: args.months,
    })?)
}

/// Arguments for the debt payoff schedule
#[derive(Args)]
pub struct DebtPayoffArgs {
    /// Outstanding debt in yen
    #[arg(long)]
    pub debt: f64,

    /// Payment made every month, in yen
    #[arg(long)]
    pub payment: f64,

    /// Annual interest rate as a percentage
    #[arg(long, default_value = "0")]
    pub interest_rate: f64,
}

#[derive(Serialize)]
struct DebtPayoffOutput {
    months: u32,
    years: f64,
}

pub fn run_debt_payoff(args: DebtPayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let debt = Money::jpy(args.debt)?;
    let payment = Money::jpy(args.payment)?;
    let interest_rate = Rate::new(args.interest_rate)?;

    let months = calc::debt_payoff_months(debt, payment, interest_rate)?;
    Ok(serde_json::to_value(DebtPayoffOutput {
        months,
        years: f64::from(months) / 12.0,
    })?)
}
