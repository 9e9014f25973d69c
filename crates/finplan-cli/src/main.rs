mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calc::{
    CompoundArgs, ContributionsArgs, DebtPayoffArgs, EmergencyFundArgs, FutureValueArgs,
    InflationArgs, PresentValueArgs, RetirementNeedsArgs, SavingsRateArgs,
};
use commands::goals::{AdjustmentsArgs, FeasibilityArgs, RecommendArgs};
use commands::plan::{ProjectionArgs, ValidateArgs};

/// Personal financial planning calculations
#[derive(Parser)]
#[command(
    name = "fpc",
    version,
    about = "Personal financial planning calculator",
    long_about = "A CLI for personal financial planning: compound interest and \
                  contribution projections, inflation adjustment, retirement needs, \
                  emergency fund sizing, debt payoff schedules, and goal \
                  recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compound a principal over whole periods
    Compound(CompoundArgs),
    /// Compound a principal with monthly contributions
    Contributions(ContributionsArgs),
    /// Deflate a nominal amount by expected inflation
    Inflation(InflationArgs),
    /// Future value of a present amount
    FutureValue(FutureValueArgs),
    /// Present value of a future amount
    PresentValue(PresentValueArgs),
    /// Savings rate required to reach a target
    SavingsRate(SavingsRateArgs),
    /// Retirement funding needs beyond the pension
    RetirementNeeds(RetirementNeedsArgs),
    /// Emergency reserve target in months of expenses
    EmergencyFund(EmergencyFundArgs),
    /// Months needed to pay off a debt
    DebtPayoff(DebtPayoffArgs),
    /// Recommend a monthly savings amount for a goal
    RecommendSavings(RecommendArgs),
    /// Suggest adjustments for an off-track goal
    SuggestAdjustments(AdjustmentsArgs),
    /// Feasibility report for a goal against a profile
    Feasibility(FeasibilityArgs),
    /// Combined plan projection (assets, retirement, reserves, goals)
    Projection(ProjectionArgs),
    /// Validate a whole plan
    Validate(ValidateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compound(args) => commands::calc::run_compound(args),
        Commands::Contributions(args) => commands::calc::run_contributions(args),
        Commands::Inflation(args) => commands::calc::run_inflation(args),
        Commands::FutureValue(args) => commands::calc::run_future_value(args),
        Commands::PresentValue(args) => commands::calc::run_present_value(args),
        Commands::SavingsRate(args) => commands::calc::run_savings_rate(args),
        Commands::RetirementNeeds(args) => commands::calc::run_retirement_needs(args),
        Commands::EmergencyFund(args) => commands::calc::run_emergency_fund(args),
        Commands::DebtPayoff(args) => commands::calc::run_debt_payoff(args),
        Commands::RecommendSavings(args) => commands::goals::run_recommend(args),
        Commands::SuggestAdjustments(args) => commands::goals::run_adjustments(args),
        Commands::Feasibility(args) => commands::goals::run_feasibility(args),
        Commands::Projection(args) => commands::plan::run_projection(args),
        Commands::Validate(args) => commands::plan::run_validate(args),
        Commands::Version => {
            println!("fpc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
