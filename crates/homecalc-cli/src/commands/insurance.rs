use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homecalc_core::insurance::needs::{self, HouseholdProfile};
use homecalc_core::insurance::quick::{self, QuickEstimateInput};

use crate::input;

/// Arguments for the household needs analysis
#[derive(Args)]
pub struct NeedsArgs {
    /// Path to JSON/YAML household file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the quick DIME estimate
#[derive(Args)]
pub struct QuickNeedsArgs {
    /// Annual income to replace
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Years of income to replace
    #[arg(long, default_value = "10")]
    pub years: Decimal,

    /// Debts other than the mortgage
    #[arg(long, default_value = "0")]
    pub debt: Decimal,

    /// Mortgage balance
    #[arg(long, default_value = "0")]
    pub mortgage: Decimal,

    /// Education funding for children
    #[arg(long, default_value = "0")]
    pub education: Decimal,

    /// Savings and investments
    #[arg(long, default_value = "0")]
    pub savings: Decimal,

    /// Existing life insurance coverage
    #[arg(long, default_value = "0")]
    pub existing_insurance: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_needs(args: NeedsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let household: HouseholdProfile = input::load(args.input.as_deref())?
        .ok_or("--input <household.json> or stdin required for needs analysis")?;
    let result = needs::analyze_needs(&household);
    Ok(serde_json::to_value(result)?)
}

pub fn run_quick_needs(args: QuickNeedsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quick_input: QuickEstimateInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => QuickEstimateInput {
            annual_income: args.income.ok_or("--income is required (or provide --input)")?,
            years_to_replace: args.years,
            debt: args.debt,
            mortgage: args.mortgage,
            education: args.education,
            savings: args.savings,
            existing_insurance: args.existing_insurance,
        },
    };
    let result = quick::quick_estimate(&quick_input);
    Ok(serde_json::to_value(result)?)
}
