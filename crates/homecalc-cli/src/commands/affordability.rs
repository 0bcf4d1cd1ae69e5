use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use homecalc_core::affordability::solver::{self, AffordabilityInput};
use homecalc_core::affordability::stress_test::{self, DebtServiceInput};
use homecalc_core::affordability::IncomeDebtProfile;
use homecalc_core::mortgage::land_transfer_tax::LttJurisdiction;
use homecalc_core::rules::QualificationLimits;

use crate::input;

/// Arguments for maximum affordable price
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Primary applicant's annual income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Co-applicant's annual income (counted with --joint)
    #[arg(long, default_value = "0")]
    pub secondary_income: Decimal,

    /// Apply jointly with a co-applicant
    #[arg(long)]
    pub joint: bool,

    /// Monthly payments on other debts (cards, car, student loans)
    #[arg(long, default_value = "0")]
    pub debts: Decimal,

    /// Monthly heating cost
    #[arg(long, default_value = "150")]
    pub heating: Decimal,

    /// Monthly condo fees
    #[arg(long, default_value = "0")]
    pub condo_fees: Decimal,

    /// Annual property tax in percent of price
    #[arg(long, default_value = "1.0")]
    pub property_tax: Decimal,

    /// Down payment available
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Contract interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Amortization in years
    #[arg(long, default_value = "25")]
    pub amortization: u32,

    /// ontario or toronto (for closing costs)
    #[arg(long, default_value = "ontario")]
    pub jurisdiction: LttJurisdiction,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for measuring GDS/TDS on a trial mortgage
#[derive(Args)]
pub struct StressTestArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let aff_input: AffordabilityInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordabilityInput {
            profile: IncomeDebtProfile {
                annual_income_primary: args
                    .income
                    .ok_or("--income is required (or provide --input)")?,
                annual_income_secondary: args.secondary_income,
                is_joint: args.joint,
                monthly_other_debts: args.debts,
                monthly_heating: args.heating,
                monthly_condo_fees: args.condo_fees,
                property_tax_rate_percent: args.property_tax,
            },
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_rate_percent: args.rate.unwrap_or(dec!(5.0)),
            amortization_years: args.amortization,
            jurisdiction: args.jurisdiction,
            limits: QualificationLimits::default(),
        },
    };
    let result = solver::solve_affordability(&aff_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_stress_test(args: StressTestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let st_input: DebtServiceInput = input::load(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for the stress test")?;
    let result = stress_test::measure_debt_service(&st_input);
    Ok(serde_json::to_value(result)?)
}
