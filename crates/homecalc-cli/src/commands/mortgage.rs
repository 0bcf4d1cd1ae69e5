use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homecalc_core::mortgage::cmhc::{self, CmhcInput};
use homecalc_core::mortgage::land_transfer_tax::{self, LandTransferTaxInput, LttJurisdiction};
use homecalc_core::mortgage::quote::{self, LoanTerms, MortgageQuoteInput};
use homecalc_core::time_value::{CompoundingConvention, PaymentFrequency};

use crate::input;

/// Arguments for a mortgage quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment amount
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Contract interest rate in percent (e.g. 4.79)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Amortization in years
    #[arg(long, default_value = "25")]
    pub amortization: u32,

    /// monthly, bi-weekly or accelerated-bi-weekly
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,

    /// nominal or semi-annual
    #[arg(long, default_value = "nominal")]
    pub compounding: CompoundingConvention,

    /// ontario or toronto
    #[arg(long, default_value = "ontario")]
    pub jurisdiction: LttJurisdiction,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the CMHC premium lookup
#[derive(Args)]
pub struct CmhcArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Decimal,

    /// Down payment amount
    #[arg(long)]
    pub down_payment: Decimal,
}

/// Arguments for land transfer tax
#[derive(Args)]
pub struct LttArgs {
    /// Purchase price or assessed value
    #[arg(long)]
    pub value: Option<Decimal>,

    /// ontario or toronto
    #[arg(long, default_value = "ontario")]
    pub jurisdiction: LttJurisdiction,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: MortgageQuoteInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => MortgageQuoteInput {
            terms: LoanTerms {
                price: args.price.ok_or("--price is required (or provide --input)")?,
                down_payment: args
                    .down_payment
                    .ok_or("--down-payment is required (or provide --input)")?,
                annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
                amortization_years: args.amortization,
                payment_frequency: args.frequency,
                compounding: args.compounding,
            },
            jurisdiction: args.jurisdiction,
        },
    };
    let result = quote::quote_mortgage(&quote_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_cmhc(args: CmhcArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmhc_input = CmhcInput {
        price: args.price,
        down_payment: args.down_payment,
    };
    let result = cmhc::compute_cmhc_premium(&cmhc_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_ltt(args: LttArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ltt_input: LandTransferTaxInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LandTransferTaxInput {
            value: args.value.ok_or("--value is required (or provide --input)")?,
            jurisdiction: args.jurisdiction,
        },
    };
    let result = land_transfer_tax::compute_land_transfer_tax(&ltt_input);
    Ok(serde_json::to_value(result)?)
}
