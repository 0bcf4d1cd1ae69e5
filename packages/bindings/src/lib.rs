use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use homecalc_core::affordability::solver::{self, AffordabilityInput};
use homecalc_core::affordability::stress_test::{self, DebtServiceInput};
use homecalc_core::insurance::needs::{self, HouseholdProfile};
use homecalc_core::insurance::quick::{self, QuickEstimateInput};
use homecalc_core::mortgage::cmhc::{self, CmhcInput};
use homecalc_core::mortgage::land_transfer_tax::{self, LandTransferTaxInput};
use homecalc_core::mortgage::quote::{self, MortgageQuoteInput};
use homecalc_core::HomeCalcResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse `input_json` as `I`, run `f`, and serialize whatever it returns.
fn run_json<I, O, F>(input_json: &str, f: F) -> HomeCalcResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(&I) -> O,
{
    let input: I = serde_json::from_str(input_json)?;
    Ok(serde_json::to_string(&f(&input))?)
}

fn call_json<I, O, F>(input_json: &str, f: F) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(&I) -> O,
{
    run_json(input_json, f).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_mortgage(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &MortgageQuoteInput| {
        quote::quote_mortgage(input)
    })
}

#[napi]
pub fn land_transfer_tax(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &LandTransferTaxInput| {
        land_transfer_tax::compute_land_transfer_tax(input)
    })
}

#[napi]
pub fn cmhc_premium(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &CmhcInput| {
        cmhc::compute_cmhc_premium(input)
    })
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_affordability(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &AffordabilityInput| {
        solver::solve_affordability(input)
    })
}

#[napi]
pub fn measure_debt_service(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &DebtServiceInput| {
        stress_test::measure_debt_service(input)
    })
}

// ---------------------------------------------------------------------------
// Insurance
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_insurance_needs(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &HouseholdProfile| {
        needs::analyze_needs(input)
    })
}

#[napi]
pub fn quick_insurance_estimate(input_json: String) -> NapiResult<String> {
    call_json(&input_json, |input: &QuickEstimateInput| {
        quick::quick_estimate(input)
    })
}
