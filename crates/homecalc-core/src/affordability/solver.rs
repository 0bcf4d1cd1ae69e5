use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::affordability::stress_test::debt_service_ratios;
use crate::affordability::IncomeDebtProfile;
use crate::mortgage::down_payment::max_price_for_down_payment;
use crate::mortgage::land_transfer_tax::{calculate_land_transfer_tax, LttJurisdiction};
use crate::rules::{QualificationLimits, CONDO_FEE_WEIGHT};
use crate::time_value::{
    level_payment, number_of_payments, payment_factor, periodic_rate, CompoundingConvention,
};
use crate::types::{
    add_or_zero, mul_or_zero, sub_or_zero, sum_or_zero, with_metadata, ComputationOutput, Money,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityInput {
    #[serde(flatten)]
    pub profile: IncomeDebtProfile,
    pub down_payment: Money,
    /// Contract rate in percent.
    pub annual_rate_percent: Decimal,
    pub amortization_years: u32,
    #[serde(default)]
    pub jurisdiction: LttJurisdiction,
    #[serde(default)]
    pub limits: QualificationLimits,
}

/// The constraint that set the maximum price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitingFactor {
    #[serde(rename = "GDS")]
    Gds,
    #[serde(rename = "TDS")]
    Tds,
    #[serde(rename = "Down Payment")]
    DownPayment,
}

impl fmt::Display for LimitingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitingFactor::Gds => f.write_str("GDS"),
            LimitingFactor::Tds => f.write_str("TDS"),
            LimitingFactor::DownPayment => f.write_str("Down Payment"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub max_price: Money,
    pub max_mortgage: Money,
    /// Monthly payment at the contract rate.
    pub monthly_payment: Money,
    /// Qualifying rate in percent.
    pub stress_test_rate: Decimal,
    /// None only for the zero-income record.
    pub limiting_factor: Option<LimitingFactor>,
    /// GDS at the final price, in percent, using the stress payment.
    pub gds_ratio: Decimal,
    /// TDS at the final price, in percent, using the stress payment.
    pub tds_ratio: Decimal,
    pub monthly_income: Money,
    /// Tighter of the GDS and TDS housing-cost ceilings.
    pub max_housing_cost: Money,
    pub income_based_max_price: Money,
    pub down_payment_based_max_price: Money,
    pub down_payment_capped: bool,
    pub stress_test_payment: Money,
    pub monthly_property_tax: Money,
    pub land_transfer_tax: Money,
    /// Down payment plus land transfer tax at the final price.
    pub cash_required: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Highest purchase price that passes both the debt-service ceilings at the
/// stress-test rate and the minimum down payment schedule.
pub fn solve_affordability(input: &AffordabilityInput) -> ComputationOutput<AffordabilityOutput> {
    let mut warnings: Vec<String> = Vec::new();
    let profile = &input.profile;
    let limits = &input.limits;
    let monthly_income = profile.monthly_income();

    let output = if monthly_income <= Decimal::ZERO {
        warnings.push("No qualifying income; nothing can be financed".to_string());
        AffordabilityOutput::default()
    } else {
        solve_with_income(input, monthly_income, &mut warnings)
    };

    with_metadata(
        "Affordability: price solved from the tighter of the GDS/TDS ceilings at the \
         stress-test rate, capped by the inverse minimum down payment schedule",
        &serde_json::json!({
            "annual_income": profile.annual_income().to_string(),
            "monthly_other_debts": profile.monthly_other_debts.to_string(),
            "down_payment": input.down_payment.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "amortization_years": input.amortization_years,
            "jurisdiction": input.jurisdiction,
            "limits": limits,
        }),
        warnings,
        output,
    )
}

fn solve_with_income(
    input: &AffordabilityInput,
    monthly_income: Money,
    warnings: &mut Vec<String>,
) -> AffordabilityOutput {
    let profile = &input.profile;
    let limits = &input.limits;
    let down = input.down_payment;
    let n = number_of_payments(input.amortization_years, 12);

    // --- Step 1: income ceiling at the qualifying rate ---
    let stress_test_rate = limits.qualifying_rate_percent(input.annual_rate_percent);
    let factor = payment_factor(
        periodic_rate(stress_test_rate, 12, CompoundingConvention::Nominal),
        n,
    );

    let max_by_gds = mul_or_zero(monthly_income, limits.gds_limit);
    let max_by_tds = sub_or_zero(
        mul_or_zero(monthly_income, limits.tds_limit),
        profile.monthly_other_debts,
    );
    let (max_housing_cost, ratio_factor) = if max_by_gds < max_by_tds {
        (max_by_gds, LimitingFactor::Gds)
    } else {
        (max_by_tds, LimitingFactor::Tds)
    };

    // housing = (price - down) * f + price * tax + heat + condo/2, solved for price
    let numerator = sum_or_zero([
        max_housing_cost,
        -profile.monthly_heating,
        -mul_or_zero(profile.monthly_condo_fees, CONDO_FEE_WEIGHT),
        mul_or_zero(down, factor),
    ]);
    let denominator = add_or_zero(factor, profile.monthly_property_tax_rate());
    let income_based_max_price = if denominator > Decimal::ZERO {
        numerator
            .checked_div(denominator)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    // --- Step 2: down payment ceiling ---
    let ceiling = max_price_for_down_payment(down);

    // --- Step 3: tighter of the two ---
    let (max_price, limiting_factor) = if income_based_max_price < ceiling.max_price {
        (income_based_max_price, ratio_factor)
    } else {
        (ceiling.max_price, LimitingFactor::DownPayment)
    };

    log::debug!(
        "affordability: qualifying={stress_test_rate}% housing_cap={max_housing_cost} \
         by_income={income_based_max_price} by_down={} -> {max_price} ({limiting_factor})",
        ceiling.max_price
    );

    if income_based_max_price < down {
        warnings.push(
            "Income supports a price below the down payment; no mortgage is needed".to_string(),
        );
    }
    if ceiling.capped && limiting_factor == LimitingFactor::DownPayment {
        warnings.push(
            "Homes of $1,000,000 or more need 20% down; price held at $999,999".to_string(),
        );
    }

    // --- Step 4: restate everything at the final price ---
    let max_mortgage = sub_or_zero(max_price, down).max(Decimal::ZERO);
    let contract_rate =
        periodic_rate(input.annual_rate_percent, 12, CompoundingConvention::Nominal);
    let monthly_payment = level_payment(max_mortgage, contract_rate, n);

    let ratios = debt_service_ratios(
        profile,
        max_mortgage,
        max_price,
        input.annual_rate_percent,
        input.amortization_years,
        limits,
    );
    // ratios land on the ceiling when income binds; ignore 28th-digit noise
    let gds_cap = mul_or_zero(limits.gds_limit, Decimal::ONE_HUNDRED);
    let tds_cap = mul_or_zero(limits.tds_limit, Decimal::ONE_HUNDRED);
    if ratios.gds_ratio.round_dp(6) > gds_cap || ratios.tds_ratio.round_dp(6) > tds_cap {
        warnings.push(format!(
            "Fixed costs alone exceed the debt-service ceilings (GDS {}%, TDS {}%)",
            ratios.gds_ratio.round_dp(1),
            ratios.tds_ratio.round_dp(1)
        ));
    }

    let ltt = calculate_land_transfer_tax(max_price, input.jurisdiction);

    AffordabilityOutput {
        max_price,
        max_mortgage,
        monthly_payment,
        stress_test_rate,
        limiting_factor: Some(limiting_factor),
        gds_ratio: ratios.gds_ratio,
        tds_ratio: ratios.tds_ratio,
        monthly_income,
        max_housing_cost,
        income_based_max_price,
        down_payment_based_max_price: ceiling.max_price,
        down_payment_capped: ceiling.capped,
        stress_test_payment: ratios.stress_payment,
        monthly_property_tax: ratios.monthly_property_tax,
        land_transfer_tax: ltt.total,
        cash_required: add_or_zero(down, ltt.total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> AffordabilityInput {
        AffordabilityInput {
            profile: IncomeDebtProfile {
                annual_income_primary: dec!(120000),
                annual_income_secondary: Decimal::ZERO,
                is_joint: false,
                monthly_other_debts: Decimal::ZERO,
                monthly_heating: dec!(150),
                monthly_condo_fees: Decimal::ZERO,
                property_tax_rate_percent: dec!(1.0),
            },
            down_payment: dec!(400000),
            annual_rate_percent: dec!(5.0),
            amortization_years: 25,
            jurisdiction: LttJurisdiction::Ontario,
            limits: QualificationLimits::default(),
        }
    }

    #[test]
    fn test_income_limited_price() {
        let out = solve_affordability(&sample_input()).result;
        assert_eq!(out.limiting_factor, Some(LimitingFactor::Gds));
        assert_eq!(out.stress_test_rate, dec!(7));
        assert!((out.max_price - dec!(832427.85)).abs() < dec!(0.01), "got {}", out.max_price);
        assert_eq!(out.max_housing_cost, dec!(3900));
    }

    #[test]
    fn test_final_gds_sits_on_ceiling() {
        let out = solve_affordability(&sample_input()).result;
        assert!((out.gds_ratio - dec!(39)).abs() < dec!(0.0001), "got {}", out.gds_ratio);
        assert_eq!(out.tds_ratio, out.gds_ratio);
    }

    #[test]
    fn test_no_warnings_for_ordinary_profile() {
        let out = solve_affordability(&sample_input());
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_zero_income_returns_zero_record() {
        let mut input = sample_input();
        input.profile.annual_income_primary = Decimal::ZERO;
        let out = solve_affordability(&input);
        assert_eq!(out.result, AffordabilityOutput::default());
        assert!(out.result.limiting_factor.is_none());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_contract_payment_below_stress_payment() {
        let out = solve_affordability(&sample_input()).result;
        assert!(out.monthly_payment < out.stress_test_payment);
        assert_eq!(out.max_mortgage, out.max_price - dec!(400000));
    }

    #[test]
    fn test_cash_required_includes_ltt() {
        let out = solve_affordability(&sample_input()).result;
        assert!(out.land_transfer_tax > Decimal::ZERO);
        assert_eq!(out.cash_required, dec!(400000) + out.land_transfer_tax);
    }

    #[test]
    fn test_limiting_factor_display() {
        assert_eq!(LimitingFactor::DownPayment.to_string(), "Down Payment");
        assert_eq!(
            serde_json::to_string(&LimitingFactor::Tds).unwrap(),
            "\"TDS\""
        );
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        let mut input = sample_input();
        input.profile.annual_income_primary = Decimal::MAX;
        input.down_payment = Decimal::MAX;
        input.profile.monthly_heating = Decimal::MIN;
        let out = solve_affordability(&input).result;
        // 5x the down payment overflows, so that ceiling collapses to zero
        assert_eq!(out.down_payment_based_max_price, Decimal::ZERO);
        assert_eq!(out.max_price, Decimal::ZERO);
        assert_eq!(out.max_mortgage, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_joint_income_is_zero_record() {
        let mut input = sample_input();
        input.profile.is_joint = true;
        input.profile.annual_income_primary = Decimal::MAX;
        input.profile.annual_income_secondary = Decimal::MAX;
        let out = solve_affordability(&input);
        assert_eq!(out.result, AffordabilityOutput::default());
        assert_eq!(out.warnings.len(), 1);
    }
}
