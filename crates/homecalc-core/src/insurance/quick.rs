use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    add_or_zero, mul_or_zero, sub_or_zero, sum_or_zero, with_metadata, ComputationOutput, Money,
};

/// Totals for a one-screen estimate, without the household breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickEstimateInput {
    pub annual_income: Money,
    pub years_to_replace: Decimal,
    #[serde(default)]
    pub debt: Money,
    #[serde(default)]
    pub mortgage: Money,
    #[serde(default)]
    pub education: Money,
    #[serde(default)]
    pub savings: Money,
    #[serde(default)]
    pub existing_insurance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedsBreakdown {
    pub debt: Money,
    pub income_replacement: Money,
    pub mortgage: Money,
    pub education: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickEstimate {
    pub total_needs: Money,
    pub total_assets: Money,
    pub gap: Money,
    /// Assets beyond the need; zero whenever `gap` is positive.
    pub surplus: Money,
    pub breakdown: NeedsBreakdown,
}

pub fn quick_estimate(input: &QuickEstimateInput) -> ComputationOutput<QuickEstimate> {
    let income_replacement = mul_or_zero(input.annual_income, input.years_to_replace);
    let total_needs = sum_or_zero([
        input.debt,
        income_replacement,
        input.mortgage,
        input.education,
    ]);
    let total_assets = add_or_zero(input.savings, input.existing_insurance);
    let net = sub_or_zero(total_needs, total_assets);

    let output = QuickEstimate {
        total_needs,
        total_assets,
        gap: net.max(Decimal::ZERO),
        surplus: (-net).max(Decimal::ZERO),
        breakdown: NeedsBreakdown {
            debt: input.debt,
            income_replacement,
            mortgage: input.mortgage,
            education: input.education,
        },
    };

    with_metadata(
        "DIME quick estimate: debt + income x years + mortgage + education, \
         less savings and existing insurance",
        &serde_json::json!({
            "annual_income": input.annual_income.to_string(),
            "years_to_replace": input.years_to_replace.to_string(),
        }),
        Vec::new(),
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> QuickEstimateInput {
        QuickEstimateInput {
            annual_income: dec!(50000),
            years_to_replace: dec!(10),
            debt: dec!(15000),
            mortgage: dec!(250000),
            education: dec!(50000),
            savings: dec!(20000),
            existing_insurance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_quick_estimate_dime_totals() {
        let q = quick_estimate(&sample()).result;
        assert_eq!(q.breakdown.income_replacement, dec!(500000));
        assert_eq!(q.total_needs, dec!(815000));
        assert_eq!(q.total_assets, dec!(20000));
        assert_eq!(q.gap, dec!(795000));
        assert_eq!(q.surplus, Decimal::ZERO);
    }

    #[test]
    fn test_quick_estimate_surplus() {
        let mut input = sample();
        input.existing_insurance = dec!(1000000);
        let q = quick_estimate(&input).result;
        assert_eq!(q.gap, Decimal::ZERO);
        assert_eq!(q.surplus, dec!(205000));
    }

    #[test]
    fn test_quick_estimate_defaults() {
        let input: QuickEstimateInput =
            serde_json::from_str(r#"{"annual_income": 40000, "years_to_replace": 5}"#).unwrap();
        let q = quick_estimate(&input).result;
        assert_eq!(q.gap, dec!(200000));
    }

    #[test]
    fn test_quick_estimate_fractional_years() {
        let mut input = sample();
        input.years_to_replace = dec!(7.5);
        let q = quick_estimate(&input).result;
        assert_eq!(q.breakdown.income_replacement, dec!(375000));
        assert_eq!(q.total_needs, dec!(690000));
    }

    #[test]
    fn test_quick_estimate_overflow_does_not_panic() {
        let mut input = sample();
        input.annual_income = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let q = quick_estimate(&input).result;
        assert_eq!(q.breakdown.income_replacement, Decimal::ZERO);
        // 15k + 250k + 50k - 20k
        assert_eq!(q.gap, dec!(295000));

        input.annual_income = dec!(50000);
        input.debt = Decimal::MAX;
        input.mortgage = Decimal::MAX;
        let q = quick_estimate(&input).result;
        assert_eq!(q.total_needs, Decimal::ZERO);
        assert_eq!(q.gap, Decimal::ZERO);
        assert_eq!(q.surplus, dec!(20000));
    }
}
