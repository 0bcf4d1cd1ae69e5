use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeCalcError;
use crate::types::{
    add_or_zero, mul_or_zero, sub_or_zero, with_metadata, ComputationOutput, Money, Rate,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A marginal rate that applies to the part of the value above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LttBracket {
    pub threshold: Money,
    pub marginal_rate: Rate,
}

/// Ontario land transfer tax, highest threshold first.
pub const ONTARIO_LTT_BRACKETS: [LttBracket; 5] = [
    LttBracket { threshold: dec!(2000000), marginal_rate: dec!(0.025) },
    LttBracket { threshold: dec!(400000), marginal_rate: dec!(0.020) },
    LttBracket { threshold: dec!(250000), marginal_rate: dec!(0.015) },
    LttBracket { threshold: dec!(55000), marginal_rate: dec!(0.010) },
    LttBracket { threshold: dec!(0), marginal_rate: dec!(0.005) },
];

/// Toronto municipal land transfer tax. Mirrors the provincial schedule.
pub const TORONTO_MLTT_BRACKETS: [LttBracket; 5] = ONTARIO_LTT_BRACKETS;

/// Which land transfer taxes apply to a purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LttJurisdiction {
    #[default]
    Ontario,
    #[serde(alias = "toronto")]
    OntarioPlusToronto,
}

impl LttJurisdiction {
    pub fn includes_toronto(self) -> bool {
        matches!(self, LttJurisdiction::OntarioPlusToronto)
    }
}

impl FromStr for LttJurisdiction {
    type Err = HomeCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "ontario" => Ok(LttJurisdiction::Ontario),
            "toronto" | "ontario_plus_toronto" => Ok(LttJurisdiction::OntarioPlusToronto),
            _ => Err(HomeCalcError::unknown_variant(
                "jurisdiction",
                s,
                &["ontario", "toronto"],
            )),
        }
    }
}

impl fmt::Display for LttJurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LttJurisdiction::Ontario => f.write_str("ontario"),
            LttJurisdiction::OntarioPlusToronto => f.write_str("ontario_plus_toronto"),
        }
    }
}

/// Tax accrued inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketCharge {
    pub threshold: Money,
    pub marginal_rate: Rate,
    pub taxable_amount: Money,
    pub tax: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandTransferTaxInput {
    pub value: Money,
    #[serde(default)]
    pub jurisdiction: LttJurisdiction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandTransferTax {
    pub value: Money,
    pub jurisdiction: LttJurisdiction,
    pub provincial: Money,
    pub municipal: Money,
    pub total: Money,
    /// total / value; zero for a non-positive value.
    pub effective_rate: Rate,
    pub provincial_breakdown: Vec<BracketCharge>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Progressive tax over `value`, peeling from the highest bracket down.
///
/// `brackets` must be ordered by descending threshold. Only brackets that
/// accrue tax appear in the returned breakdown, highest first.
pub fn bracket_tax(value: Money, brackets: &[LttBracket]) -> (Money, Vec<BracketCharge>) {
    let mut remaining = value;
    let mut total = Decimal::ZERO;
    let mut charges = Vec::new();

    for bracket in brackets {
        if remaining > bracket.threshold {
            let taxable_amount = sub_or_zero(remaining, bracket.threshold);
            let tax = mul_or_zero(taxable_amount, bracket.marginal_rate);
            total = add_or_zero(total, tax);
            charges.push(BracketCharge {
                threshold: bracket.threshold,
                marginal_rate: bracket.marginal_rate,
                taxable_amount,
                tax,
            });
            remaining = bracket.threshold;
        }
    }

    (total, charges)
}

/// Ontario provincial land transfer tax on `value`.
pub fn provincial_land_transfer_tax(value: Money) -> Money {
    bracket_tax(value, &ONTARIO_LTT_BRACKETS).0
}

/// Provincial tax plus, in Toronto, the municipal tax on the same value.
pub fn calculate_land_transfer_tax(value: Money, jurisdiction: LttJurisdiction) -> LandTransferTax {
    let (provincial, provincial_breakdown) = bracket_tax(value, &ONTARIO_LTT_BRACKETS);
    let municipal = if jurisdiction.includes_toronto() {
        bracket_tax(value, &TORONTO_MLTT_BRACKETS).0
    } else {
        Decimal::ZERO
    };
    let total = add_or_zero(provincial, municipal);
    let effective_rate = if value > Decimal::ZERO {
        total / value
    } else {
        Decimal::ZERO
    };

    log::debug!("ltt: value={value} jurisdiction={jurisdiction} provincial={provincial} municipal={municipal}");

    LandTransferTax {
        value,
        jurisdiction,
        provincial,
        municipal,
        total,
        effective_rate,
        provincial_breakdown,
    }
}

/// Land transfer tax wrapped in the standard output envelope.
pub fn compute_land_transfer_tax(input: &LandTransferTaxInput) -> ComputationOutput<LandTransferTax> {
    let mut warnings = Vec::new();
    if input.value <= Decimal::ZERO {
        warnings.push("Value is not positive; no land transfer tax applies".to_string());
    }

    let result = calculate_land_transfer_tax(input.value, input.jurisdiction);

    with_metadata(
        "Ontario land transfer tax: marginal brackets peeled from the top; \
         Toronto adds a municipal tax on the same schedule",
        &serde_json::json!({
            "value": input.value.to_string(),
            "jurisdiction": input.jurisdiction,
        }),
        warnings,
        result,
    )
}
