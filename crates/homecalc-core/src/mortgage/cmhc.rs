use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{
    div_or_zero, mul_or_zero, sub_or_zero, with_metadata, ComputationOutput, Money, Rate,
};

// ---------------------------------------------------------------------------
// Premium schedule
// ---------------------------------------------------------------------------

/// One row of the mortgage default insurance premium schedule, keyed on the
/// down payment as a fraction of the purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmhcBracket {
    pub min_down_payment_ratio: Rate,
    pub max_down_payment_ratio: Rate,
    pub premium_rate: Rate,
}

pub const CMHC_BRACKETS: [CmhcBracket; 4] = [
    CmhcBracket {
        min_down_payment_ratio: dec!(0.05),
        max_down_payment_ratio: dec!(0.0999),
        premium_rate: dec!(0.0400),
    },
    CmhcBracket {
        min_down_payment_ratio: dec!(0.10),
        max_down_payment_ratio: dec!(0.1499),
        premium_rate: dec!(0.0310),
    },
    CmhcBracket {
        min_down_payment_ratio: dec!(0.15),
        max_down_payment_ratio: dec!(0.1999),
        premium_rate: dec!(0.0280),
    },
    CmhcBracket {
        min_down_payment_ratio: dec!(0.20),
        max_down_payment_ratio: dec!(1.00),
        premium_rate: dec!(0.0000),
    },
];

/// Down payment ratio at or above which a mortgage is conventional (uninsured).
pub const CONVENTIONAL_DOWN_PAYMENT_RATIO: Rate = dec!(0.20);

/// Smallest down payment ratio the schedule covers.
pub const MINIMUM_INSURED_DOWN_PAYMENT_RATIO: Rate = dec!(0.05);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmhcInput {
    pub price: Money,
    pub down_payment: Money,
}

/// Premium charged on a mortgage, with the ratios that selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmhcPremium {
    pub down_payment_ratio: Rate,
    pub loan_to_value: Rate,
    pub mortgage_amount: Money,
    pub premium_rate: Rate,
    pub premium: Money,
    /// True when the mortgage needs default insurance (ratio below 20%).
    pub insured: bool,
    /// True when the ratio is under 5% and the first bracket was applied anyway.
    pub below_minimum: bool,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Premium rate for a down payment ratio.
///
/// Each bracket runs from its minimum up to the next bracket's minimum, so the
/// gaps between the published maxima (0.0999 .. 0.10) take the lower row.
/// Ratios under 5% are clamped to the first bracket.
pub fn premium_rate(down_payment_ratio: Rate) -> Rate {
    if down_payment_ratio >= CONVENTIONAL_DOWN_PAYMENT_RATIO {
        return Decimal::ZERO;
    }
    CMHC_BRACKETS
        .iter()
        .rev()
        .find(|b| down_payment_ratio >= b.min_down_payment_ratio)
        .unwrap_or(&CMHC_BRACKETS[0])
        .premium_rate
}

/// Default insurance premium for a purchase.
///
/// The rate applies to the mortgage amount (price less down payment), not the
/// price. A non-positive price is treated as conventional.
pub fn cmhc_premium(price: Money, down_payment: Money) -> CmhcPremium {
    let mortgage_amount = sub_or_zero(price, down_payment);

    if price <= Decimal::ZERO {
        return CmhcPremium {
            down_payment_ratio: Decimal::ZERO,
            loan_to_value: Decimal::ZERO,
            mortgage_amount,
            premium_rate: Decimal::ZERO,
            premium: Decimal::ZERO,
            insured: false,
            below_minimum: false,
        };
    }

    let down_payment_ratio = div_or_zero(down_payment, price);
    let insured = down_payment_ratio < CONVENTIONAL_DOWN_PAYMENT_RATIO;
    let rate = premium_rate(down_payment_ratio);
    let premium = if insured && mortgage_amount > Decimal::ZERO {
        mul_or_zero(mortgage_amount, rate)
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "cmhc: ratio={down_payment_ratio} rate={rate} mortgage={mortgage_amount} premium={premium}"
    );

    CmhcPremium {
        down_payment_ratio,
        loan_to_value: sub_or_zero(Decimal::ONE, down_payment_ratio),
        mortgage_amount,
        premium_rate: rate,
        premium,
        insured,
        below_minimum: down_payment_ratio < MINIMUM_INSURED_DOWN_PAYMENT_RATIO,
    }
}

/// Default insurance premium wrapped in the standard output envelope.
pub fn compute_cmhc_premium(input: &CmhcInput) -> ComputationOutput<CmhcPremium> {
    let mut warnings = Vec::new();
    let result = cmhc_premium(input.price, input.down_payment);

    if input.price <= Decimal::ZERO {
        warnings.push("Purchase price is not positive; no premium applies".to_string());
    } else if result.below_minimum {
        warnings.push(
            "Down payment is under 5% of the price; the 4.00% premium rate was applied".into(),
        );
    }

    with_metadata(
        "CMHC premium: bracket rate chosen by down payment / price, \
         charged on the mortgage amount; 20% or more down is uninsured",
        &serde_json::json!({
            "price": input.price.to_string(),
            "down_payment": input.down_payment.to_string(),
        }),
        warnings,
        result,
    )
}
