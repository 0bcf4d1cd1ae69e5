use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeCalcError;
use crate::types::{percent_to_rate, Money, Rate};

/// How often a mortgage payment is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    /// Priced exactly like `BiWeekly`; only the cash-flow cadence differs.
    AcceleratedBiWeekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly | PaymentFrequency::AcceleratedBiWeekly => 26,
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = HomeCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "bi_weekly" | "biweekly" => Ok(PaymentFrequency::BiWeekly),
            "accelerated_bi_weekly" | "accelerated_biweekly" | "accelerated" => {
                Ok(PaymentFrequency::AcceleratedBiWeekly)
            }
            _ => Err(HomeCalcError::unknown_variant(
                "payment_frequency",
                s,
                &["monthly", "bi_weekly", "accelerated_bi_weekly"],
            )),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::BiWeekly => "bi_weekly",
            PaymentFrequency::AcceleratedBiWeekly => "accelerated_bi_weekly",
        };
        f.write_str(s)
    }
}

/// How a quoted annual rate is turned into a per-payment rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingConvention {
    /// annual / periods_per_year
    #[default]
    Nominal,
    /// Compounded semi-annually, not in advance (Canadian fixed-rate convention).
    SemiAnnual,
}

impl FromStr for CompoundingConvention {
    type Err = HomeCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "nominal" => Ok(CompoundingConvention::Nominal),
            "semi_annual" | "semiannual" => Ok(CompoundingConvention::SemiAnnual),
            _ => Err(HomeCalcError::unknown_variant(
                "compounding",
                s,
                &["nominal", "semi_annual"],
            )),
        }
    }
}

/// Per-payment rate for an annual rate quoted in percent.
pub fn periodic_rate(
    annual_rate_percent: Decimal,
    periods_per_year: u32,
    convention: CompoundingConvention,
) -> Rate {
    if periods_per_year == 0 {
        return Decimal::ZERO;
    }
    let annual = percent_to_rate(annual_rate_percent);
    let periods = Decimal::from(periods_per_year);
    match convention {
        CompoundingConvention::Nominal => annual / periods,
        CompoundingConvention::SemiAnnual => (Decimal::ONE + annual / dec!(2))
            .checked_powd(dec!(2) / periods)
            .map(|growth| growth - Decimal::ONE)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Total number of payments over an amortization period.
pub fn number_of_payments(amortization_years: u32, periods_per_year: u32) -> u32 {
    amortization_years.saturating_mul(periods_per_year)
}

/// Level payment per dollar borrowed: r(1+r)^n / ((1+r)^n - 1).
///
/// Zero rate gives 1/n; zero periods or an overflowing power give 0.
pub fn payment_factor(periodic_rate: Rate, number_of_periods: u32) -> Decimal {
    if number_of_periods == 0 {
        return Decimal::ZERO;
    }
    let periods = Decimal::from(number_of_periods);
    if periodic_rate.is_zero() {
        return Decimal::ONE / periods;
    }
    annuity_factor(periodic_rate, number_of_periods)
        .or_else(|| Decimal::ONE.checked_div(periods))
        .unwrap_or(Decimal::ZERO)
}

fn annuity_factor(periodic_rate: Rate, number_of_periods: u32) -> Option<Decimal> {
    let growth = (Decimal::ONE + periodic_rate).checked_powu(u64::from(number_of_periods))?;
    let denominator = growth.checked_sub(Decimal::ONE)?;
    if denominator.is_zero() {
        // rate too small to move (1+r)^n at 28 digits
        return None;
    }
    periodic_rate.checked_mul(growth)?.checked_div(denominator)
}

/// Level periodic payment that amortizes `principal` over `number_of_periods`.
pub fn level_payment(principal: Money, periodic_rate: Rate, number_of_periods: u32) -> Money {
    if principal <= Decimal::ZERO || number_of_periods == 0 {
        return Decimal::ZERO;
    }
    if periodic_rate.is_zero() {
        return principal / Decimal::from(number_of_periods);
    }
    principal
        .checked_mul(payment_factor(periodic_rate, number_of_periods))
        .unwrap_or(Decimal::ZERO)
}
