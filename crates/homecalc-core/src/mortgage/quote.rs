use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::mortgage::cmhc::cmhc_premium;
use crate::mortgage::down_payment::minimum_down_payment;
use crate::mortgage::land_transfer_tax::{calculate_land_transfer_tax, LttJurisdiction};
use crate::rules::is_standard_amortization;
use crate::time_value::{
    level_payment, number_of_payments, periodic_rate, CompoundingConvention, PaymentFrequency,
};
use crate::types::{
    add_or_zero, mul_or_zero, sub_or_zero, with_metadata, ComputationOutput, Money, Rate,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of a purchase and its mortgage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub price: Money,
    pub down_payment: Money,
    /// Contract rate in percent (5.0 = 5%).
    pub annual_rate_percent: Decimal,
    pub amortization_years: u32,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    #[serde(default)]
    pub compounding: CompoundingConvention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageQuoteInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(default)]
    pub jurisdiction: LttJurisdiction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageQuote {
    /// Price less down payment, before insurance.
    pub mortgage_amount: Money,
    pub down_payment_ratio: Rate,
    pub premium_rate: Rate,
    pub cmhc_premium: Money,
    /// Mortgage amount plus the financed premium.
    pub total_mortgage: Money,
    pub payment_frequency: PaymentFrequency,
    pub periods_per_year: u32,
    pub number_of_payments: u32,
    pub periodic_payment: Money,
    /// Interest paid over the full amortization.
    pub total_interest: Money,
    pub provincial_ltt: Money,
    pub municipal_ltt: Money,
    pub total_ltt: Money,
    /// Down payment plus land transfer tax.
    pub cash_required: Money,
    pub minimum_down_payment: Money,
    pub meets_minimum_down_payment: bool,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Payment, insurance and closing cash for a known price and down payment.
pub fn quote_mortgage(input: &MortgageQuoteInput) -> ComputationOutput<MortgageQuote> {
    let terms = &input.terms;
    let mut warnings: Vec<String> = Vec::new();

    if terms.price <= Decimal::ZERO {
        warnings.push("Purchase price is not positive; results are zero-filled".into());
    }
    if terms.down_payment > terms.price {
        warnings.push("Down payment exceeds the purchase price".into());
    }
    if !is_standard_amortization(terms.amortization_years) {
        warnings.push(format!(
            "Amortization of {} years is outside the standard 10/15/20/25/30 options",
            terms.amortization_years
        ));
    }

    // --- Mortgage default insurance ---
    let insurance = cmhc_premium(terms.price, terms.down_payment);
    if insurance.below_minimum && terms.price > Decimal::ZERO {
        warnings.push(
            "Down payment is under 5% of the price; the 4.00% premium rate was applied".into(),
        );
    }
    let total_mortgage = add_or_zero(insurance.mortgage_amount, insurance.premium);

    // --- Level payment at the contract rate ---
    let periods_per_year = terms.payment_frequency.periods_per_year();
    let n = number_of_payments(terms.amortization_years, periods_per_year);
    let r = periodic_rate(terms.annual_rate_percent, periods_per_year, terms.compounding);
    let periodic_payment = level_payment(total_mortgage, r, n);
    let total_interest = sub_or_zero(
        mul_or_zero(periodic_payment, Decimal::from(n)),
        total_mortgage,
    )
    .max(Decimal::ZERO);

    if terms.payment_frequency == PaymentFrequency::AcceleratedBiWeekly {
        warnings.push(
            "Accelerated bi-weekly is priced with the regular bi-weekly formula; \
             lenders usually charge half the monthly payment every two weeks"
                .into(),
        );
    }

    // --- Closing costs ---
    let ltt = calculate_land_transfer_tax(terms.price, input.jurisdiction);
    let cash_required = add_or_zero(terms.down_payment, ltt.total);

    let minimum = minimum_down_payment(terms.price);
    let meets_minimum_down_payment = terms.down_payment >= minimum;
    if !meets_minimum_down_payment {
        warnings.push(format!(
            "Down payment of {} is below the required minimum of {} for this price",
            terms.down_payment.round_dp(2),
            minimum.round_dp(2)
        ));
    }

    log::debug!(
        "quote: total_mortgage={total_mortgage} rate={r} periods={n} payment={periodic_payment}"
    );

    let output = MortgageQuote {
        mortgage_amount: insurance.mortgage_amount,
        down_payment_ratio: insurance.down_payment_ratio,
        premium_rate: insurance.premium_rate,
        cmhc_premium: insurance.premium,
        total_mortgage,
        payment_frequency: terms.payment_frequency,
        periods_per_year,
        number_of_payments: n,
        periodic_payment,
        total_interest,
        provincial_ltt: ltt.provincial,
        municipal_ltt: ltt.municipal,
        total_ltt: ltt.total,
        cash_required,
        minimum_down_payment: minimum,
        meets_minimum_down_payment,
    };

    with_metadata(
        "Mortgage quote: CMHC premium on the mortgage amount, level annuity \
         payment at the contract rate, Ontario (and Toronto) land transfer tax",
        &serde_json::json!({
            "price": terms.price.to_string(),
            "down_payment": terms.down_payment.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "amortization_years": terms.amortization_years,
            "payment_frequency": terms.payment_frequency,
            "compounding": terms.compounding,
            "jurisdiction": input.jurisdiction,
        }),
        warnings,
        output,
    )
}
