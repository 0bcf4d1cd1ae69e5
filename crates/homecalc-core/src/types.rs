use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values (CAD). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) unless a field name says `percent`.
pub type Rate = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
///
/// No timing is captured: the same inputs always produce the same envelope.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Convert a percentage as typed by the user (5.25) into a fraction (0.0525).
pub fn percent_to_rate(percent: Decimal) -> Rate {
    percent / Decimal::ONE_HUNDRED
}

// ---------------------------------------------------------------------------
// Overflow-safe arithmetic
// ---------------------------------------------------------------------------
//
// Engine results never panic: a sum or product that leaves the 96-bit range
// is reported as zero, like any other undefined figure.

pub fn add_or_zero(a: Money, b: Money) -> Money {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

pub fn sub_or_zero(a: Money, b: Money) -> Money {
    a.checked_sub(b).unwrap_or(Decimal::ZERO)
}

pub fn mul_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

pub fn div_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or(Decimal::ZERO)
}

/// Sum of `values`; zero if any partial sum overflows.
pub fn sum_or_zero<I: IntoIterator<Item = Money>>(values: I) -> Money {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_to_rate() {
        assert_eq!(percent_to_rate(dec!(5.25)), dec!(0.0525));
        assert_eq!(percent_to_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_with_metadata_is_deterministic() {
        let a = with_metadata("m", &serde_json::json!({"x": 1}), vec![], dec!(1.5));
        let b = with_metadata("m", &serde_json::json!({"x": 1}), vec![], dec!(1.5));
        assert_eq!(a, b);
        assert_eq!(a.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_overflow_collapses_to_zero() {
        assert_eq!(add_or_zero(Decimal::MAX, Decimal::ONE), Decimal::ZERO);
        assert_eq!(sub_or_zero(Decimal::MIN, Decimal::ONE), Decimal::ZERO);
        assert_eq!(mul_or_zero(Decimal::MAX, dec!(10)), Decimal::ZERO);
        assert_eq!(div_or_zero(dec!(1), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(sum_or_zero([Decimal::MAX, Decimal::MAX, dec!(-5)]), Decimal::ZERO);
    }

    #[test]
    fn test_in_range_arithmetic_is_exact() {
        assert_eq!(add_or_zero(dec!(1.5), dec!(2.25)), dec!(3.75));
        assert_eq!(sub_or_zero(dec!(1), dec!(3)), dec!(-2));
        assert_eq!(mul_or_zero(dec!(60000), dec!(7.5)), dec!(450000));
        assert_eq!(div_or_zero(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(sum_or_zero([dec!(1), dec!(2), dec!(3)]), dec!(6));
        assert_eq!(sum_or_zero(Vec::<Decimal>::new()), Decimal::ZERO);
    }
}
