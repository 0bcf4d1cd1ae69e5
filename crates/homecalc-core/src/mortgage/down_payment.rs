//! Minimum down payment schedule.
//!
//! 5% of the first $500,000, 10% of the portion from $500,000 up to
//! $1,000,000, and 20% of the whole price at or above $1,000,000.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{div_or_zero, Money, Rate};

pub const TIER_ONE_CEILING: Money = dec!(500000);
pub const INSURABLE_PRICE_CEILING: Money = dec!(1000000);
/// Highest price reachable on the sliding scale with less than 20% down.
pub const MAX_SLIDING_SCALE_PRICE: Money = dec!(999999);

pub const TIER_ONE_RATE: Rate = dec!(0.05);
pub const TIER_TWO_RATE: Rate = dec!(0.10);
pub const CONVENTIONAL_RATE: Rate = dec!(0.20);

/// Down payment needed to max out tier one ($25,000).
pub const TIER_ONE_FULL_DOWN: Money = dec!(25000);
/// 20% of the insurable ceiling ($200,000).
pub const CONVENTIONAL_CEILING_DOWN: Money = dec!(200000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentTier {
    /// Price up to $500,000, 5% down.
    TierOne,
    /// $500,000 to $1,000,000, sliding 5% / 10%.
    TierTwo,
    /// $1,000,000 and above, 20% down.
    Conventional,
}

/// Most expensive home a given down payment can buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownPaymentCeiling {
    pub max_price: Money,
    pub tier: DownPaymentTier,
    /// True when the sliding scale overshot $1,000,000 and was held under it.
    pub capped: bool,
}

/// Smallest down payment allowed for `price`.
pub fn minimum_down_payment(price: Money) -> Money {
    if price <= Decimal::ZERO {
        Decimal::ZERO
    } else if price <= TIER_ONE_CEILING {
        price * TIER_ONE_RATE
    } else if price < INSURABLE_PRICE_CEILING {
        TIER_ONE_FULL_DOWN + (price - TIER_ONE_CEILING) * TIER_TWO_RATE
    } else {
        price * CONVENTIONAL_RATE
    }
}

/// Inverse of [`minimum_down_payment`] for a known down payment.
///
/// The sliding-scale inverse keeps growing past $1,000,000, but a home at or
/// above that price needs 20% down, so with less than $200,000 the ceiling
/// is held at $999,999. A candidate of exactly $1,000,000 is kept.
pub fn max_price_for_down_payment(down_payment: Money) -> DownPaymentCeiling {
    if down_payment <= Decimal::ZERO {
        return DownPaymentCeiling {
            max_price: Decimal::ZERO,
            tier: DownPaymentTier::TierOne,
            capped: false,
        };
    }

    if down_payment < TIER_ONE_FULL_DOWN {
        return DownPaymentCeiling {
            max_price: down_payment / TIER_ONE_RATE,
            tier: DownPaymentTier::TierOne,
            capped: false,
        };
    }

    if down_payment < CONVENTIONAL_CEILING_DOWN {
        let candidate = (down_payment - TIER_ONE_FULL_DOWN) / TIER_TWO_RATE + TIER_ONE_CEILING;
        let capped = candidate > INSURABLE_PRICE_CEILING;
        return DownPaymentCeiling {
            max_price: if capped { MAX_SLIDING_SCALE_PRICE } else { candidate },
            tier: DownPaymentTier::TierTwo,
            capped,
        };
    }

    DownPaymentCeiling {
        max_price: div_or_zero(down_payment, CONVENTIONAL_RATE),
        tier: DownPaymentTier::Conventional,
        capped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_down_payment_tiers() {
        assert_eq!(minimum_down_payment(dec!(400000)), dec!(20000));
        assert_eq!(minimum_down_payment(dec!(500000)), dec!(25000));
        assert_eq!(minimum_down_payment(dec!(750000)), dec!(50000));
        assert_eq!(minimum_down_payment(dec!(1000000)), dec!(200000));
        assert_eq!(minimum_down_payment(dec!(1500000)), dec!(300000));
        assert_eq!(minimum_down_payment(dec!(-1)), Decimal::ZERO);
    }

    #[test]
    fn test_inverse_tier_one_boundary() {
        let c = max_price_for_down_payment(dec!(24999));
        assert_eq!(c.max_price, dec!(499980));
        assert_eq!(c.tier, DownPaymentTier::TierOne);
    }

    #[test]
    fn test_inverse_tier_two_exactly_one_million() {
        let c = max_price_for_down_payment(dec!(75000));
        assert_eq!(c.max_price, dec!(1000000));
        assert!(!c.capped);
    }

    #[test]
    fn test_inverse_tier_two_overshoot_is_capped() {
        let c = max_price_for_down_payment(dec!(150000));
        assert_eq!(c.max_price, dec!(999999));
        assert!(c.capped);
        assert_eq!(c.tier, DownPaymentTier::TierTwo);
    }

    #[test]
    fn test_inverse_conventional() {
        let c = max_price_for_down_payment(dec!(200000));
        assert_eq!(c.max_price, dec!(1000000));
        assert_eq!(c.tier, DownPaymentTier::Conventional);
        assert_eq!(max_price_for_down_payment(dec!(300000)).max_price, dec!(1500000));
    }

    #[test]
    fn test_inverse_round_trips_inside_tier_two() {
        let c = max_price_for_down_payment(dec!(50000));
        assert_eq!(c.max_price, dec!(750000));
        assert_eq!(minimum_down_payment(c.max_price), dec!(50000));
    }

    #[test]
    fn test_inverse_non_positive_down() {
        assert_eq!(max_price_for_down_payment(Decimal::ZERO).max_price, Decimal::ZERO);
        assert_eq!(max_price_for_down_payment(dec!(-10)).max_price, Decimal::ZERO);
    }

    #[test]
    fn test_inverse_overflowing_down_payment() {
        // 5x the largest decimal does not fit
        let c = max_price_for_down_payment(Decimal::MAX);
        assert_eq!(c.max_price, Decimal::ZERO);
        assert_eq!(c.tier, DownPaymentTier::Conventional);
    }
}
