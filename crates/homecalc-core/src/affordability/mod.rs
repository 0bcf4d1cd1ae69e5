pub mod solver;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{add_or_zero, percent_to_rate, Money};

const MONTHS_PER_YEAR: u32 = 12;

/// Household income and recurring costs used for debt-service ratios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDebtProfile {
    pub annual_income_primary: Money,
    /// Ignored unless `is_joint` is set.
    #[serde(default)]
    pub annual_income_secondary: Money,
    #[serde(default)]
    pub is_joint: bool,
    #[serde(default)]
    pub monthly_other_debts: Money,
    #[serde(default)]
    pub monthly_heating: Money,
    #[serde(default)]
    pub monthly_condo_fees: Money,
    /// Annual property tax as a percent of the price (1.0 = 1%).
    #[serde(default)]
    pub property_tax_rate_percent: Decimal,
}

impl IncomeDebtProfile {
    pub fn annual_income(&self) -> Money {
        if self.is_joint {
            add_or_zero(self.annual_income_primary, self.annual_income_secondary)
        } else {
            self.annual_income_primary
        }
    }

    pub fn monthly_income(&self) -> Money {
        self.annual_income() / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Property tax per month as a fraction of the price.
    pub fn monthly_property_tax_rate(&self) -> Decimal {
        percent_to_rate(self.property_tax_rate_percent) / Decimal::from(MONTHS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_secondary_income_only_counts_when_joint() {
        let mut p = IncomeDebtProfile {
            annual_income_primary: dec!(80000),
            annual_income_secondary: dec!(40000),
            is_joint: false,
            monthly_other_debts: Decimal::ZERO,
            monthly_heating: Decimal::ZERO,
            monthly_condo_fees: Decimal::ZERO,
            property_tax_rate_percent: dec!(1.2),
        };
        assert_eq!(p.annual_income(), dec!(80000));
        p.is_joint = true;
        assert_eq!(p.monthly_income(), dec!(10000));
        assert_eq!(p.monthly_property_tax_rate(), dec!(0.001));
    }
}
