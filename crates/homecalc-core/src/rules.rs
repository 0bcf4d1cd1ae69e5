//! Regulatory parameters shared by the engines.
//!
//! The ceilings in [`QualificationLimits`] can be overridden per call through
//! the affordability input; the remaining constants are fixed Ontario rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{add_or_zero, Rate};

/// Amortization periods offered by Canadian lenders, in years.
pub const STANDARD_AMORTIZATION_YEARS: [u32; 5] = [10, 15, 20, 25, 30];

/// Debt-service ceilings and the mortgage stress-test parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationLimits {
    /// Gross Debt Service ceiling as a fraction of monthly income.
    pub gds_limit: Rate,
    /// Total Debt Service ceiling as a fraction of monthly income.
    pub tds_limit: Rate,
    /// Percentage points added to the contract rate (2.00 = +2%).
    pub stress_buffer_percent: Decimal,
    /// Minimum qualifying rate in percent.
    pub stress_floor_percent: Decimal,
}

impl Default for QualificationLimits {
    fn default() -> Self {
        Self {
            gds_limit: dec!(0.39),
            tds_limit: dec!(0.44),
            stress_buffer_percent: dec!(2),
            stress_floor_percent: dec!(5.25),
        }
    }
}

impl QualificationLimits {
    /// Qualifying (stress-test) rate in percent for a contract rate in percent.
    pub fn qualifying_rate_percent(&self, contract_rate_percent: Decimal) -> Decimal {
        add_or_zero(contract_rate_percent, self.stress_buffer_percent)
            .max(self.stress_floor_percent)
    }
}

/// Condo fees count at half their value towards housing costs.
pub const CONDO_FEE_WEIGHT: Decimal = dec!(0.5);

pub fn is_standard_amortization(years: u32) -> bool {
    STANDARD_AMORTIZATION_YEARS.contains(&years)
}
