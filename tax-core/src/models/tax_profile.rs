use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;

/// Income and deduction figures for a single tax computation.
///
/// All amounts are expected to be non-negative; the calculator clamps
/// negative values to zero rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxProfile {
    pub gross_income: Decimal,

    // Itemized deductions, honoured by the old regime only
    pub deduction_80c: Decimal,
    pub deduction_80d: Decimal,
    pub hra_exemption: Decimal,
    pub other_deductions: Decimal,

    pub regime: Regime,
}

impl TaxProfile {
    /// Profile with only a gross income and no itemized deductions.
    pub fn with_income(
        gross_income: Decimal,
        regime: Regime,
    ) -> Self {
        Self {
            gross_income,
            regime,
            ..Self::default()
        }
    }
}

/// Breakdown produced by the income tax calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,

    /// Slab tax after any rebate, before cess.
    pub base_tax: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,

    /// `total_tax / gross_income * 100`, rounded to two places.
    pub effective_rate_percent: Decimal,

    pub regime: Regime,
}
