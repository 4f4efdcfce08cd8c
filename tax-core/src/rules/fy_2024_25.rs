//! Slab tables and deduction limits for financial year 2024-25.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::TaxBracket;

use super::{DeductionPolicy, RegimeRules, TaxRules};

pub const FISCAL_YEAR: &str = "2024-25";

/// Health and education cess, levied on the slab tax under both regimes.
pub const CESS_RATE: Decimal = dec!(0.04);

pub const SECTION_80C_CAP: Decimal = dec!(150000);
pub const SECTION_80D_CAP: Decimal = dec!(75000);
pub const NEW_REGIME_STANDARD_DEDUCTION: Decimal = dec!(75000);

/// Section 87A: no tax under the new regime up to this taxable income.
pub const NEW_REGIME_REBATE_THRESHOLD: Decimal = dec!(700000);

pub const OLD_REGIME_BRACKETS: [TaxBracket; 4] = [
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(250000)),
        tax_rate: dec!(0),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(250000),
        max_income: Some(dec!(500000)),
        tax_rate: dec!(0.05),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(500000),
        max_income: Some(dec!(1000000)),
        tax_rate: dec!(0.20),
        base_tax: dec!(12500),
    },
    TaxBracket {
        min_income: dec!(1000000),
        max_income: None,
        tax_rate: dec!(0.30),
        base_tax: dec!(112500),
    },
];

pub const NEW_REGIME_BRACKETS: [TaxBracket; 6] = [
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(300000)),
        tax_rate: dec!(0),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(300000),
        max_income: Some(dec!(700000)),
        tax_rate: dec!(0.05),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(700000),
        max_income: Some(dec!(1000000)),
        tax_rate: dec!(0.10),
        base_tax: dec!(20000),
    },
    TaxBracket {
        min_income: dec!(1000000),
        max_income: Some(dec!(1200000)),
        tax_rate: dec!(0.15),
        base_tax: dec!(50000),
    },
    TaxBracket {
        min_income: dec!(1200000),
        max_income: Some(dec!(1500000)),
        tax_rate: dec!(0.20),
        base_tax: dec!(80000),
    },
    TaxBracket {
        min_income: dec!(1500000),
        max_income: None,
        tax_rate: dec!(0.30),
        base_tax: dec!(140000),
    },
];

pub fn rules() -> TaxRules {
    TaxRules {
        fiscal_year: FISCAL_YEAR.to_string(),
        old: RegimeRules {
            deductions: DeductionPolicy::Itemized {
                section_80c_cap: SECTION_80C_CAP,
                section_80d_cap: SECTION_80D_CAP,
            },
            rebate_threshold: None,
            cess_rate: CESS_RATE,
            brackets: OLD_REGIME_BRACKETS.to_vec(),
        },
        new: RegimeRules {
            deductions: DeductionPolicy::Standard {
                amount: NEW_REGIME_STANDARD_DEDUCTION,
            },
            rebate_threshold: Some(NEW_REGIME_REBATE_THRESHOLD),
            cess_rate: CESS_RATE,
            brackets: NEW_REGIME_BRACKETS.to_vec(),
        },
    }
}
