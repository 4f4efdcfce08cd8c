//! Income tax computation for the old and new regimes.
//!
//! The calculation runs in a fixed order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total deductions (capped itemized claims, or the flat standard deduction) |
//! | 2    | Taxable income (gross income - deductions, minimum 0) |
//! | 3    | Slab tax from the regime's bracket table |
//! | 4    | Rebate: slab tax waived at or below the regime's rebate threshold |
//! | 5    | Cess on the (possibly rebated) slab tax |
//! | 6    | Total tax (slab tax + cess) |
//! | 7    | Effective rate (total tax / gross income, percent, 2 places) |
//!
//! Monetary amounts are carried exactly; only the effective rate is rounded.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::compute_tax;
//! use tax_core::{Regime, TaxProfile};
//!
//! let profile = TaxProfile {
//!     gross_income: dec!(1200000),
//!     deduction_80c: dec!(200000),
//!     deduction_80d: dec!(30000),
//!     hra_exemption: dec!(50000),
//!     other_deductions: dec!(0),
//!     regime: Regime::Old,
//! };
//!
//! let result = compute_tax(&profile);
//!
//! assert_eq!(result.total_deductions, dec!(230000));
//! assert_eq!(result.base_tax, dec!(106500));
//! assert_eq!(result.total_tax, dec!(110760));
//! assert_eq!(result.effective_rate_percent, dec!(9.23));
//! ```

use std::sync::LazyLock;

use rust_decimal::Decimal;

use crate::calculations::common::{capped, non_negative, percentage_of};
use crate::rules::{DeductionPolicy, RegimeRules, TaxRules};
use crate::{TaxProfile, TaxResult};

static FY_2024_25: LazyLock<TaxRules> = LazyLock::new(TaxRules::fy_2024_25);

/// Computes the tax breakdown for `profile` under the built-in FY 2024-25
/// rules.
pub fn compute_tax(profile: &TaxProfile) -> TaxResult {
    IncomeTaxCalculator::new(&FY_2024_25).calculate(profile)
}

/// Calculator bound to a validated rule table.
///
/// The table is expected to have passed [`TaxRules::validate`]; the
/// calculator itself never fails.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    rules: &'a TaxRules,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Runs every step of the computation for the profile's regime.
    pub fn calculate(
        &self,
        profile: &TaxProfile,
    ) -> TaxResult {
        let rules = self.rules.for_regime(profile.regime);
        let gross_income = non_negative(profile.gross_income);

        let total_deductions = self.total_deductions(rules, profile);
        let taxable_income = self.taxable_income(gross_income, total_deductions);

        let slab_tax = self.slab_tax(rules, taxable_income);
        let base_tax = self.apply_rebate(rules, taxable_income, slab_tax);

        let cess = self.cess(rules, base_tax);
        let total_tax = base_tax.saturating_add(cess);

        TaxResult {
            gross_income,
            total_deductions,
            taxable_income,
            base_tax,
            cess,
            total_tax,
            effective_rate_percent: percentage_of(total_tax, gross_income),
            regime: profile.regime,
        }
    }

    fn total_deductions(
        &self,
        rules: &RegimeRules,
        profile: &TaxProfile,
    ) -> Decimal {
        match &rules.deductions {
            DeductionPolicy::Itemized {
                section_80c_cap,
                section_80d_cap,
            } => {
                capped(profile.deduction_80c, *section_80c_cap)
                    .saturating_add(capped(profile.deduction_80d, *section_80d_cap))
                    .saturating_add(non_negative(profile.hra_exemption))
                    .saturating_add(non_negative(profile.other_deductions))
            }
            DeductionPolicy::Standard { amount } => *amount,
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        non_negative(gross_income.saturating_sub(total_deductions))
    }

    /// Tax from the slab table. Income at or below zero, or below the first
    /// slab, owes nothing.
    fn slab_tax(
        &self,
        rules: &RegimeRules,
        taxable_income: Decimal,
    ) -> Decimal {
        rules
            .brackets
            .iter()
            .find(|b| b.contains(taxable_income))
            .map(|b| b.tax_on(taxable_income))
            .unwrap_or(Decimal::ZERO)
    }

    fn apply_rebate(
        &self,
        rules: &RegimeRules,
        taxable_income: Decimal,
        slab_tax: Decimal,
    ) -> Decimal {
        match rules.rebate_threshold {
            Some(threshold) if taxable_income <= threshold => Decimal::ZERO,
            _ => slab_tax,
        }
    }

    fn cess(
        &self,
        rules: &RegimeRules,
        base_tax: Decimal,
    ) -> Decimal {
        base_tax.saturating_mul(rules.cess_rate)
    }
}
