use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One income slab of a regime's rate schedule, covering
/// `(min_income, max_income]`. `base_tax` is the tax owed on everything
/// below `min_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Returns true when `income` falls inside this slab.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income > self.min_income && self.max_income.is_none_or(|max| income <= max)
    }

    /// Tax on `income`, assuming it falls inside this slab.
    pub fn tax_on(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.base_tax
            .saturating_add(income.saturating_sub(self.min_income).saturating_mul(self.tax_rate))
    }
}
