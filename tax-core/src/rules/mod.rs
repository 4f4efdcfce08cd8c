//! Regime rule tables consumed by the income tax calculator.
//!
//! Slab schedules, deduction limits and rebate thresholds change every
//! financial year, so they live here as data rather than in the calculator.
//! The built-in table is [`TaxRules::fy_2024_25`]; deployments may load a
//! different year's table (the types are serde-deserializable) and must run
//! [`TaxRules::validate`] on it before use.

pub mod fy_2024_25;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Regime, TaxBracket};

/// Problems found in a rule table by [`TaxRules::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("{regime} regime has no tax brackets")]
    EmptySchedule { regime: Regime },

    #[error("{regime} regime: first bracket starts at {found}, expected 0")]
    FirstBracketNotAtZero { regime: Regime, found: Decimal },

    #[error("{regime} regime: bracket {index} starts at {found}, expected {expected}")]
    Discontinuous {
        regime: Regime,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{regime} regime: bracket {index} is open-ended but not last")]
    OpenEndedNotLast { regime: Regime, index: usize },

    #[error("{regime} regime: last bracket must be open-ended")]
    LastBracketClosed { regime: Regime },

    #[error("{regime} regime: bracket {index} has an empty or inverted range")]
    EmptyRange { regime: Regime, index: usize },

    #[error("{regime} regime: bracket {index} base tax is {found}, expected {expected}")]
    InconsistentBaseTax {
        regime: Regime,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{regime} regime: {parameter} must not be negative")]
    NegativeParameter {
        regime: Regime,
        parameter: &'static str,
    },
}

/// How a regime arrives at total deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeductionPolicy {
    /// Sum of the profile's itemized deductions, with 80C and 80D capped.
    Itemized {
        section_80c_cap: Decimal,
        section_80d_cap: Decimal,
    },
    /// A flat amount; itemized inputs are ignored.
    Standard { amount: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub deductions: DeductionPolicy,

    /// Taxable income at or below which the slab tax is waived entirely.
    #[serde(default)]
    pub rebate_threshold: Option<Decimal>,

    pub cess_rate: Decimal,

    /// Sorted by `min_income`, contiguous, last one open-ended.
    pub brackets: Vec<TaxBracket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    pub fiscal_year: String,
    pub old: RegimeRules,
    pub new: RegimeRules,
}

impl TaxRules {
    pub fn fy_2024_25() -> Self {
        fy_2024_25::rules()
    }

    pub fn for_regime(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    /// Checks both regimes' tables for structural consistency.
    pub fn validate(&self) -> Result<(), RulesError> {
        self.old.validate(Regime::Old)?;
        self.new.validate(Regime::New)
    }
}

impl RegimeRules {
    pub fn validate(
        &self,
        regime: Regime,
    ) -> Result<(), RulesError> {
        self.validate_parameters(regime)?;

        let first = self
            .brackets
            .first()
            .ok_or(RulesError::EmptySchedule { regime })?;
        if first.min_income != Decimal::ZERO {
            return Err(RulesError::FirstBracketNotAtZero {
                regime,
                found: first.min_income,
            });
        }

        let last_index = self.brackets.len() - 1;
        let mut expected_base_tax = Decimal::ZERO;
        let mut expected_min = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO {
                return Err(RulesError::NegativeParameter {
                    regime,
                    parameter: "tax_rate",
                });
            }
            if bracket.min_income != expected_min {
                return Err(RulesError::Discontinuous {
                    regime,
                    index,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            if bracket.base_tax != expected_base_tax {
                return Err(RulesError::InconsistentBaseTax {
                    regime,
                    index,
                    expected: expected_base_tax,
                    found: bracket.base_tax,
                });
            }

            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(RulesError::EmptyRange { regime, index });
                }
                Some(max) => {
                    if index == last_index {
                        return Err(RulesError::LastBracketClosed { regime });
                    }
                    expected_base_tax = bracket.tax_on(max);
                    expected_min = max;
                }
                None if index != last_index => {
                    return Err(RulesError::OpenEndedNotLast { regime, index });
                }
                None => {}
            }
        }

        Ok(())
    }

    fn validate_parameters(
        &self,
        regime: Regime,
    ) -> Result<(), RulesError> {
        let negative = |parameter| RulesError::NegativeParameter { regime, parameter };

        if self.cess_rate < Decimal::ZERO {
            return Err(negative("cess_rate"));
        }
        if self.rebate_threshold.is_some_and(|t| t < Decimal::ZERO) {
            return Err(negative("rebate_threshold"));
        }
        match &self.deductions {
            DeductionPolicy::Itemized {
                section_80c_cap,
                section_80d_cap,
            } => {
                if *section_80c_cap < Decimal::ZERO {
                    return Err(negative("section_80c_cap"));
                }
                if *section_80d_cap < Decimal::ZERO {
                    return Err(negative("section_80d_cap"));
                }
            }
            DeductionPolicy::Standard { amount } => {
                if *amount < Decimal::ZERO {
                    return Err(negative("standard deduction"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn built_in_rules_are_valid() {
        assert_eq!(TaxRules::fy_2024_25().validate(), Ok(()));
    }

    #[test]
    fn for_regime_selects_matching_table() {
        let rules = TaxRules::fy_2024_25();

        assert_eq!(rules.for_regime(Regime::Old).brackets.len(), 4);
        assert_eq!(rules.for_regime(Regime::New).brackets.len(), 6);
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let mut rules = TaxRules::fy_2024_25();
        rules.old.brackets.clear();

        assert_eq!(
            rules.validate(),
            Err(RulesError::EmptySchedule {
                regime: Regime::Old
            })
        );
    }

    #[test]
    fn first_bracket_must_start_at_zero() {
        let mut rules = TaxRules::fy_2024_25();
        rules.new.brackets[0].min_income = dec!(1000);

        assert_eq!(
            rules.validate(),
            Err(RulesError::FirstBracketNotAtZero {
                regime: Regime::New,
                found: dec!(1000),
            })
        );
    }

    #[test]
    fn gap_between_brackets_is_rejected() {
        let mut rules = TaxRules::fy_2024_25();
        rules.old.brackets[2].min_income = dec!(600000);

        assert_eq!(
            rules.validate(),
            Err(RulesError::Discontinuous {
                regime: Regime::Old,
                index: 2,
                expected: dec!(500000),
                found: dec!(600000),
            })
        );
    }

    #[test]
    fn base_tax_must_match_lower_brackets() {
        let mut rules = TaxRules::fy_2024_25();
        rules.new.brackets[3].base_tax = dec!(45000);

        assert_eq!(
            rules.validate(),
            Err(RulesError::InconsistentBaseTax {
                regime: Regime::New,
                index: 3,
                expected: dec!(50000),
                found: dec!(45000),
            })
        );
    }

    #[test]
    fn last_bracket_must_be_open_ended() {
        let mut rules = TaxRules::fy_2024_25();
        rules.old.brackets[3].max_income = Some(dec!(5000000));

        assert_eq!(
            rules.validate(),
            Err(RulesError::LastBracketClosed {
                regime: Regime::Old
            })
        );
    }

    #[test]
    fn open_ended_bracket_must_be_last() {
        let mut rules = TaxRules::fy_2024_25();
        rules.old.brackets[1].max_income = None;

        assert_eq!(
            rules.validate(),
            Err(RulesError::OpenEndedNotLast {
                regime: Regime::Old,
                index: 1,
            })
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut rules = TaxRules::fy_2024_25();
        rules.new.brackets[0].max_income = Some(dec!(0));

        assert_eq!(
            rules.validate(),
            Err(RulesError::EmptyRange {
                regime: Regime::New,
                index: 0,
            })
        );
    }

    #[test]
    fn negative_cess_rate_is_rejected() {
        let mut rules = TaxRules::fy_2024_25();
        rules.new.cess_rate = dec!(-0.04);

        assert_eq!(
            rules.validate(),
            Err(RulesError::NegativeParameter {
                regime: Regime::New,
                parameter: "cess_rate",
            })
        );
    }

    #[test]
    fn rules_deserialize_from_toml() {
        let source = r#"
            fiscal_year = "test"

            [old]
            cess_rate = 0.04
            deductions = { kind = "itemized", section_80c_cap = 150000, section_80d_cap = 75000 }

            [[old.brackets]]
            min_income = 0
            max_income = 250000
            tax_rate = 0
            base_tax = 0

            [[old.brackets]]
            min_income = 250000
            tax_rate = 0.1
            base_tax = 0

            [new]
            cess_rate = 0.04
            rebate_threshold = 700000
            deductions = { kind = "standard", amount = 75000 }

            [[new.brackets]]
            min_income = 0
            tax_rate = 0.05
            base_tax = 0
        "#;

        let rules: TaxRules = toml::from_str(source).expect("rules should parse");

        assert_eq!(rules.fiscal_year, "test");
        assert_eq!(rules.old.rebate_threshold, None);
        assert_eq!(rules.new.rebate_threshold, Some(dec!(700000)));
        assert_eq!(
            rules.new.deductions,
            DeductionPolicy::Standard {
                amount: dec!(75000)
            }
        );
        assert_eq!(rules.old.brackets[1].tax_rate, dec!(0.1));
        assert_eq!(rules.validate(), Ok(()));
    }
}
