//! Income tax calculation for the old and new personal tax regimes.
//!
//! The calculator is pure: it reads a [`RegimeRules`](crate::rules::RegimeRules)
//! table and a [`TaxProfile`](crate::TaxProfile) and produces a
//! [`TaxResult`](crate::TaxResult) with no I/O and no shared state.

pub mod common;
pub mod income_tax;

pub use income_tax::{IncomeTaxCalculator, compute_tax};
