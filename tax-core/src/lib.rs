pub mod calculations;
pub mod chat;
pub mod db;
pub mod models;
pub mod rules;

pub use calculations::{IncomeTaxCalculator, compute_tax};
pub use chat::{ChatModel, CompletionRequest, LlmError};
pub use db::repository::{AdvisoryRepository, RepositoryError};
pub use models::*;
pub use rules::{DeductionPolicy, RegimeRules, RulesError, TaxRules};
