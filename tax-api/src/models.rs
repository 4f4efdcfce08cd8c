//! Request and response bodies for the advisory API

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{ChatMessage, NewContactSubmission, Regime, ServiceOffering, TaxProfile, TaxResult};

use crate::error::ApiError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex should not panic")
});

fn require_non_blank(
    field: &str,
    value: &str,
) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

// ============================================================
// Root
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================
// Chat
// ============================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_blank("session_id", &self.session_id)?;
        require_non_blank("message", &self.message)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

// ============================================================
// Contact
// ============================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactRequest {
    /// Checks the submission and trims surrounding whitespace.
    pub fn into_submission(self) -> Result<NewContactSubmission, ApiError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("phone", &self.phone)?;
        require_non_blank("service", &self.service)?;
        require_non_blank("message", &self.message)?;

        let email = self.email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            return Err(ApiError::InvalidRequest(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        Ok(NewContactSubmission {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            service: self.service.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
    pub id: String,
}

// ============================================================
// Tax calculation
// ============================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TaxCalculationRequest {
    pub income: Decimal,
    #[serde(default)]
    pub deductions_80c: Decimal,
    #[serde(default)]
    pub deductions_80d: Decimal,
    #[serde(default)]
    pub hra_exemption: Decimal,
    #[serde(default)]
    pub other_deductions: Decimal,
    #[serde(default)]
    pub regime: Option<String>,
}

impl TaxCalculationRequest {
    /// Converts the request into an engine profile.
    ///
    /// A missing regime means the new regime; anything other than
    /// `old`/`new` (any case) is rejected, as are negative amounts.
    pub fn into_profile(self) -> Result<TaxProfile, ApiError> {
        let regime = match self.regime.as_deref() {
            None => Regime::default(),
            Some(raw) => Regime::parse(raw).ok_or_else(|| {
                ApiError::InvalidRequest(format!(
                    "regime must be 'old' or 'new', got '{}'",
                    raw
                ))
            })?,
        };

        for (field, value) in [
            ("income", self.income),
            ("deductions_80c", self.deductions_80c),
            ("deductions_80d", self.deductions_80d),
            ("hra_exemption", self.hra_exemption),
            ("other_deductions", self.other_deductions),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ApiError::InvalidRequest(format!(
                    "{} must not be negative",
                    field
                )));
            }
        }

        Ok(TaxProfile {
            gross_income: self.income,
            deduction_80c: self.deductions_80c,
            deduction_80d: self.deductions_80d,
            hra_exemption: self.hra_exemption,
            other_deductions: self.other_deductions,
            regime,
        })
    }
}

/// Tax breakdown as JSON numbers.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaxCalculationResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cess: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub effective_rate: Decimal,
    pub regime: Regime,
}

impl From<TaxResult> for TaxCalculationResponse {
    fn from(result: TaxResult) -> Self {
        Self {
            gross_income: result.gross_income,
            total_deductions: result.total_deductions,
            taxable_income: result.taxable_income,
            tax_amount: result.base_tax,
            cess: result.cess,
            total_tax: result.total_tax,
            effective_rate: result.effective_rate_percent,
            regime: result.regime,
        }
    }
}

// ============================================================
// Documents
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub document_id: String,
    pub filename: String,
}

// ============================================================
// Services
// ============================================================

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub services: &'static [ServiceOffering],
}
