use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata recorded for a document uploaded for review.
/// The file contents themselves are not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: String,
    pub filename: String,
    pub file_type: String,
    pub purpose: String,
    pub user_email: String,
    pub size_bytes: i64,
    pub timestamp: DateTime<Utc>,
}

/// For recording new uploads (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocumentUpload {
    pub filename: String,
    pub file_type: String,
    pub purpose: String,
    pub user_email: String,
    pub size_bytes: i64,
}

/// MIME types accepted for document uploads: PDF, JPEG, PNG and Excel.
pub const ALLOWED_DOCUMENT_TYPES: [&str; 5] = [
    "application/pdf",
    "image/jpeg",
    "image/png",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub fn is_allowed_document_type(content_type: &str) -> bool {
    ALLOWED_DOCUMENT_TYPES.contains(&content_type)
}
