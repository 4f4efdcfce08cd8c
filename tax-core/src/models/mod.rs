mod chat_message;
mod contact;
mod document_upload;
mod regime;
mod service_offering;
mod tax_bracket;
mod tax_profile;

pub use chat_message::{ChatMessage, ChatRole, NewChatMessage};
pub use contact::{ContactSubmission, NewContactSubmission};
pub use document_upload::{
    ALLOWED_DOCUMENT_TYPES, DocumentUpload, NewDocumentUpload, is_allowed_document_type,
};
pub use regime::Regime;
pub use service_offering::ServiceOffering;
pub use tax_bracket::TaxBracket;
pub use tax_profile::{TaxProfile, TaxResult};
