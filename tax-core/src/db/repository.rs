use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ChatMessage, ContactSubmission, DocumentUpload, NewChatMessage, NewContactSubmission,
    NewDocumentUpload,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for chat history, contact requests and upload metadata.
///
/// Implementations assign ids (UUID v4) and UTC timestamps on insert.
#[async_trait]
pub trait AdvisoryRepository: Send + Sync {
    // Chat history
    /// Stores a question and its answer together: either both messages are
    /// kept or neither is. The answer sorts after the question.
    async fn append_chat_exchange(
        &self,
        question: NewChatMessage,
        answer: NewChatMessage,
    ) -> Result<(ChatMessage, ChatMessage), RepositoryError>;

    /// The `limit` most recent messages of a session, oldest first.
    async fn recent_chat_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// The first `limit` messages of a session, oldest first.
    async fn list_chat_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// Deletes every message of a session, returning how many were removed.
    async fn clear_chat_history(&self, session_id: &str) -> Result<u64, RepositoryError>;

    // Contact requests
    async fn create_contact(
        &self,
        contact: NewContactSubmission,
    ) -> Result<ContactSubmission, RepositoryError>;

    /// Every stored contact request, oldest first. Read back by operators;
    /// no public route exposes it.
    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, RepositoryError>;

    // Document uploads
    async fn create_document(
        &self,
        document: NewDocumentUpload,
    ) -> Result<DocumentUpload, RepositoryError>;

    /// Upload metadata by id. Like [`list_contacts`](Self::list_contacts),
    /// this is a back-office read with no public route.
    async fn get_document(&self, id: &str) -> Result<DocumentUpload, RepositoryError>;
}
