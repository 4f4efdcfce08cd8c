use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("Language model is not configured")]
    NotConfigured,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// A single-turn request to the assistant model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Correlates calls belonging to one conversation.
    pub session_id: String,
    pub system_message: String,
    pub user_message: String,
}

/// One implementation per LLM provider.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Short identifier used in logs, e.g. the configured model name.
    fn name(&self) -> &str;

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, LlmError>;
}
