//! [`ChatModel`] backed by an OpenAI-compatible `chat/completions` API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tax_core::{ChatModel, CompletionRequest, LlmError};
use tracing::{debug, error};

use crate::config::LlmConfig;

/// Longest provider error body carried into an [`LlmError::Provider`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorReply {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

fn completion_body<'a>(
    model: &'a str,
    request: &'a CompletionRequest,
) -> ChatCompletionBody<'a> {
    ChatCompletionBody {
        model,
        messages: [
            WireMessage {
                role: "system",
                content: &request.system_message,
            },
            WireMessage {
                role: "user",
                content: &request.user_message,
            },
        ],
    }
}

/// First non-blank choice content of a successful reply.
fn reply_text(reply: ChatCompletionReply) -> Result<String, LlmError> {
    reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

/// Prefer the provider's structured error message, fall back to the raw body.
fn provider_error(
    status: u16,
    body: &str,
) -> LlmError {
    let message = match serde_json::from_str::<ProviderErrorReply>(body) {
        Ok(reply) => reply.error.message,
        Err(_) => body.chars().take(MAX_ERROR_BODY).collect(),
    };
    LlmError::Provider { status, message }
}

pub struct OpenAiChatClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiChatClient {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        debug!(
            session_id = %request.session_id,
            model = %self.config.model,
            "sending completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&completion_body(&self.config.model, request))
            .send()
            .await
            .map_err(|e| {
                error!(?e, "completion request failed");
                LlmError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "provider rejected completion request");
            return Err(provider_error(status.as_u16(), &body));
        }

        let reply: ChatCompletionReply = response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("Invalid completion reply: {e}")))?;
        reply_text(reply)
    }
}
