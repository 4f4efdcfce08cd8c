//! Chat assistant support: the system prompt, history windowing and the
//! [`ChatModel`] seam implemented by LLM provider clients.

pub mod context;
pub mod model;

pub use context::{
    CONTEXT_WINDOW, HISTORY_FETCH_LIMIT, TAX_ASSISTANT_SYSTEM_MESSAGE, build_prompt,
    context_window,
};
pub use model::{ChatModel, CompletionRequest, LlmError};
