//! HTTP handlers for the advisory API

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use tax_core::chat::{HISTORY_FETCH_LIMIT, TAX_ASSISTANT_SYSTEM_MESSAGE, build_prompt};
use tax_core::{
    CompletionRequest, IncomeTaxCalculator, NewChatMessage, NewDocumentUpload, ServiceOffering,
    is_allowed_document_type,
};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Most messages returned by the history endpoint.
pub const HISTORY_PAGE_LIMIT: i64 = 100;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("MyCA API - Tax Assistant Service"))
}

/// Ask the tax assistant a question in the context of the session's
/// recent conversation.
///
/// Both sides of the exchange are stored only once the model has replied.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    req.validate()?;

    let history = state
        .repository
        .recent_chat_messages(&req.session_id, HISTORY_FETCH_LIMIT)
        .await?;

    let completion = CompletionRequest {
        session_id: req.session_id.clone(),
        system_message: TAX_ASSISTANT_SYSTEM_MESSAGE.to_string(),
        user_message: build_prompt(&history, &req.message),
    };
    let reply = state.assistant.complete(&completion).await?;

    state
        .repository
        .append_chat_exchange(
            NewChatMessage::user(&req.session_id, &req.message),
            NewChatMessage::assistant(&req.session_id, &reply),
        )
        .await?;

    tracing::info!(
        session_id = %req.session_id,
        model = state.assistant.name(),
        history = history.len(),
        "Answered chat message"
    );

    Ok(Json(ChatResponse {
        response: reply,
        session_id: req.session_id,
    }))
}

/// Get chat history for a session, oldest first
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    let messages = state
        .repository
        .list_chat_messages(&session_id, HISTORY_PAGE_LIMIT)
        .await?;

    Ok(Json(ChatHistoryResponse { messages }))
}

pub async fn clear_chat_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.repository.clear_chat_history(&session_id).await?;
    tracing::info!(%session_id, removed, "Cleared chat history");

    Ok(Json(MessageResponse::new("Chat history cleared")))
}

/// Submit a contact/consultation request
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let submission = req.into_submission()?;
    let contact = state.repository.create_contact(submission).await?;

    tracing::info!(id = %contact.id, service = %contact.service, "Stored contact request");

    Ok(Json(ContactResponse {
        message: "Thank you! We'll contact you within 24 hours.".to_string(),
        id: contact.id,
    }))
}

pub async fn calculate_tax(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TaxCalculationRequest>,
) -> Result<Json<TaxCalculationResponse>, ApiError> {
    let profile = req.into_profile()?;
    let result = IncomeTaxCalculator::new(&state.tax_rules).calculate(&profile);

    tracing::debug!(
        regime = %result.regime,
        taxable_income = %result.taxable_income,
        total_tax = %result.total_tax,
        "Calculated income tax"
    );

    Ok(Json(result.into()))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::InvalidRequest(err.body_text())
    }
}

/// Accept a document for CA review.
///
/// Only metadata is kept; the file content is read to measure it and then
/// discarded.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, String, usize)> = None;
    let mut purpose = None;
    let mut user_email = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_type = field.content_type().unwrap_or_default().to_string();
                if !is_allowed_document_type(&file_type) {
                    return Err(ApiError::UnsupportedFileType(file_type));
                }
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.trim().is_empty())
                    .ok_or_else(|| ApiError::InvalidRequest("file must have a name".to_string()))?;

                let mut size = 0usize;
                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    size += chunk.len();
                    if size > state.max_upload_bytes {
                        return Err(ApiError::PayloadTooLarge);
                    }
                }
                file = Some((filename, file_type, size));
            }
            Some("purpose") => purpose = Some(field.text().await.map_err(multipart_error)?),
            Some("user_email") => user_email = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let (filename, file_type, size) =
        file.ok_or_else(|| ApiError::InvalidRequest("file is required".to_string()))?;
    let purpose = purpose
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("purpose is required".to_string()))?;
    let user_email = user_email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("user_email is required".to_string()))?;

    let document = state
        .repository
        .create_document(NewDocumentUpload {
            filename,
            file_type,
            purpose: purpose.trim().to_string(),
            user_email: user_email.trim().to_string(),
            size_bytes: i64::try_from(size).map_err(|e| ApiError::Internal(e.into()))?,
        })
        .await?;

    tracing::info!(
        id = %document.id,
        file_type = %document.file_type,
        size_bytes = document.size_bytes,
        "Stored document upload"
    );

    Ok(Json(UploadResponse {
        message: "Document uploaded successfully! Our CA will review it within 24 hours."
            .to_string(),
        document_id: document.id,
        filename: document.filename,
    }))
}

/// Get list of CA services offered
pub async fn services() -> Json<ServicesResponse> {
    Json(ServicesResponse {
        services: ServiceOffering::catalog(),
    })
}
