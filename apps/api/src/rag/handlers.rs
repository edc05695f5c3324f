//! Axum route handlers for the chat API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::rag::chat::{chat_with_contract, ChatRequest, ChatResponse};
use crate::state::AppState;

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::Validation("Chat requires GEMINI_API_KEY to be configured".to_string())
    })?;

    let response = chat_with_contract(
        llm,
        state.reference_index.as_deref(),
        state.config.rag_top_k,
        &request,
    )
    .await;
    Ok(Json(response))
}
