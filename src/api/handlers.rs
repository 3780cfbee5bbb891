use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ChatRequest, ChatResponse},
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
    pub embedded: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        movies: state.catalog.len(),
        embedded: state.catalog.embedded_len(),
        loaded_at: state.catalog.loaded_at(),
    })
}

/// Handles one chat turn
pub async fn chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let user_id = request.user_id().to_string();
    let message = request.message().ok_or_else(|| {
        tracing::warn!(request_id = %request_id, user_id = %user_id, "Chat request without a message");
        AppError::MissingMessage
    })?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        message = %message,
        "Processing chat message"
    );

    let response = state.dialogue.handle_message(&user_id, message).await;

    Ok(Json(ChatResponse { response }))
}
