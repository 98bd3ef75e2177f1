//! Chat endpoints
//!
//! All chat routes answer 503 until the server is started with an
//! agent URL. Upstream agent failures surface as 502.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::api::ErrorResponse;
use super::state::AppState;
use crate::chat::{ChatRelay, ChatSession};

/// One-shot chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Session-scoped chat request
#[derive(Debug, Deserialize)]
pub struct SessionMessageRequest {
    pub session_id: String,
    pub message: String,
}

/// Chat reply
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Chat relay status
#[derive(Debug, Serialize)]
pub struct ChatStatusResponse {
    pub configured: bool,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_url: Option<String>,
}

fn relay_or_unavailable(
    state: &AppState,
) -> Result<Arc<ChatRelay>, (StatusCode, Json<ErrorResponse>)> {
    state.relay.clone().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse::new("chat agent is not configured")),
    ))
}

/// Send one message without a session
pub async fn chat_once(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let relay = relay_or_unavailable(&state)?;

    match relay.send(&req.message).await {
        Ok(response) => Ok(Json(ChatResponse {
            response,
            session_id: None,
        })),
        Err(e) => {
            tracing::error!("Chat relay failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// Create a new chat session
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ChatSession>, (StatusCode, Json<ErrorResponse>)> {
    relay_or_unavailable(&state)?;

    Ok(Json(state.sessions.create()))
}

/// Send a message within an existing session
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SessionMessageRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let relay = relay_or_unavailable(&state)?;

    let session = state.sessions.record_message(&req.session_id).ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!(
            "session not found: {}",
            req.session_id
        ))),
    ))?;

    match relay.send(&req.message).await {
        Ok(response) => Ok(Json(ChatResponse {
            response,
            session_id: Some(session.session_id),
        })),
        Err(e) => {
            tracing::error!("Chat relay failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// Report chat relay configuration and agent reachability
pub async fn chat_status(State(state): State<AppState>) -> Json<ChatStatusResponse> {
    match &state.relay {
        Some(relay) => Json(ChatStatusResponse {
            configured: true,
            reachable: relay.reachable().await,
            model: Some(relay.model().to_string()),
            agent_url: Some(relay.agent_url().to_string()),
        }),
        None => Json(ChatStatusResponse {
            configured: false,
            reachable: false,
            model: None,
            agent_url: None,
        }),
    }
}
