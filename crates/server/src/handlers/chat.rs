//! # Chat Route Handler
//!
//! The simple `{message, history?}` → `{reply, sources}` contract used by
//! the portfolio front end. A thin translation over the shared pipeline,
//! wired to the casual persona.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use twinrag::{AnswerOptions, ChatTurn, Persona, SourceAttribution};

// --- API Payloads ---

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub sources: Vec<ChatSource>,
}

/// The chat contract exposes a trimmed-down attribution: category and
/// relevance only.
#[derive(Serialize)]
pub struct ChatSource {
    pub category: String,
    pub relevance: f64,
}

impl From<SourceAttribution> for ChatSource {
    fn from(source: SourceAttribution) -> Self {
        Self {
            category: source.category,
            relevance: source.relevance,
        }
    }
}

// --- Handler ---

/// Handler for `POST /api/chat`.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest("The 'message' field is required.".to_string()))?;

    info!("Received chat message: '{message}'");

    let options = AnswerOptions {
        persona: Persona::Casual,
        history: payload.history,
    };
    let answer = app_state.twin.answer(message, &options).await?;

    Ok(Json(ChatResponse {
        reply: answer.text,
        sources: answer.sources.into_iter().map(ChatSource::from).collect(),
    }))
}
