use super::super::dto::{ChatRequest, ChatResponse, ErrorResponse};
use super::super::state::ServerState;
use crate::application::agent::{AgentRequest, DEFAULT_MAX_STEPS, MAX_STEPS_RANGE};
use crate::infrastructure::model::ModelProvider;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat processed by the agent loop", body = ChatResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Model or tool webhook unreachable", body = ErrorResponse)
    )
)]
pub async fn chat_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received /chat request");

    if payload.message.trim().is_empty() {
        error!("Rejecting /chat request due to empty message");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message cannot be empty".to_string(),
            }),
        ));
    }

    let max_steps = payload.max_steps.unwrap_or(DEFAULT_MAX_STEPS);
    if !MAX_STEPS_RANGE.contains(&max_steps) {
        error!(max_steps, "Rejecting /chat request due to max_steps out of range");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!(
                    "max_steps must be between {} and {}",
                    MAX_STEPS_RANGE.start(),
                    MAX_STEPS_RANGE.end()
                ),
            }),
        ));
    }

    let request = AgentRequest {
        message: payload.message,
        chat_history: payload.chat_history.unwrap_or_default(),
        attachments: payload.attachments_context.unwrap_or_default(),
        max_steps,
    };

    match state.agent().run(request).await {
        Ok(outcome) => {
            info!(
                steps = outcome.steps.len(),
                "Agent run completed successfully"
            );
            Ok(Json(ChatResponse {
                answer: outcome.answer,
                steps: outcome.steps,
            }))
        }
        Err(error) => {
            error!(%error, "Agent run failed");
            Err((
                error.status(),
                Json(ErrorResponse {
                    error: error.detail(),
                }),
            ))
        }
    }
}
