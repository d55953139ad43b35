use super::super::dto::HealthResponse;
use super::super::state::ServerState;
use crate::infrastructure::model::ModelProvider;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

const SERVICE_NAME: &str = "agent0-wrapper";

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is live", body = HealthResponse)
    )
)]
pub async fn health_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
) -> Json<HealthResponse> {
    debug!("Received health probe");
    let config = state.config();
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        model: config.gemini_model.clone(),
        n8n_base: config.tool_base_url.clone(),
    })
}
