use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::application::agent::AgentStep;

/// Chat request as it arrives on the wire. Optional fields map onto the
/// loop's defaults.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub chat_history: Option<Vec<Value>>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub attachments_context: Option<Map<String, Value>>,
    #[serde(default)]
    pub max_steps: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub answer: String,
    pub steps: Vec<AgentStep>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness payload; `n8n_base` is null until the webhook base is configured.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model: String,
    pub n8n_base: Option<String>,
}
