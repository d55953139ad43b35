use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use super::routes;
use crate::application::agent::{AgentStep, Observation};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(routes::chat::chat_handler, routes::health::health_handler),
    components(
        schemas(
            ChatRequest,
            ChatResponse,
            ErrorResponse,
            HealthResponse,
            AgentStep,
            Observation
        )
    ),
    tags(
        (name = "chat", description = "Agent-mediated chat over Gemini and the document tools"),
        (name = "health", description = "Service liveness and configuration summary")
    )
)]
pub(super) struct ApiDoc;
