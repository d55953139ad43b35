use reqwest::StatusCode;
use thiserror::Error;

/// One prompt submitted to the text-generation backend.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("model endpoint returned status {status}")]
    Upstream { status: StatusCode, body: String },
    #[error("network error calling model endpoint: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ModelError {
    /// The HTTP status this failure maps to at the service boundary.
    /// Upstream statuses pass through unchanged.
    pub fn status(&self) -> StatusCode {
        match self {
            ModelError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ModelError::Upstream { status, .. } => *status,
            ModelError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ModelError::Upstream { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}
