use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("N8N_TOOL_BASE_URL is not configured")]
    MissingBaseUrl,
    #[error("tool webhook {path} returned status {status}")]
    Upstream {
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("failed to reach tool webhook {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("tool webhook {path} returned a non-JSON body: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ToolError {
    /// The HTTP status this failure maps to at the service boundary.
    /// Upstream statuses pass through unchanged.
    pub fn status(&self) -> StatusCode {
        match self {
            ToolError::MissingBaseUrl => StatusCode::INTERNAL_SERVER_ERROR,
            ToolError::Upstream { status, .. } => *status,
            ToolError::Transport { .. } | ToolError::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ToolError::Upstream { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}
