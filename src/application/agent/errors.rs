use reqwest::StatusCode;
use thiserror::Error;

use crate::application::tooling::ToolError;
use crate::infrastructure::model::ModelError;

/// Failure surfaced by an agent run. Wraps the layer that failed so the
/// server can map it onto an HTTP response.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl AgentError {
    /// Status code the failing layer wants the client to see.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Model(error) => error.status(),
            Self::Tool(error) => error.status(),
        }
    }

    /// Response body for the client. Upstream bodies pass through verbatim.
    pub fn detail(&self) -> String {
        match self {
            Self::Model(error) => error.detail(),
            Self::Tool(error) => error.detail(),
        }
    }
}
