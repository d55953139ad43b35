use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;
use thiserror::Error;
use tracing::debug;

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_SEARCH_PATH: &str = "/webhook/tool_search_docs";
const DEFAULT_GET_TEXT_PATH: &str = "/webhook/tool_get_doc_text";
const DEFAULT_CONTEXT_LIMIT: usize = 6000;
const DEFAULT_SYNTHESIS_OBSERVATION_LIMIT: usize = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Character budgets applied to JSON-serialized context blobs before they are
/// embedded in prompts. Hard prefix cuts, no summarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptLimits {
    pub history: usize,
    pub attachments: usize,
    pub observation: usize,
    pub synthesis_observation: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            history: DEFAULT_CONTEXT_LIMIT,
            attachments: DEFAULT_CONTEXT_LIMIT,
            observation: DEFAULT_CONTEXT_LIMIT,
            synthesis_observation: DEFAULT_SYNTHESIS_OBSERVATION_LIMIT,
        }
    }
}

/// Runtime configuration resolved once at startup from environment variables.
///
/// Credentials and the tool base URL are optional here; their absence only
/// becomes an error when the corresponding backend is actually called.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub tool_base_url: Option<String>,
    pub tool_key: Option<String>,
    pub tool_search_path: String,
    pub tool_get_text_path: String,
    pub limits: PromptLimits,
    pub bind: SocketAddr,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {key} has invalid value {value:?}: {source}")]
    InvalidNumber {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = read_var("GEMINI_API_KEY");
        let gemini_model =
            read_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let gemini_endpoint =
            read_var("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());

        let tool_base_url = read_var("N8N_TOOL_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        let tool_key = read_var("N8N_TOOL_KEY");
        let tool_search_path =
            read_var("TOOL_SEARCH_PATH").unwrap_or_else(|| DEFAULT_SEARCH_PATH.to_string());
        let tool_get_text_path =
            read_var("TOOL_GET_TEXT_PATH").unwrap_or_else(|| DEFAULT_GET_TEXT_PATH.to_string());

        let limits = PromptLimits {
            history: read_limit("HISTORY_CHAR_LIMIT", DEFAULT_CONTEXT_LIMIT)?,
            attachments: read_limit("ATTACHMENTS_CHAR_LIMIT", DEFAULT_CONTEXT_LIMIT)?,
            observation: read_limit("OBSERVATION_CHAR_LIMIT", DEFAULT_CONTEXT_LIMIT)?,
            synthesis_observation: read_limit(
                "SYNTHESIS_OBSERVATION_CHAR_LIMIT",
                DEFAULT_SYNTHESIS_OBSERVATION_LIMIT,
            )?,
        };

        let host = read_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match read_var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidNumber {
                    key: "PORT",
                    value,
                    source,
                })?,
            None => DEFAULT_PORT,
        };
        let bind_raw = format!("{host}:{port}");
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddress {
                value: bind_raw,
                source,
            })?;

        debug!(
            model = %gemini_model,
            n8n_base = ?tool_base_url,
            "Environment configuration loaded"
        );

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_endpoint,
            tool_base_url,
            tool_key,
            tool_search_path,
            tool_get_text_path,
            limits,
            bind,
        })
    }
}

/// Reads an environment variable, treating blank values as unset.
fn read_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_limit(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match read_var(key) {
        Some(value) => value
            .parse::<usize>()
            .map_err(|source| ConfigError::InvalidNumber { key, value, source }),
        None => Ok(default),
    }
}
