//! Gemini client for Google AI

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use super::traits::ModelProvider;
use super::types::{GenerationRequest, ModelError};
use crate::config::AppConfig;

const GENERATE_TIMEOUT: Duration = Duration::from_secs(90);
const CANDIDATE_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn from_config(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .expect("HTTP client");
        Self {
            http,
            endpoint: config.gemini_endpoint.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        }
    }

    fn generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        )
    }

    fn require_api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ModelError::MissingApiKey)
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        let api_key = self.require_api_key()?;
        let url = self.generate_url(api_key);
        let payload = json!({
            "contents": [{"parts": [{"text": request.prompt}]}],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_output_tokens,
            }
        });

        info!(
            model = self.model.as_str(),
            temperature = request.temperature,
            "Sending request to Gemini"
        );
        let response = self.http.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Upstream { status, body });
        }

        let data: Value = response.json().await?;
        debug!("Received response from Gemini");
        Ok(extract_text(&data))
    }
}

/// Pulls the first candidate's text out of a generateContent response.
/// An unexpected shape degrades to the raw payload dump instead of failing.
fn extract_text(data: &Value) -> String {
    match data.pointer(CANDIDATE_TEXT_POINTER).and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => data.to_string(),
    }
}
