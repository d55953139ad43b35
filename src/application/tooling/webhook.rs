use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

use super::error::ToolError;
use super::interface::{DocumentTools, SearchCall};
use crate::config::AppConfig;

const INVOKE_TIMEOUT: Duration = Duration::from_secs(180);
const TOOL_KEY_HEADER: &str = "X-TOOL-KEY";

/// n8n-style webhook client: every tool call is one JSON POST to a
/// configurable path under the shared base URL.
pub struct WebhookToolClient {
    http: Client,
    base_url: Option<String>,
    shared_key: Option<String>,
    search_path: String,
    get_text_path: String,
}

impl WebhookToolClient {
    pub fn from_config(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(INVOKE_TIMEOUT)
            .build()
            .expect("HTTP client");
        Self {
            http,
            base_url: config.tool_base_url.clone(),
            shared_key: config.tool_key.clone(),
            search_path: config.tool_search_path.clone(),
            get_text_path: config.tool_get_text_path.clone(),
        }
    }

    async fn invoke<B>(&self, path: &str, body: &B) -> Result<Value, ToolError>
    where
        B: Serialize + ?Sized,
    {
        let base = self.base_url.as_deref().ok_or(ToolError::MissingBaseUrl)?;
        let url = format!("{base}{path}");

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = self.shared_key.as_deref() {
            request = request.header(TOOL_KEY_HEADER, key);
        }

        debug!(path, "Invoking tool webhook");
        let response = request
            .send()
            .await
            .map_err(|source| ToolError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Upstream {
                path: path.to_string(),
                status,
                body,
            });
        }

        response.json().await.map_err(|source| ToolError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DocumentTools for WebhookToolClient {
    async fn search_docs(&self, call: &SearchCall) -> Result<Value, ToolError> {
        self.invoke(&self.search_path, call).await
    }

    async fn get_doc_text(&self, drive_file_id: &str) -> Result<Value, ToolError> {
        self.invoke(&self.get_text_path, &json!({"drive_file_id": drive_file_id}))
            .await
    }
}
