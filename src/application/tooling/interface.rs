use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::error::ToolError;

/// Wire body for a document search, with defaults already resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SearchCall {
    pub query: String,
    pub top_k: u32,
}

#[async_trait]
pub trait DocumentTools: Send + Sync {
    /// Retrieve relevant snippets from the user's documents.
    async fn search_docs(&self, call: &SearchCall) -> Result<Value, ToolError>;

    /// Fetch the detailed text of one document.
    async fn get_doc_text(&self, drive_file_id: &str) -> Result<Value, ToolError>;
}
