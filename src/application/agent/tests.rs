use super::*;
use crate::application::tooling::{DocumentTools, SearchCall, ToolError};
use crate::config::PromptLimits;
use crate::infrastructure::model::{GenerationRequest, ModelError, ModelProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
struct ScriptedProvider {
    responses: Arc<Mutex<Vec<String>>>,
    recordings: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(String::from).collect(),
            )),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn requests(&self) -> Vec<GenerationRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        let mut responses = self.responses.lock().await;
        let response = responses.remove(0);
        self.recordings.lock().await.push(request);
        Ok(response)
    }
}

#[derive(Clone)]
struct StubTools {
    search_results: Arc<Mutex<Vec<Value>>>,
    search_calls: Arc<Mutex<Vec<SearchCall>>>,
    get_text_result: Value,
    get_text_calls: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<ToolError>>>,
}

impl StubTools {
    fn new(search_results: Vec<Value>) -> Self {
        Self {
            search_results: Arc::new(Mutex::new(search_results)),
            search_calls: Arc::new(Mutex::new(Vec::new())),
            get_text_result: json!({ "text": "full document text" }),
            get_text_calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    fn failing(error: ToolError) -> Self {
        let stub = Self::new(Vec::new());
        Self {
            failure: Arc::new(Mutex::new(Some(error))),
            ..stub
        }
    }

    async fn search_calls(&self) -> Vec<SearchCall> {
        self.search_calls.lock().await.clone()
    }

    async fn get_text_calls(&self) -> Vec<String> {
        self.get_text_calls.lock().await.clone()
    }
}

#[async_trait]
impl DocumentTools for StubTools {
    async fn search_docs(&self, call: &SearchCall) -> Result<Value, ToolError> {
        if let Some(error) = self.failure.lock().await.take() {
            return Err(error);
        }
        self.search_calls.lock().await.push(call.clone());
        let mut results = self.search_results.lock().await;
        if results.is_empty() {
            Ok(json!({ "snippets": [] }))
        } else {
            Ok(results.remove(0))
        }
    }

    async fn get_doc_text(&self, drive_file_id: &str) -> Result<Value, ToolError> {
        if let Some(error) = self.failure.lock().await.take() {
            return Err(error);
        }
        self.get_text_calls
            .lock()
            .await
            .push(drive_file_id.to_string());
        Ok(self.get_text_result.clone())
    }
}

fn agent_with(provider: &ScriptedProvider, tools: &StubTools) -> Agent<ScriptedProvider> {
    Agent::new(
        Arc::new(provider.clone()),
        Arc::new(tools.clone()),
        PromptLimits::default(),
    )
}

fn request(message: &str, max_steps: usize) -> AgentRequest {
    AgentRequest {
        message: message.to_string(),
        chat_history: Vec::new(),
        attachments: Map::new(),
        max_steps,
    }
}

#[tokio::test]
async fn final_answer_on_first_step() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"final","answer":"done","reason":"nothing to look up"}"#,
    ]);
    let tools = StubTools::new(Vec::new());
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("hello world", 3))
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.answer, "done");
    assert_eq!(outcome.steps.len(), 1);
    assert!(matches!(&outcome.steps[0], AgentStep::Planned { step: 1, .. }));

    let records = provider.requests().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].temperature, 0.0);
    assert_eq!(records[0].max_output_tokens, 1024);
    assert!(records[0].prompt.contains("User message: hello world"));
    assert!(tools.search_calls().await.is_empty());
}

#[tokio::test]
async fn search_then_final_records_tool_call() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"search_docs","args":{"query":"quarterly report","top_k":3},"reason":"look it up"}"#,
        r#"{"action":"final","answer":"the report says revenue grew","reason":"found it"}"#,
    ]);
    let tools = StubTools::new(vec![json!({ "snippets": ["revenue grew 12%"] })]);
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("what does the report say?", 3))
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.answer, "the report says revenue grew");
    assert_eq!(outcome.steps.len(), 3);
    assert!(matches!(&outcome.steps[0], AgentStep::Planned { step: 1, .. }));
    let AgentStep::ToolCall { step, tool_call } = &outcome.steps[1] else {
        panic!("expected a tool call step");
    };
    assert_eq!(*step, 1);
    assert_eq!(tool_call.tool, "search_docs");
    assert_eq!(tool_call.args, json!({ "query": "quarterly report", "top_k": 3 }));
    assert_eq!(tool_call.result, json!({ "snippets": ["revenue grew 12%"] }));
    assert!(matches!(&outcome.steps[2], AgentStep::Planned { step: 2, .. }));

    let calls = tools.search_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "quarterly report");
    assert_eq!(calls[0].top_k, 3);

    let records = provider.requests().await;
    assert_eq!(records.len(), 2);
    assert!(records[1].prompt.contains("revenue grew 12%"));
}

#[tokio::test]
async fn search_defaults_query_and_top_k() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"search_docs","args":{},"reason":"broad search"}"#,
        r#"{"action":"final","answer":"ok"}"#,
    ]);
    let tools = StubTools::new(Vec::new());
    let agent = agent_with(&provider, &tools);

    agent
        .run(request("find my invoices", 3))
        .await
        .expect("agent succeeds");

    let calls = tools.search_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "find my invoices");
    assert_eq!(calls[0].top_k, 5);
}

#[tokio::test]
async fn forced_synthesis_after_budget() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"search_docs","args":{"query":"meeting notes"},"reason":"need context"}"#,
        "Summary of the meeting notes.",
    ]);
    let tools = StubTools::new(vec![json!({ "snippets": ["budget approved"] })]);
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("summarize the meeting", 1))
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.answer, "Summary of the meeting notes.");
    assert_eq!(outcome.steps.len(), 3);
    assert!(matches!(&outcome.steps[0], AgentStep::Planned { step: 1, .. }));
    assert!(matches!(&outcome.steps[1], AgentStep::ToolCall { step: 1, .. }));
    let AgentStep::Synthesis {
        final_fallback,
        answer,
    } = &outcome.steps[2]
    else {
        panic!("expected a synthesis step");
    };
    assert!(*final_fallback);
    assert_eq!(answer, "Summary of the meeting notes.");

    let records = provider.requests().await;
    assert_eq!(records.len(), 2);
    assert!(records[1].prompt.starts_with("Provide the best possible answer"));
    assert!(records[1].prompt.contains("budget approved"));
    assert_eq!(records[1].temperature, 0.2);
    assert_eq!(records[1].max_output_tokens, 2048);
}

#[tokio::test]
async fn unknown_action_falls_back_to_direct_answer() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"translate","args":{"to":"fr"},"reason":"not a tool"}"#,
        "Here is a direct answer instead.",
    ]);
    let tools = StubTools::new(Vec::new());
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("translate this", 3))
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.answer, "Here is a direct answer instead.");
    assert_eq!(outcome.steps.len(), 2);
    let AgentStep::Fallback {
        step,
        fallback_answer,
    } = &outcome.steps[1]
    else {
        panic!("expected a fallback step");
    };
    assert_eq!(*step, 1);
    assert_eq!(fallback_answer, "Here is a direct answer instead.");

    let records = provider.requests().await;
    assert_eq!(records.len(), 2);
    assert!(records[1].prompt.starts_with("Answer the user."));
    assert!(tools.search_calls().await.is_empty());
}

#[tokio::test]
async fn latest_observation_replaces_the_previous_one() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"search_docs","args":{"query":"first pass"}}"#,
        r#"{"action":"search_docs","args":{"query":"second pass"}}"#,
        r#"{"action":"final","answer":"done"}"#,
    ]);
    let tools = StubTools::new(vec![
        json!({ "snippets": ["alpha finding"] }),
        json!({ "snippets": ["beta finding"] }),
    ]);
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("dig deeper", 4))
        .await
        .expect("agent succeeds");

    let records = provider.requests().await;
    assert_eq!(records.len(), 3);
    assert!(records[1].prompt.contains("alpha finding"));
    assert!(records[2].prompt.contains("beta finding"));
    assert!(!records[2].prompt.contains("alpha finding"));

    let tool_steps = outcome
        .steps
        .iter()
        .filter(|step| matches!(step, AgentStep::ToolCall { .. }))
        .count();
    assert_eq!(tool_steps, 2);
}

#[tokio::test]
async fn get_doc_text_without_id_searches_instead() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"get_doc_text","args":{"drive_file_id":"   "},"reason":"fetch it"}"#,
        r#"{"action":"final","answer":"done"}"#,
    ]);
    let tools = StubTools::new(vec![json!({ "snippets": ["recovered"] })]);
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("show the contract", 3))
        .await
        .expect("agent succeeds");

    assert!(tools.get_text_calls().await.is_empty());
    let calls = tools.search_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "show the contract");
    assert_eq!(calls[0].top_k, 5);

    let AgentStep::ToolCall { tool_call, .. } = &outcome.steps[1] else {
        panic!("expected a tool call step");
    };
    assert_eq!(tool_call.tool, "search_docs");
    assert_eq!(
        tool_call.args,
        json!({ "query": "show the contract", "top_k": 5 })
    );
}

#[tokio::test]
async fn get_doc_text_with_id_fetches_document() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"get_doc_text","args":{"drive_file_id":"1abcDEF"},"reason":"fetch it"}"#,
        r#"{"action":"final","answer":"quoted"}"#,
    ]);
    let tools = StubTools::new(Vec::new());
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("quote section 2", 3))
        .await
        .expect("agent succeeds");

    assert_eq!(tools.get_text_calls().await, vec!["1abcDEF".to_string()]);
    let AgentStep::ToolCall { tool_call, .. } = &outcome.steps[1] else {
        panic!("expected a tool call step");
    };
    assert_eq!(tool_call.tool, "get_doc_text");
    assert_eq!(tool_call.args, json!({ "drive_file_id": "1abcDEF" }));
    assert_eq!(tool_call.result, json!({ "text": "full document text" }));

    let records = provider.requests().await;
    assert!(records[1].prompt.contains("full document text"));
}

#[tokio::test]
async fn empty_final_answer_falls_back_to_raw_reply() {
    let raw = r#"I think the answer is ready. {"action":"final","answer":"","reason":"drafted"}"#;
    let provider = ScriptedProvider::new(vec![raw]);
    let tools = StubTools::new(Vec::new());
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("anything", 3))
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.answer, raw);
}

#[tokio::test]
async fn prose_reply_finalizes_with_the_prose() {
    let provider = ScriptedProvider::new(vec!["The capital of France is Paris."]);
    let tools = StubTools::new(Vec::new());
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("capital of France?", 3))
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.answer, "The capital of France is Paris.");
    assert_eq!(outcome.steps.len(), 1);
    let AgentStep::Planned { action, .. } = &outcome.steps[0] else {
        panic!("expected a planned step");
    };
    assert_eq!(action["action"], "final");
    assert!(tools.search_calls().await.is_empty());
}

#[tokio::test]
async fn tool_failure_aborts_the_run() {
    let provider = ScriptedProvider::new(vec![r#"{"action":"search_docs","args":{"query":"x"}}"#]);
    let tools = StubTools::failing(ToolError::Upstream {
        path: "/webhook/tool_search_docs".to_string(),
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "workflow disabled".to_string(),
    });
    let agent = agent_with(&provider, &tools);

    let error = agent
        .run(request("anything", 3))
        .await
        .expect_err("tool failure surfaces");

    assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error.detail(), "workflow disabled");
}

#[tokio::test]
async fn step_log_serializes_wire_shapes() {
    let provider = ScriptedProvider::new(vec![
        r#"{"action":"search_docs","args":{"query":"contract"}}"#,
        "Synthesized from the one search.",
    ]);
    let tools = StubTools::new(vec![json!({ "snippets": ["clause"] })]);
    let agent = agent_with(&provider, &tools);

    let outcome = agent
        .run(request("summarize", 1))
        .await
        .expect("agent succeeds");

    let log = serde_json::to_value(&outcome.steps).expect("steps serialize");
    assert_eq!(
        log[0]["planner_raw"],
        r#"{"action":"search_docs","args":{"query":"contract"}}"#
    );
    assert_eq!(log[0]["step"], 1);
    assert_eq!(log[0]["action"]["action"], "search_docs");
    assert_eq!(log[1]["step"], 1);
    assert_eq!(log[1]["tool_call"]["tool"], "search_docs");
    assert_eq!(log[1]["tool_call"]["args"]["top_k"], 5);
    assert_eq!(log[2]["final_fallback"], true);
    assert_eq!(log[2]["answer"], "Synthesized from the one search.");
}
