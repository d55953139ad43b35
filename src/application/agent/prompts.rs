use serde::Serialize;

use super::models::{AgentRequest, Observation};
use crate::config::PromptLimits;

/// Planning template: pick exactly one action, reply with JSON only.
pub(crate) fn planning_prompt(
    request: &AgentRequest,
    observation: Option<&Observation>,
    limits: &PromptLimits,
) -> String {
    let message = &request.message;
    let history = clipped_json(&request.chat_history, limits.history);
    let attachments = clipped_json(&request.attachments, limits.attachments);
    let observation = clipped_observation(observation, limits.observation);

    format!(
        r#"You are an agent. Decide the next action.

You have tools:
1) search_docs: retrieve relevant snippets from user's documents.
   args: {{"query": "...", "top_k": 5}}
2) get_doc_text: fetch detailed text for a specific document.
   args: {{"drive_file_id": "..."}}  (or another id your n8n expects)

Return ONLY JSON in one of forms:
- {{"action":"search_docs","args":{{...}},"reason":"..."}}
- {{"action":"get_doc_text","args":{{...}},"reason":"..."}}
- {{"action":"final","answer":"...","reason":"..."}}

User message: {message}

Chat history (recent): {history}
Attachments context: {attachments}
Tool observation so far: {observation}"#
    )
}

/// Fallback template used when the planner picked an unrecognized action:
/// answer directly, asking a clarifying question if needed.
pub(crate) fn direct_answer_prompt(
    request: &AgentRequest,
    observation: Option<&Observation>,
    limits: &PromptLimits,
) -> String {
    let message = &request.message;
    let history = clipped_json(&request.chat_history, limits.history);
    let attachments = clipped_json(&request.attachments, limits.attachments);
    let observation = clipped_observation(observation, limits.observation);

    format!(
        r#"Answer the user. If missing info, ask a concise clarifying question.

User: {message}
Chat history: {history}
Attachments: {attachments}
Tool observation: {observation}"#
    )
}

/// Exhaustion template: the step budget ran out, synthesize the best possible
/// answer from what was gathered. Carries a wider observation budget and no
/// chat history.
pub(crate) fn synthesis_prompt(
    request: &AgentRequest,
    observation: Option<&Observation>,
    limits: &PromptLimits,
) -> String {
    let message = &request.message;
    let attachments = clipped_json(&request.attachments, limits.attachments);
    let observation = clipped_observation(observation, limits.synthesis_observation);

    format!(
        r#"Provide the best possible answer using available context and tool results.

User: {message}
Attachments: {attachments}
Tool observation: {observation}"#
    )
}

fn clipped_observation(observation: Option<&Observation>, limit: usize) -> String {
    match observation {
        Some(observation) => clipped_json(observation, limit),
        None => "{}".to_string(),
    }
}

fn clipped_json<T: Serialize>(value: &T, limit: usize) -> String {
    truncate_chars(
        serde_json::to_string(value).unwrap_or_default(),
        limit,
    )
}

/// Prefix cut after `limit` characters, on char boundaries.
fn truncate_chars(mut text: String, limit: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(limit) {
        text.truncate(cut);
    }
    text
}
