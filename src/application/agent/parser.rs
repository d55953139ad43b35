use serde_json::{Value, json};

const NO_JSON_REASON: &str = "planner returned no JSON object";
const MALFORMED_JSON_REASON: &str = "planner returned malformed JSON";

/// Best-effort extraction of the planner's JSON action from raw model text.
///
/// Total function: input that carries no parseable `{...}` span degrades to a
/// synthesized `final` action wrapping the trimmed text, never an error.
pub fn extract_action(raw: &str) -> Value {
    let trimmed = raw.trim();

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<Value>(&trimmed[start..=end])
                .unwrap_or_else(|_| final_fallback(trimmed, MALFORMED_JSON_REASON))
        }
        _ => final_fallback(trimmed, NO_JSON_REASON),
    }
}

fn final_fallback(answer: &str, reason: &str) -> Value {
    json!({"action": "final", "answer": answer, "reason": reason})
}
