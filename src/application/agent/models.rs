use serde::Serialize;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use utoipa::ToSchema;

pub const DEFAULT_MAX_STEPS: usize = 3;
pub const MAX_STEPS_RANGE: RangeInclusive<usize> = 1..=6;

/// Resolved input for one agent run. Immutable for the whole run.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub message: String,
    pub chat_history: Vec<Value>,
    pub attachments: Map<String, Value>,
    pub max_steps: usize,
}

/// The most recent tool result. Replaced wholesale after every tool call;
/// only the latest one is visible to subsequent prompts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Observation {
    pub tool: String,
    #[schema(value_type = Object)]
    pub args: Value,
    #[schema(value_type = Object)]
    pub result: Value,
}

/// One entry of the append-only step log returned to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AgentStep {
    Planned {
        step: usize,
        planner_raw: String,
        #[schema(value_type = Object)]
        action: Value,
    },
    ToolCall {
        step: usize,
        tool_call: Observation,
    },
    Fallback {
        step: usize,
        fallback_answer: String,
    },
    Synthesis {
        final_fallback: bool,
        answer: String,
    },
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub answer: String,
    pub steps: Vec<AgentStep>,
}
