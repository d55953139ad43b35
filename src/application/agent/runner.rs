use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use super::directive::PlannerDirective;
use super::errors::AgentError;
use super::models::{AgentOutcome, AgentRequest, AgentStep, Observation};
use super::parser::extract_action;
use super::prompts::{direct_answer_prompt, planning_prompt, synthesis_prompt};
use crate::application::tooling::{DocumentTools, SearchCall};
use crate::config::PromptLimits;
use crate::infrastructure::model::{GenerationRequest, ModelProvider};

const PLANNING_TEMPERATURE: f32 = 0.0;
const PLANNING_MAX_TOKENS: u32 = 1024;
const ANSWER_TEMPERATURE: f32 = 0.2;
const ANSWER_MAX_TOKENS: u32 = 2048;
const DEFAULT_TOP_K: u32 = 5;

/// Bounded plan, act, observe loop over a model provider and the document
/// tools. Every planner reply and tool result is recorded in the step log
/// returned with the answer.
pub struct Agent<P: ModelProvider> {
    llm: Arc<P>,
    tools: Arc<dyn DocumentTools>,
    limits: PromptLimits,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(llm: Arc<P>, tools: Arc<dyn DocumentTools>, limits: PromptLimits) -> Self {
        Self { llm, tools, limits }
    }

    /// Drives the loop until the planner finalizes, an unrecognized action
    /// forces a direct answer, or the step budget runs out and the reply is
    /// synthesized from whatever was observed.
    pub async fn run(&self, request: AgentRequest) -> Result<AgentOutcome, AgentError> {
        info!(max_steps = request.max_steps, "Agent run started");

        let mut steps: Vec<AgentStep> = Vec::new();
        let mut observation: Option<Observation> = None;

        for step in 1..=request.max_steps {
            debug!(step, "Submitting planning prompt to model provider");
            let prompt = planning_prompt(&request, observation.as_ref(), &self.limits);
            let raw = self
                .generate(prompt, PLANNING_TEMPERATURE, PLANNING_MAX_TOKENS)
                .await?;

            let action = extract_action(&raw);
            let directive = PlannerDirective::from_value(&action);
            steps.push(AgentStep::Planned {
                step,
                planner_raw: raw.clone(),
                action,
            });

            match directive {
                PlannerDirective::Final { answer } => {
                    info!(step, "Planner returned final answer");
                    // An empty answer field carries no answer; fall back to
                    // the planner's raw reply.
                    let answer = if answer.is_empty() { raw } else { answer };
                    return Ok(AgentOutcome { answer, steps });
                }
                PlannerDirective::SearchDocs { query, top_k } => {
                    let call = SearchCall {
                        query: query.unwrap_or_else(|| request.message.clone()),
                        top_k: top_k.unwrap_or(DEFAULT_TOP_K),
                    };
                    let recorded = self.run_search(call).await?;
                    info!(step, tool = %recorded.tool, "Tool call completed");
                    steps.push(AgentStep::ToolCall {
                        step,
                        tool_call: recorded.clone(),
                    });
                    observation = Some(recorded);
                }
                PlannerDirective::GetDocText { drive_file_id } => {
                    let id = drive_file_id
                        .as_deref()
                        .map(str::trim)
                        .filter(|id| !id.is_empty());
                    let recorded = match id {
                        Some(id) => {
                            let result = self.tools.get_doc_text(id).await?;
                            Observation {
                                tool: "get_doc_text".to_string(),
                                args: json!({ "drive_file_id": id }),
                                result,
                            }
                        }
                        None => {
                            warn!(step, "get_doc_text arrived without a document id, searching instead");
                            let call = SearchCall {
                                query: request.message.clone(),
                                top_k: DEFAULT_TOP_K,
                            };
                            self.run_search(call).await?
                        }
                    };
                    info!(step, tool = %recorded.tool, "Tool call completed");
                    steps.push(AgentStep::ToolCall {
                        step,
                        tool_call: recorded.clone(),
                    });
                    observation = Some(recorded);
                }
                PlannerDirective::Unknown => {
                    warn!(step, "Unrecognized planner action, answering directly");
                    let prompt = direct_answer_prompt(&request, observation.as_ref(), &self.limits);
                    let answer = self
                        .generate(prompt, ANSWER_TEMPERATURE, ANSWER_MAX_TOKENS)
                        .await?;
                    steps.push(AgentStep::Fallback {
                        step,
                        fallback_answer: answer.clone(),
                    });
                    return Ok(AgentOutcome { answer, steps });
                }
            }
        }

        info!("Step budget exhausted, synthesizing answer");
        let prompt = synthesis_prompt(&request, observation.as_ref(), &self.limits);
        let answer = self
            .generate(prompt, ANSWER_TEMPERATURE, ANSWER_MAX_TOKENS)
            .await?;
        steps.push(AgentStep::Synthesis {
            final_fallback: true,
            answer: answer.clone(),
        });
        Ok(AgentOutcome { answer, steps })
    }

    async fn run_search(&self, call: SearchCall) -> Result<Observation, AgentError> {
        let result = self.tools.search_docs(&call).await?;
        Ok(Observation {
            tool: "search_docs".to_string(),
            args: serde_json::to_value(&call).unwrap_or_default(),
            result,
        })
    }

    async fn generate(
        &self,
        prompt: String,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<String, AgentError> {
        let reply = self
            .llm
            .generate(GenerationRequest {
                prompt,
                temperature,
                max_output_tokens,
            })
            .await?;
        Ok(reply)
    }
}
