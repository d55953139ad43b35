mod directive;
mod errors;
mod models;
mod parser;
mod prompts;
mod runner;

#[cfg(test)]
mod tests;

pub use errors::AgentError;
pub use models::{
    AgentOutcome, AgentRequest, AgentStep, DEFAULT_MAX_STEPS, MAX_STEPS_RANGE, Observation,
};
pub use runner::Agent;
