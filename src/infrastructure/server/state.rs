use std::sync::Arc;

use crate::application::agent::Agent;
use crate::application::tooling::DocumentTools;
use crate::config::AppConfig;
use crate::infrastructure::model::ModelProvider;

pub(crate) struct ServerState<P: ModelProvider> {
    llm: Arc<P>,
    tools: Arc<dyn DocumentTools>,
    config: AppConfig,
}

impl<P: ModelProvider> ServerState<P> {
    pub(crate) fn new(llm: Arc<P>, tools: Arc<dyn DocumentTools>, config: AppConfig) -> Self {
        Self { llm, tools, config }
    }

    /// Agents are cheap handles over the shared clients; one is built per
    /// request.
    pub(crate) fn agent(&self) -> Agent<P> {
        Agent::new(
            Arc::clone(&self.llm),
            Arc::clone(&self.tools),
            self.config.limits,
        )
    }

    pub(crate) fn config(&self) -> &AppConfig {
        &self.config
    }
}
