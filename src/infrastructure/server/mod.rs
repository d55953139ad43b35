mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use error::ServerError;

use crate::application::tooling::DocumentTools;
use crate::config::AppConfig;
use crate::infrastructure::model::ModelProvider;
use std::net::SocketAddr;
use std::sync::Arc;

/// Binds the REST listener and serves until shutdown.
pub async fn serve<P>(
    llm: Arc<P>,
    tools: Arc<dyn DocumentTools>,
    config: AppConfig,
    addr: SocketAddr,
) -> Result<(), ServerError>
where
    P: ModelProvider + 'static,
{
    router::serve(llm, tools, config, addr).await
}
