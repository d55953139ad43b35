use agent0_wrapper::AppConfig;
use agent0_wrapper::model::GeminiClient;
use agent0_wrapper::server;
use agent0_wrapper::tooling::{DocumentTools, WebhookToolClient};
use clap::Parser;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "agent0-wrapper",
    version,
    about = "REST wrapper running a bounded agent loop over Gemini and n8n document tools"
)]
struct Cli {
    /// Bind address override; HOST and PORT are used when absent.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_tracing();
    info!("Starting agent0-wrapper");
    let cli = Cli::parse();
    debug!(addr = ?cli.addr, "CLI arguments parsed");

    let config = AppConfig::from_env()?;
    let addr = cli.addr.unwrap_or(config.bind);

    let llm = Arc::new(GeminiClient::from_config(&config));
    let tools: Arc<dyn DocumentTools> = Arc::new(WebhookToolClient::from_config(&config));

    info!(model = %config.gemini_model, %addr, "Starting REST server");
    server::serve(llm, tools, config, addr).await?;
    info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
