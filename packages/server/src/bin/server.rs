use anyhow::Context;
use clap::Parser;
use livepad_common::Config;
use livepad_server::{router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "livepad-server")]
#[command(about = "Serve the Livepad editor and sandboxed preview", long_about = None)]
#[command(version)]
struct Args {
    /// Directory containing livepad.config.json
    #[arg(default_value = ".")]
    root_dir: PathBuf,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Remote generation endpoint (defaults to the built-in stub)
    #[arg(long)]
    endpoint: Option<String>,

    /// Stub generator latency in milliseconds
    #[arg(long)]
    stub_delay_ms: Option<u64>,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(endpoint) = self.endpoint {
            config.generate_endpoint = Some(endpoint);
        }
        if let Some(delay) = self.stub_delay_ms {
            config.stub_delay_ms = delay;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.root_dir)
        .with_context(|| format!("Failed to load config from {}", args.root_dir.display()))?;
    let config = args.apply(config);

    match &config.generate_endpoint {
        Some(endpoint) => tracing::info!("Generating with {}", endpoint),
        None => tracing::info!("Generating with the built-in stub ({} ms)", config.stub_delay_ms),
    }

    let state = Arc::new(AppState::from_config(&config));
    let app = router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Livepad listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
