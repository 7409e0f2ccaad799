use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use roster_config::{load_from, AppConfig};
use roster_gateway::create_router;
use roster_runtime::{shutdown_signal, telemetry, RosterServices};
use tokio::net::TcpListener;
use tracing::info;

/// Member roster HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file; overrides ROSTER_CONFIG and the default search locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Port to listen on; overrides http.port from the configuration
    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config =
            load_from(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(port) = self.port {
            config.http.port = port;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing()?;

    info!("starting roster backend");

    let config = cli.load_config()?;
    let services = RosterServices::initialise(&config).await?;
    let app = create_router(services);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("roster backend shut down");
    Ok(())
}
