//! StitchLab Server - serves the creature stitching endpoint.
//!
//! Stateless across requests; the listening port is the only configuration.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stitchlab_core::http::{router, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "stitchlab-server")]
#[command(about = "StitchLab API server - deterministic placeholder creature synthesis")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server running on http://localhost:{}", cli.port);
    tracing::info!("endpoint: POST /api/generate-stitched");

    axum::serve(listener, router()).await?;
    Ok(())
}
