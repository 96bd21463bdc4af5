//! tetoegend: Tetoegen HTTP daemon.
//!
//! Serves photo classification and development tips over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tetoegen::TetoegenError;
use tetoegen::server::config::{Config, Secrets};
use tetoegen::server::router;

/// Tetoegen daemon: personality-type classification service.
#[derive(Parser)]
#[command(name = "tetoegend")]
#[command(version = tetoegen::PKG_VERSION)]
#[command(about = "Tetoegen classification daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;
    let gateway = config.build_gateway(&secrets)?;

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| TetoegenError::Configuration(format!("Invalid address: {e}")))?;

    if !gateway.has_provider() {
        warn!("no OpenAI API key configured, serving fallback results only");
    }

    let app = router(Arc::new(gateway), config.server.max_upload_bytes);
    let listener = TcpListener::bind(addr).await?;

    info!(
        version = tetoegen::PKG_VERSION,
        addr = %listener.local_addr()?,
        analyze_model = %config.upstream.analyze_model,
        tips_model = %config.upstream.tips_model,
        "tetoegend starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("tetoegend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
