//! memscrape REST API entry point.
//!
//! Binary name: `memscrape`
//!
//! Parses environment-bound CLI flags, validates configuration (the scrape
//! provider credential is mandatory), wires the retrieval service, and runs
//! the axum server until Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;
use tracing::info;

use memscrape_infra::config::{DEFAULT_MEMORY_SERVER_URL, DEFAULT_NAMESPACE};
use memscrape_infra::ServiceConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "memscrape", about = "Cache-first profile retrieval service")]
struct Cli {
    /// Address to bind the API server to.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the API server to.
    #[arg(long, default_value_t = 8001)]
    port: u16,

    /// Base URL of the semantic memory store.
    #[arg(long, env = "MEMORY_SERVER_URL", default_value = DEFAULT_MEMORY_SERVER_URL)]
    memory_server_url: String,

    /// Memory store namespace all records are scoped to.
    #[arg(long, env = "MEMORY_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Bearer credential for the scrape provider. Required.
    #[arg(long, env = "SCRAPE_API_TOKEN", hide_env_values = true)]
    scrape_api_token: Option<String>,

    /// Provider dataset to trigger scrape jobs against.
    #[arg(long, env = "SCRAPE_DATASET_ID", default_value = "gd_l1viktl72bvl7bjuj0")]
    dataset_id: String,

    /// Enable OpenTelemetry trace export to stdout.
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    memscrape_observe::init_tracing("memscrape", cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config = ServiceConfig::new(
        cli.memory_server_url,
        cli.namespace,
        cli.scrape_api_token,
        cli.dataset_id,
    )?;

    let state = AppState::init(config);
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    memscrape_observe::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
