mod cli;

use clap::Parser;
use tickerbrief_web::{app, AppState};
use tracing::{info, warn};

use crate::cli::Cli;

const DEFAULT_LOG_FILTER: &str =
    "tickerbrief=info,tickerbrief_web=info,tickerbrief_core=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();
    if cli.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; reports will carry the fallback analysis");
    }

    let state = AppState::from_configs(cli.alpha_vantage_config(), cli.gemini_config());
    let static_dir = cli.static_dir.is_dir().then_some(cli.static_dir.as_path());
    if static_dir.is_none() {
        warn!(dir = %cli.static_dir.display(), "static directory not found; serving API only");
    }
    let router = app(state, static_dir);

    let addr = cli.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, model = %cli.gemini_model, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(error) => {
            warn!(%error, "could not install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
