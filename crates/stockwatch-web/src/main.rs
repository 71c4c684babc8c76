mod config;
mod error;
mod routes;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use stockwatch_core::{AlphaVantageSource, QuoteEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::ServerError;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stockwatch=info,stockwatch_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let clock = config.clock()?;
    let source = AlphaVantageSource::new(config.alphavantage());
    let engine = Arc::new(QuoteEngine::new(Arc::new(source), Arc::new(clock)));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;

    tracing::info!(
        addr = %config.bind,
        output_size = config.output_size.as_str(),
        timeout_secs = config.timeout_secs,
        "StockWatch listening"
    );

    axum::serve(listener, routes::router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("StockWatch stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
