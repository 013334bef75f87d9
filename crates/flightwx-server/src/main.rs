//! flightwx server: route ranking and weather risk over HTTP.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flightwx_server::config::Config;
use flightwx_server::state::AppState;
use flightwx_server::{api, loops, persistence};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flightwx_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting flightwx server...");

    let config = Config::from_env();
    config.log_config();
    let port = config.server_port;

    let thresholds = config.load_thresholds()?;
    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await?;
    let state = Arc::new(AppState::new(config, thresholds, db));

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let collector = tokio::spawn(loops::weather_collect_loop::run_weather_collect_loop(
        state.clone(),
        shutdown_tx.subscribe(),
    ));

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", err);
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    let _ = shutdown_tx.send(());
    if let Err(err) = collector.await {
        tracing::warn!("Weather collection task ended abnormally: {}", err);
    }

    Ok(())
}
