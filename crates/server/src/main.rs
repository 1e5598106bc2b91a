//! HTTP entry point for the Arrows backend.
mod config;
mod routes;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use arrows_runtime::{JsonFileRepository, Runtime, RuntimeConfig};
use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    setup_logging();

    tracing::info!(
        data_file = %config.data_file.display(),
        "starting arrows backend"
    );

    let repository = JsonFileRepository::new(&config.data_file)?;
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            game: config.game.clone(),
            ..RuntimeConfig::default()
        })
        .repository(repository)
        .build()?;

    let app = routes::router(runtime.handle());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    runtime.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown requested");
}

fn setup_logging() {
    let env_filter =
        EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
