use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use rar_site::config::{log_filter, Config};
use rar_site::{api::ApiClient, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let config = Config::parse();
    let api = ApiClient::new(&config.api_base, config.timeout())
        .context("could not set up the backend client")?;
    tracing::info!(api_base = %api.base(), "Using comment backend");

    let state = AppState::new(api, config.static_dir.clone());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("could not bind {}", config.bind))?;
    tracing::info!("Listening on {}", config.bind);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
