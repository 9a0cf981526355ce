use std::net::SocketAddr;
use std::time::Duration;
use anyhow::Context;
use ridewise_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridewise_api=debug,ridewise_core=info,ridewise_booking=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ridewise_store::Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting RideWise API on port {} ({:?} session storage)",
        config.server.port,
        config.storage.backend
    );

    let app_state = AppState::from_config(&config)?;

    let _sweeper = app_state
        .sessions
        .clone()
        .spawn_sweeper(Duration::from_secs(config.sessions.sweep_interval_seconds.max(1)));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
