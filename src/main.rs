use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use chat_relay::{config::ServerConfig, routes, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing()?;

    let config = ServerConfig::parse();
    let policy = config.reply_policy()?;
    let policy_name = policy.name();
    let state = Arc::new(AppState::new(policy));

    let relay_path = config.route_path();
    let app = routes::app(&relay_path, config.static_dir.as_deref(), state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        path = %relay_path,
        policy = policy_name,
        "webhook relay running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
