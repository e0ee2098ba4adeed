mod config;
mod routes;

use anyhow::{Context, Result};
use attrition_rs::ScoringModel;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env()?;
    let model = ScoringModel::load(&config.model_path, &config.scaler_path).with_context(|| {
        format!(
            "failed to load scoring artifacts (model '{}', scaler '{}')",
            config.model_path.display(),
            config.scaler_path.display()
        )
    })?;

    let app = routes::router(AppState::new(model, &config.model_path, &config.scaler_path));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let addr = listener.local_addr().context("listener has no local address")?;

    println!("attrition-server listening on http://{}", addr);
    info!(%addr, "attrition-server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("attrition-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
