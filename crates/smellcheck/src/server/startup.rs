//! Server startup and shutdown

use anyhow::{Context, Result};
use bentley::request_log::RequestLog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};

use crate::config::ServerConfig;
use crate::server::{routing::create_router, state::AppState};
use crate::store::SmellStore;

const COMPONENT: &str = "smellcheck-server";

/// Bind to `config.bind` and serve until Ctrl+C or SIGTERM
pub async fn start_server(
  config: ServerConfig,
  store: Arc<dyn SmellStore>,
  logs_path: &Path,
) -> Result<()> {
  let logs = RequestLog::new(logs_path)
    .with_context(|| format!("Failed to open request log at {}", logs_path.display()))?;

  let bind = config.bind;
  logs
    .info(
      &format!(
        "Starting smellcheck server on {bind} ({}, access: {})",
        config.environment, config.access_mode
      ),
      COMPONENT,
    )
    .await;

  let state = AppState::new(store, config, logs.clone());
  let app = create_router(state);

  let listener =
    TcpListener::bind(bind).await.with_context(|| format!("Failed to bind to {bind}"))?;
  logs.info(&format!("Server listening on {bind}"), COMPONENT).await;

  match axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
    Ok(()) => {
      logs.success("Server shut down gracefully", COMPONENT).await;
      Ok(())
    }
    Err(e) => {
      logs.error(&format!("Server error: {e}"), COMPONENT).await;
      Err(anyhow::anyhow!("Server error: {e}"))
    }
  }
}

/// Default location of the persistent request log
pub fn default_logs_path() -> PathBuf {
  dirs::home_dir()
    .unwrap_or_else(std::env::temp_dir)
    .join(".smellcheck")
    .join("server.logs.jsonl")
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      bentley::warn!("Failed to listen for Ctrl+C: {e}");
      std::future::pending::<()>().await;
    }
    bentley::info!("Received Ctrl+C, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
        bentley::info!("Received terminate signal, shutting down");
      }
      Err(e) => {
        bentley::warn!("Failed to install SIGTERM handler: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}
