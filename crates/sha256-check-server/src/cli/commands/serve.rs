//! Serve command: bind the listener and run until SIGINT/SIGTERM.

use anyhow::{Context, Result};
use sha256_check_core::config::ServiceConfig;
use sha256_check_core::{AppendFileLog, Checksummer};
use sha256_check_server::{router, serve, shutdown_signal};
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn run_serve(cfg: &ServiceConfig) -> Result<()> {
    let sums = Checksummer::new(Arc::new(AppendFileLog::new(&cfg.error_log)));
    let app = router(cfg.profiles.clone(), sums);

    let listener = TcpListener::bind(cfg.listen)
        .await
        .with_context(|| format!("bind {}", cfg.listen))?;
    tracing::info!(
        profiles = cfg.profiles.len(),
        error_log = %cfg.error_log.display(),
        "sha256-check starting"
    );
    serve(listener, app, shutdown_signal()).await
}
