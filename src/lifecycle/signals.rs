//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, then broadcast shutdown to every subscriber.
pub async fn shutdown_on_ctrl_c(shutdown: &Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C; shutting down");
    } else {
        tracing::info!("Shutdown signal received");
    }
    shutdown.trigger();
}
