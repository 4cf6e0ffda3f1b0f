//! # Monitor
//!
//! Source polling and supervision module.
//!
//! Responsibilities:
//! - Track per-source existence/size state at a fixed poll interval
//! - Classify transitions (appear, disappear, growth, truncation)
//! - Extract new bytes and hand them to the `forwarder` router
//! - Supervise one independent monitor task per source

mod monitor;
mod supervisor;

pub use monitor::{classify, SourceMonitor, Transition};
pub use supervisor::Supervisor;

use std::sync::Arc;

use contracts::{AgentConfig, AgentError};
use forwarder::Router;
use tokio::sync::watch;
use tracing::info;

/// Run the agent until an interrupt signal arrives.
///
/// Builds the router from the configured destinations, starts one monitor
/// per source, and returns cleanly after ctrl-c or SIGTERM. In-flight
/// payloads are not flushed on shutdown.
///
/// # Errors
/// Returns a startup error when no source is configured.
pub async fn run(config: AgentConfig) -> Result<(), AgentError> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received, stopping monitors");
        let _ = shutdown_tx.send(true);
    });

    run_until(config, shutdown_rx).await
}

/// Run the agent until `shutdown` flips to true.
///
/// Split out from [`run`] so tests and embedders control the lifetime
/// without process signals.
pub async fn run_until(
    config: AgentConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<(), AgentError> {
    if config.sources.is_empty() {
        return Err(AgentError::startup("no sources configured"));
    }

    let router = Arc::new(Router::build(config.destinations).await);
    let supervisor = Supervisor::new(config.sources, config.poll_interval_secs, router);
    supervisor.run(shutdown).await;
    Ok(())
}

/// Wait for ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
