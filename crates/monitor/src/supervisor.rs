//! Supervisor - one concurrent monitor task per source

use std::sync::Arc;
use std::time::Duration;

use contracts::SourceConfig;
use forwarder::Router;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

use crate::monitor::SourceMonitor;

/// Starts and holds one [`SourceMonitor`] task per configured source.
///
/// Each task polls independently; a slow destination on one source never
/// delays polling for another. The destination list behind the shared
/// router is read-only, so no locking is involved.
pub struct Supervisor {
    sources: Vec<SourceConfig>,
    default_interval_secs: u64,
    router: Arc<Router>,
}

impl Supervisor {
    /// Create a supervisor over the given sources.
    pub fn new(
        sources: Vec<SourceConfig>,
        default_interval_secs: u64,
        router: Arc<Router>,
    ) -> Self {
        Self {
            sources,
            default_interval_secs,
            router,
        }
    }

    /// Spawn all monitors and wait for them to finish.
    ///
    /// Monitors run until `shutdown` flips to true; termination is
    /// aggregated here and a panicked task is logged without taking the
    /// others down.
    #[instrument(name = "supervisor_run", skip(self, shutdown), fields(sources = self.sources.len()))]
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        info!(
            sources = self.sources.len(),
            destinations = self.router.destinations().len(),
            "supervisor starting monitors"
        );

        let mut tasks = JoinSet::new();
        for source in self.sources {
            let interval =
                Duration::from_secs(source.poll_interval_secs(self.default_interval_secs));
            let monitor = SourceMonitor::new(source, interval, Arc::clone(&self.router));
            tasks.spawn(monitor.run(shutdown.clone()));
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "monitor task terminated abnormally");
            }
        }

        info!("all monitors stopped");
    }
}
