//! SourceMonitor - per-source poll/compare/act state machine

use std::io::SeekFrom;
use std::sync::Arc;
use std::time::Duration;

use contracts::{EventKind, LogChunk, MonitorState, SourceConfig};
use forwarder::Router;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

/// Classified outcome of one observation against the last known state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// ABSENT -> PRESENT; size resets to 0 so existing content is picked
    /// up as growth on the next tick.
    Appeared,
    /// PRESENT -> ABSENT; size resets to 0.
    Disappeared,
    /// File grew; the delta is `from..to`.
    Grew { from: u64, to: u64 },
    /// File shrank; prior content is unknown, the whole current file is
    /// resent.
    Truncated { from: u64, to: u64 },
    /// PRESENT, same size.
    Unchanged,
    /// ABSENT, still absent.
    StillAbsent,
}

/// Classify an observation `(exists, size)` against `state`.
///
/// Pure function over the state table; the caller applies the resulting
/// state mutation and side effects.
pub fn classify(state: MonitorState, exists: bool, size: u64) -> Transition {
    match (state.exists, exists) {
        (false, true) => Transition::Appeared,
        (true, false) => Transition::Disappeared,
        (false, false) => Transition::StillAbsent,
        (true, true) => {
            if size > state.size {
                Transition::Grew {
                    from: state.size,
                    to: size,
                }
            } else if size < state.size {
                Transition::Truncated {
                    from: state.size,
                    to: size,
                }
            } else {
                Transition::Unchanged
            }
        }
    }
}

/// Owns the polling state for exactly one source file.
///
/// Single-threaded per source: each tick's delta is forwarded before the
/// next comparison begins, so MODIFY events within a source are strictly
/// ordered. No cross-source ordering exists or is needed.
pub struct SourceMonitor {
    config: SourceConfig,
    interval: Duration,
    state: MonitorState,
    router: Arc<Router>,
}

impl SourceMonitor {
    /// Create a monitor in the bootstrap state (absent, size 0).
    pub fn new(config: SourceConfig, interval: Duration, router: Arc<Router>) -> Self {
        Self {
            config,
            interval,
            state: MonitorState::new(),
            router,
        }
    }

    /// Source id.
    pub fn source_id(&self) -> &str {
        &self.config.id
    }

    /// Last observed state.
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Poll until the shutdown flag flips.
    #[instrument(name = "monitor_run", skip(self, shutdown), fields(source = %self.config.id))]
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            source = %self.config.id,
            path = %self.config.path.display(),
            interval_secs = self.interval.as_secs(),
            "monitor started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = shutdown.changed() => {
                    info!(source = %self.config.id, "monitor stopped");
                    break;
                }
            }
        }
    }

    /// One poll/compare/act cycle.
    ///
    /// An I/O failure while observing the file is logged and the tick is
    /// skipped; a single bad tick never terminates the monitor.
    pub async fn tick(&mut self) {
        let (exists, size) = match self.observe().await {
            Ok(observation) => observation,
            Err(e) => {
                error!(
                    source = %self.config.id,
                    path = %self.config.path.display(),
                    error = %e,
                    "cannot stat source, skipping tick"
                );
                return;
            }
        };

        match classify(self.state, exists, size) {
            Transition::Appeared => {
                if self.config.wants(EventKind::Create) {
                    info!(
                        source = %self.config.id,
                        path = %self.config.path.display(),
                        "CREATE: source file appeared"
                    );
                }
                self.state = MonitorState {
                    exists: true,
                    size: 0,
                };
            }
            Transition::Disappeared => {
                if self.config.wants(EventKind::Delete) {
                    info!(
                        source = %self.config.id,
                        path = %self.config.path.display(),
                        "DELETE: source file removed"
                    );
                }
                self.state = MonitorState {
                    exists: false,
                    size: 0,
                };
            }
            Transition::Grew { from, to } => {
                if self.config.wants(EventKind::Modify) {
                    self.forward_from(from).await;
                }
                self.state.size = to;
            }
            Transition::Truncated { from, to } => {
                if self.config.wants(EventKind::Modify) {
                    warn!(
                        source = %self.config.id,
                        path = %self.config.path.display(),
                        old_size = from,
                        new_size = to,
                        "TRUNCATE: source file shrank, resending current content"
                    );
                    self.forward_from(0).await;
                }
                self.state.size = to;
            }
            Transition::Unchanged | Transition::StillAbsent => {}
        }
    }

    /// Current existence and size of the source file.
    ///
    /// A missing file is a valid observation, not an error.
    async fn observe(&self) -> std::io::Result<(bool, u64)> {
        match tokio::fs::metadata(&self.config.path).await {
            Ok(meta) => Ok((true, meta.len())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok((false, 0)),
            Err(e) => Err(e),
        }
    }

    /// Read from `offset` to end-of-file and route the bytes.
    ///
    /// A zero-byte read is a no-op: the file may have been rewritten
    /// between the size check and the read, and a short read is an
    /// accepted payload. Read failures are logged; the delta gets exactly
    /// one attempt either way.
    async fn forward_from(&self, offset: u64) {
        let payload = match self.read_from(offset).await {
            Ok(payload) => payload,
            Err(e) => {
                error!(
                    source = %self.config.id,
                    path = %self.config.path.display(),
                    error = %e,
                    "read failed, delta dropped"
                );
                return;
            }
        };

        if payload.is_empty() {
            debug!(source = %self.config.id, "zero bytes read, nothing to forward");
            return;
        }

        info!(
            source = %self.config.id,
            offset,
            bytes = payload.len(),
            "MODIFY: forwarding new bytes"
        );

        let chunk = LogChunk::new(self.config.id.clone(), payload);
        self.router.route(&chunk).await;
    }

    async fn read_from(&self, offset: u64) -> std::io::Result<Vec<u8>> {
        let mut file = File::open(&self.config.path).await?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset)).await?;
        }
        let mut payload = Vec::new();
        file.read_to_end(&mut payload).await?;
        Ok(payload)
    }
}
