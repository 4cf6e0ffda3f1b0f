//! `watch` command implementation.
//!
//! Minimal polling directory watcher: snapshots `(mtime, is_dir)` for
//! every direct child of a directory each interval and logs the
//! transitions. Independent of the forwarding core.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::cli::WatchArgs;

type Snapshot = HashMap<PathBuf, EntryDetails>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntryDetails {
    modified: SystemTime,
    is_directory: bool,
}

/// Execute the `watch` command
pub async fn run_watch(args: &WatchArgs) -> Result<()> {
    if !args.path.exists() {
        warn!(path = %args.path.display(), "Path does not exist, creating it");
        std::fs::create_dir_all(&args.path)
            .with_context(|| format!("Failed to create '{}'", args.path.display()))?;
    }

    info!(
        path = %args.path.display(),
        interval_secs = args.interval,
        "Starting polling directory watcher, press Ctrl+C to stop"
    );

    let mut before = snapshot(&args.path)?;
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    // The first interval tick completes immediately; the baseline snapshot
    // above already covers it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match snapshot(&args.path) {
                    Ok(after) => {
                        report_changes(&before, &after);
                        before = after;
                    }
                    Err(e) => {
                        error!(error = %e, "Cannot snapshot directory, skipping tick");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Watcher stopped");
                return Ok(());
            }
        }
    }
}

fn snapshot(path: &Path) -> Result<Snapshot> {
    let mut entries = Snapshot::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        entries.insert(
            entry.path(),
            EntryDetails {
                modified: metadata.modified()?,
                is_directory: metadata.is_dir(),
            },
        );
    }
    Ok(entries)
}

fn report_changes(before: &Snapshot, after: &Snapshot) {
    for (path, details) in after {
        match before.get(path) {
            None => {
                info!(
                    event_type = "CREATE",
                    is_directory = details.is_directory,
                    source_path = %path.display(),
                    "directory entry appeared"
                );
            }
            Some(prev) if prev.modified != details.modified => {
                info!(
                    event_type = "MODIFY",
                    is_directory = details.is_directory,
                    source_path = %path.display(),
                    "directory entry modified"
                );
            }
            Some(_) => {}
        }
    }

    for (path, details) in before {
        if !after.contains_key(path) {
            info!(
                event_type = "DELETE",
                is_directory = details.is_directory,
                source_path = %path.display(),
                "directory entry removed"
            );
        }
    }
}
