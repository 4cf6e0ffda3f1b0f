//! Startup directory preparation.
//!
//! Every source path and every file destination path must have an existing
//! parent directory before the monitors start. Creation failure here is a
//! fatal startup error.

use std::fs;
use std::path::Path;

use contracts::{AgentConfig, AgentError, DestinationKind};
use tracing::debug;

/// Create parent directories for all source paths and file destination
/// paths.
///
/// # Errors
/// Returns a startup error naming the first directory that could not be
/// created.
pub fn ensure_parent_dirs(config: &AgentConfig) -> Result<(), AgentError> {
    for source in &config.sources {
        ensure_parent(&source.path)?;
    }
    for dest in &config.destinations {
        if let DestinationKind::File { path } = &dest.kind {
            ensure_parent(path)?;
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), AgentError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| {
        AgentError::startup(format!(
            "cannot create directory '{}': {e}",
            parent.display()
        ))
    })?;
    debug!(dir = %parent.display(), "created parent directory");
    Ok(())
}
