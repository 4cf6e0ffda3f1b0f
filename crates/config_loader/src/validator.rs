//! Configuration sanitizing module
//!
//! Rules:
//! - source id non-empty and unique, path non-empty
//! - file destination: path non-empty
//! - syslog destination: host non-empty, port != 0
//! - http destination: url non-empty
//! - at least one valid source must remain (fatal otherwise)
//!
//! An offending source or destination is logged and skipped; the rest of
//! the configuration proceeds.

use std::collections::HashSet;

use contracts::{AgentConfig, AgentError, DestinationConfig, DestinationKind, SourceConfig};
use tracing::{error, warn};

/// Sanitize an AgentConfig, dropping invalid entries.
///
/// Returns the surviving configuration, or an error when no valid source
/// is left.
pub fn sanitize(config: AgentConfig) -> Result<AgentConfig, AgentError> {
    let sources = sanitize_sources(config.sources);
    let destinations = sanitize_destinations(config.destinations);

    if sources.is_empty() {
        return Err(AgentError::config_validation(
            "sources",
            "at least one valid source is required",
        ));
    }

    Ok(AgentConfig {
        poll_interval_secs: config.poll_interval_secs,
        sources,
        destinations,
    })
}

fn sanitize_sources(sources: Vec<SourceConfig>) -> Vec<SourceConfig> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(sources.len());

    for source in sources {
        if source.id.is_empty() {
            error!(path = %source.path.display(), "source with empty id, skipping");
            continue;
        }
        if source.path.as_os_str().is_empty() {
            error!(source = %source.id, "source with empty path, skipping");
            continue;
        }
        if !seen.insert(source.id.clone()) {
            error!(source = %source.id, "duplicate source id, skipping");
            continue;
        }
        if source.enabled_events.is_empty() {
            warn!(source = %source.id, "no enabled events, monitor will track state silently");
        }
        kept.push(source);
    }

    kept
}

fn sanitize_destinations(destinations: Vec<DestinationConfig>) -> Vec<DestinationConfig> {
    destinations
        .into_iter()
        .filter(|dest| match destination_fault(dest) {
            Some(fault) => {
                error!(
                    destination = %dest.id,
                    kind = dest.kind.name(),
                    fault,
                    "invalid destination, skipping"
                );
                false
            }
            None => true,
        })
        .collect()
}

/// First validation fault of a destination, or None when it is usable.
fn destination_fault(dest: &DestinationConfig) -> Option<&'static str> {
    if dest.id.is_empty() {
        return Some("empty id");
    }
    match &dest.kind {
        DestinationKind::File { path } => {
            if path.as_os_str().is_empty() {
                return Some("empty path");
            }
        }
        DestinationKind::Syslog { host, port, .. } => {
            if host.is_empty() {
                return Some("empty host");
            }
            if *port == 0 {
                return Some("port must be non-zero");
            }
        }
        DestinationKind::Http { url, .. } => {
            if url.is_empty() {
                return Some("empty url");
            }
        }
    }
    None
}
