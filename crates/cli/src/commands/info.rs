//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::DestinationKind;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    poll_interval_secs: u64,
    sources: Vec<SourceInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    destinations: Vec<DestinationInfo>,
}

#[derive(Serialize)]
struct SourceInfo {
    id: String,
    path: String,
    enabled_events: Vec<String>,
    interval_secs: u64,
}

#[derive(Serialize)]
struct DestinationInfo {
    id: String,
    kind: String,
    target: String,
    source_ids: Vec<String>,
    has_token: bool,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&config);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config);
    }

    Ok(())
}

fn build_config_info(config: &contracts::AgentConfig) -> ConfigInfo {
    let sources = config
        .sources
        .iter()
        .map(|s| {
            let mut events: Vec<String> =
                s.enabled_events.iter().map(|e| e.to_string()).collect();
            events.sort_unstable();
            SourceInfo {
                id: s.id.clone(),
                path: s.path.display().to_string(),
                enabled_events: events,
                interval_secs: s.poll_interval_secs(config.poll_interval_secs),
            }
        })
        .collect();

    let destinations = config
        .destinations
        .iter()
        .map(|d| {
            let (target, has_token) = describe_kind(&d.kind);
            DestinationInfo {
                id: d.id.clone(),
                kind: d.kind.name().to_string(),
                target,
                source_ids: d.source_ids.clone(),
                has_token,
            }
        })
        .collect();

    ConfigInfo {
        poll_interval_secs: config.poll_interval_secs,
        sources,
        destinations,
    }
}

/// Human-readable target plus whether a token is configured.
///
/// Token values are never printed.
fn describe_kind(kind: &DestinationKind) -> (String, bool) {
    match kind {
        DestinationKind::File { path } => (path.display().to_string(), false),
        DestinationKind::Syslog { host, port, token } => {
            (format!("{host}:{port}"), token.is_some())
        }
        DestinationKind::Http { url, token } => (url.clone(), token.is_some()),
    }
}

fn print_config_info(config: &contracts::AgentConfig) {
    println!("=== logship configuration ===\n");
    println!("Poll interval: {}s", config.poll_interval_secs);

    println!("\nSources ({}):", config.sources.len());
    for (i, source) in config.sources.iter().enumerate() {
        let is_last = i == config.sources.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let mut events: Vec<&str> = source.enabled_events.iter().map(|e| e.as_str()).collect();
        events.sort_unstable();
        println!(
            "   {} {} ({}) [{}] every {}s",
            prefix,
            source.id,
            source.path.display(),
            events.join(", "),
            source.poll_interval_secs(config.poll_interval_secs)
        );
    }

    if !config.destinations.is_empty() {
        println!("\nDestinations ({}):", config.destinations.len());
        for (i, dest) in config.destinations.iter().enumerate() {
            let is_last = i == config.destinations.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            let (target, has_token) = describe_kind(&dest.kind);
            println!(
                "   {} {} ({}) -> {}{} <- {:?}",
                prefix,
                dest.id,
                dest.kind.name(),
                target,
                if has_token { " (token)" } else { "" },
                dest.source_ids
            );
        }
    }

    println!();
}
