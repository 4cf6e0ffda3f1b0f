//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RunArgs;

/// Execute the `run` command
pub async fn run_agent(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load, parse and sanitize configuration
    let mut config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(secs) = args.poll_interval {
        info!(poll_interval_secs = secs, "Overriding poll interval from CLI");
        config.poll_interval_secs = secs;
    }

    info!(
        sources = config.sources.len(),
        destinations = config.destinations.len(),
        poll_interval_secs = config.poll_interval_secs,
        "Configuration loaded"
    );

    // Startup summary: one line per source and destination
    for source in &config.sources {
        let mut events: Vec<&str> = source.enabled_events.iter().map(|e| e.as_str()).collect();
        events.sort_unstable();
        info!(
            source = %source.id,
            path = %source.path.display(),
            enabled_events = ?events,
            interval_secs = source.poll_interval_secs(config.poll_interval_secs),
            "Monitoring source"
        );
    }
    for dest in &config.destinations {
        info!(
            destination = %dest.id,
            kind = dest.kind.name(),
            source_ids = ?dest.source_ids,
            "Forwarding to destination"
        );
    }

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&config);
        return Ok(());
    }

    // Startup precondition: parent directories must exist
    config_loader::ensure_parent_dirs(&config)
        .context("Failed to prepare source/destination directories")?;

    info!("Starting agent...");
    monitor::run(config)
        .await
        .context("Agent execution failed")?;

    info!("logship finished");
    Ok(())
}

/// Print configuration summary for dry-run mode
fn print_config_summary(config: &contracts::AgentConfig) {
    println!("\n=== Configuration Summary ===\n");
    println!("Poll interval: {}s", config.poll_interval_secs);

    println!("\nSources ({}):", config.sources.len());
    for source in &config.sources {
        let mut events: Vec<&str> = source.enabled_events.iter().map(|e| e.as_str()).collect();
        events.sort_unstable();
        println!(
            "  - {} ({}) - events: {}",
            source.id,
            source.path.display(),
            if events.is_empty() {
                "none".to_string()
            } else {
                events.join(", ")
            }
        );
    }

    if !config.destinations.is_empty() {
        println!("\nDestinations ({}):", config.destinations.len());
        for dest in &config.destinations {
            println!(
                "  - {} ({}) <- {:?}",
                dest.id,
                dest.kind.name(),
                dest.source_ids
            );
        }
    }

    println!();
}
