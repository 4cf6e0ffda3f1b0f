//! `generate` command implementation.
//!
//! Appends randomized, realistically formatted log lines to a target file
//! at a random interval. A handy feed for exercising the agent.

use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::cli::GenerateArgs;

const LOG_LEVELS: [&str; 4] = ["INFO", "WARNING", "ERROR", "DEBUG"];

const SERVERS: [&str; 5] = ["web-01", "db-01", "api-03", "cache-main", "worker-05"];

const MESSAGES: [&str; 7] = [
    "User authentication successful",
    "Failed to connect to database: timeout",
    "Request processed in 25ms",
    "Cache miss for key 'user:123'",
    "Starting background job: process_payments",
    "Disk space is critically low on /var/log",
    "New user signed up: test@example.com",
];

/// Execute the `generate` command
pub async fn run_generate(args: &GenerateArgs) -> Result<()> {
    if args.min_delay_ms > args.max_delay_ms {
        anyhow::bail!(
            "min_delay_ms ({}) must be <= max_delay_ms ({})",
            args.min_delay_ms,
            args.max_delay_ms
        );
    }

    if let Some(parent) = args.target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory '{}'", parent.display())
            })?;
        }
    }

    info!(
        target = %args.target.display(),
        count = args.count,
        "Starting log generator, press Ctrl+C to stop"
    );

    let mut generated: u64 = 0;
    loop {
        if args.count != 0 && generated >= args.count {
            break;
        }

        let line = generate_log_line();
        append_line(args, &line).await?;
        generated += 1;
        info!(line = %line.trim_end(), "Generated");

        let delay = pick_delay(args.min_delay_ms, args.max_delay_ms);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => {
                info!(generated, "Log generator stopped");
                return Ok(());
            }
        }
    }

    info!(generated, "Log generator finished");
    Ok(())
}

async fn append_line(args: &GenerateArgs, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&args.target)
        .await
        .with_context(|| format!("Failed to open '{}'", args.target.display()))?;
    file.write_all(line.as_bytes()).await?;
    Ok(())
}

/// One randomized log line with a realistic format.
fn generate_log_line() -> String {
    let mut rng = rand::rng();
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
    let level = LOG_LEVELS[rng.random_range(0..LOG_LEVELS.len())];
    let server = SERVERS[rng.random_range(0..SERVERS.len())];
    let message = MESSAGES[rng.random_range(0..MESSAGES.len())];

    format!("[{timestamp}] [{level}] [{server}] - {message}\n")
}

fn pick_delay(min_ms: u64, max_ms: u64) -> Duration {
    let mut rng = rand::rng();
    Duration::from_millis(rng.random_range(min_ms..=max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = generate_log_line();
        assert!(line.starts_with('['));
        assert!(line.ends_with('\n'));
        assert!(line.contains("] - "));
    }

    #[test]
    fn test_delay_within_bounds() {
        for _ in 0..100 {
            let d = pick_delay(500, 3000);
            assert!(d >= Duration::from_millis(500));
            assert!(d <= Duration::from_millis(3000));
        }
    }
}
