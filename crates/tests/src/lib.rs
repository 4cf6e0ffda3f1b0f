//! # Integration Tests
//!
//! End-to-end tests across the monitor, router and sender crates.
//!
//! Covers:
//! - growth forwarding into each destination kind
//! - routing by subscription
//! - destination failure isolation across ticks
//! - supervisor lifecycle with shutdown

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashSet;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    use contracts::{DestinationConfig, DestinationKind, EventKind, SourceConfig};
    use forwarder::Router;
    use monitor::SourceMonitor;
    use tokio::net::UdpSocket;
    use tokio::sync::watch;
    use tokio::time::timeout;

    fn source_config(id: &str, path: PathBuf) -> SourceConfig {
        SourceConfig {
            id: id.to_string(),
            path,
            enabled_events: HashSet::from([EventKind::Create, EventKind::Delete, EventKind::Modify]),
            poll_interval_secs: None,
        }
    }

    fn file_destination(id: &str, path: PathBuf, source_ids: Vec<&str>) -> DestinationConfig {
        DestinationConfig {
            id: id.to_string(),
            source_ids: source_ids.into_iter().map(String::from).collect(),
            kind: DestinationKind::File { path },
        }
    }

    fn append(path: &Path, bytes: &[u8]) {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .unwrap();
        file.write_all(bytes).unwrap();
    }

    /// Source grows from 0 to "line1\nline2\n"; a wildcard file destination
    /// ends up with exactly that content.
    #[tokio::test]
    async fn test_growth_to_file_destination_is_byte_exact() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("app.log");
        let dest = dir.path().join("forwarded.log");

        let router = Arc::new(
            Router::build(vec![file_destination("wild", dest.clone(), vec!["*"])]).await,
        );
        let mut monitor =
            SourceMonitor::new(source_config("app", src.clone()), Duration::from_secs(2), router);

        std::fs::write(&src, b"").unwrap();
        monitor.tick().await; // CREATE
        append(&src, b"line1\nline2\n");
        monitor.tick().await; // MODIFY

        assert_eq!(std::fs::read(&dest).unwrap(), b"line1\nline2\n");
    }

    /// The same growth routed to a syslog destination with token "T"
    /// produces the datagrams "T line1\n" and "T line2\n".
    #[tokio::test]
    async fn test_growth_to_syslog_destination_with_token() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("app.log");

        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = receiver.local_addr().unwrap();

        let router = Arc::new(
            Router::build(vec![DestinationConfig {
                id: "collector".to_string(),
                source_ids: vec!["*".to_string()],
                kind: DestinationKind::Syslog {
                    host: addr.ip().to_string(),
                    port: addr.port(),
                    token: Some("T".to_string()),
                },
            }])
            .await,
        );
        let mut monitor =
            SourceMonitor::new(source_config("app", src.clone()), Duration::from_secs(2), router);

        std::fs::write(&src, b"").unwrap();
        monitor.tick().await;
        append(&src, b"line1\nline2\n");
        monitor.tick().await;

        let mut buf = [0u8; 256];
        let n = timeout(Duration::from_secs(5), receiver.recv(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&buf[..n], b"T line1\n");
        let n = timeout(Duration::from_secs(5), receiver.recv(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&buf[..n], b"T line2\n");
    }

    /// An HTTP destination answering 500 records failures while the
    /// sibling file destination and later ticks are unaffected.
    #[tokio::test]
    async fn test_http_500_is_isolated_and_agent_continues() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("app.log");
        let dest = dir.path().join("forwarded.log");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream
                    .write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\n\
                          content-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            }
        });

        let router = Arc::new(
            Router::build(vec![
                DestinationConfig {
                    id: "failing_http".to_string(),
                    source_ids: vec!["*".to_string()],
                    kind: DestinationKind::Http {
                        url: format!("http://{addr}/ingest"),
                        token: None,
                    },
                },
                file_destination("healthy_file", dest.clone(), vec!["*"]),
            ])
            .await,
        );
        let mut monitor = SourceMonitor::new(
            source_config("app", src.clone()),
            Duration::from_secs(2),
            Arc::clone(&router),
        );

        std::fs::write(&src, b"").unwrap();
        monitor.tick().await;
        append(&src, b"first\n");
        monitor.tick().await;
        append(&src, b"second\n");
        monitor.tick().await;

        // Both deltas reached the file destination despite the 500s.
        assert_eq!(std::fs::read(&dest).unwrap(), b"first\nsecond\n");
        assert_eq!(router.destinations()[0].metrics().failure_count(), 2);
        assert_eq!(router.destinations()[1].metrics().delivered_count(), 2);
    }

    /// A destination subscribed to source "A" never sees payloads from
    /// source "B".
    #[tokio::test]
    async fn test_routing_filters_by_source_id() {
        let dir = tempfile::tempdir().unwrap();
        let src_a = dir.path().join("a.log");
        let src_b = dir.path().join("b.log");
        let only_a = dir.path().join("only_a.log");
        let everything = dir.path().join("everything.log");

        let router = Arc::new(
            Router::build(vec![
                file_destination("only_a", only_a.clone(), vec!["A"]),
                file_destination("everything", everything.clone(), vec!["*"]),
            ])
            .await,
        );

        let mut monitor_a = SourceMonitor::new(
            source_config("A", src_a.clone()),
            Duration::from_secs(2),
            Arc::clone(&router),
        );
        let mut monitor_b = SourceMonitor::new(
            source_config("B", src_b.clone()),
            Duration::from_secs(2),
            Arc::clone(&router),
        );

        std::fs::write(&src_a, b"").unwrap();
        std::fs::write(&src_b, b"").unwrap();
        monitor_a.tick().await;
        monitor_b.tick().await;
        append(&src_a, b"from-a\n");
        append(&src_b, b"from-b\n");
        monitor_a.tick().await;
        monitor_b.tick().await;

        assert_eq!(std::fs::read(&only_a).unwrap(), b"from-a\n");
        assert_eq!(std::fs::read(&everything).unwrap(), b"from-a\nfrom-b\n");
    }

    /// Full lifecycle through the public entry point: configuration text,
    /// directory preparation, supervised monitors, shutdown.
    #[tokio::test]
    async fn test_run_until_forwards_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("logs/app.log");
        let dest = dir.path().join("out/forwarded.log");

        let toml = format!(
            r#"
poll_interval_secs = 1

[[sources]]
id = "app"
path = "{src}"
enabled_events = ["CREATE", "MODIFY"]

[[destinations]]
id = "archive"
type = "file"
path = "{dest}"
source_ids = ["app"]
"#,
            src = src.display(),
            dest = dest.display(),
        );

        let config =
            config_loader::ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
                .unwrap();
        config_loader::ensure_parent_dirs(&config).unwrap();
        std::fs::write(&src, b"boot line\n").unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let agent = tokio::spawn(monitor::run_until(config, shutdown_rx));

        // Two poll intervals: appearance, then the bootstrap delta.
        tokio::time::sleep(Duration::from_millis(2500)).await;

        shutdown_tx.send(true).unwrap();
        timeout(Duration::from_secs(5), agent)
            .await
            .expect("agent did not shut down")
            .unwrap()
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"boot line\n");
    }
}
