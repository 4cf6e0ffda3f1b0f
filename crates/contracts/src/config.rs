//! AgentConfig - Config Loader output
//!
//! Describes the complete agent setup: monitored sources, delivery
//! destinations, and polling cadence. Immutable after load.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::EventKind;

/// Subscription entry that matches every source id.
pub const WILDCARD: &str = "*";

/// Default seconds between two poll ticks of a source monitor.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// Default seconds before an HTTP delivery attempt is abandoned.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_source_ids() -> Vec<String> {
    vec![WILDCARD.to_string()]
}

/// Complete agent configuration blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Seconds between poll ticks, unless a source overrides it.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Monitored source files.
    pub sources: Vec<SourceConfig>,

    /// Delivery destinations.
    #[serde(default)]
    pub destinations: Vec<DestinationConfig>,
}

/// One monitored append-only file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Unique identifier, referenced by destination subscriptions.
    pub id: String,

    /// Filesystem location of the monitored file.
    pub path: PathBuf,

    /// Which transitions produce events. An empty set keeps the monitor
    /// tracking state silently.
    #[serde(default)]
    pub enabled_events: HashSet<EventKind>,

    /// Per-source override of the global poll interval.
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
}

impl SourceConfig {
    /// Whether this source has `kind` enabled.
    pub fn wants(&self, kind: EventKind) -> bool {
        self.enabled_events.contains(&kind)
    }

    /// Effective poll interval given the global default.
    pub fn poll_interval_secs(&self, global_default: u64) -> u64 {
        self.poll_interval_secs.unwrap_or(global_default)
    }
}

/// One delivery destination with its subscription filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Identifier used in logs and metrics.
    pub id: String,

    /// Source ids this destination subscribes to, in match order.
    /// `"*"` subscribes to every source.
    #[serde(default = "default_source_ids")]
    pub source_ids: Vec<String>,

    /// Sink kind and its type-specific parameters.
    #[serde(flatten)]
    pub kind: DestinationKind,
}

impl DestinationConfig {
    /// Whether payloads tagged `source_id` should be delivered here.
    ///
    /// Matches on the wildcard or on a verbatim, case-sensitive id.
    pub fn subscribes_to(&self, source_id: &str) -> bool {
        self.source_ids
            .iter()
            .any(|s| s == WILDCARD || s == source_id)
    }
}

/// Closed set of sink kinds.
///
/// Adding a kind here forces every dispatch site to handle it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DestinationKind {
    /// Append raw payload bytes to a local file.
    File {
        path: PathBuf,
    },
    /// One UDP datagram per payload line, syslog style.
    Syslog {
        host: String,
        port: u16,
        /// Prefix prepended to each line as `"<token> "`.
        #[serde(default)]
        token: Option<String>,
    },
    /// Single POST of the payload as an opaque byte body.
    Http {
        url: String,
        /// Sent as a bearer credential in the Authorization header.
        #[serde(default)]
        token: Option<String>,
    },
}

impl DestinationKind {
    /// Lowercase kind name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Syslog { .. } => "syslog",
            Self::Http { .. } => "http",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_kind_tagged_parse() {
        let json = r#"{"id": "d1", "type": "syslog", "host": "127.0.0.1", "port": 5514}"#;
        let dest: DestinationConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            dest.kind,
            DestinationKind::Syslog { ref host, port: 5514, token: None } if host == "127.0.0.1"
        ));
        // Unspecified subscription defaults to the wildcard.
        assert_eq!(dest.source_ids, vec![WILDCARD.to_string()]);
    }

    #[test]
    fn test_unknown_destination_type_rejected() {
        let json = r#"{"id": "d1", "type": "kafka", "topic": "logs"}"#;
        assert!(serde_json::from_str::<DestinationConfig>(json).is_err());
    }

    #[test]
    fn test_subscription_matching() {
        let dest: DestinationConfig = serde_json::from_str(
            r#"{"id": "d", "type": "file", "path": "/tmp/out.log", "source_ids": ["a", "b"]}"#,
        )
        .unwrap();
        assert!(dest.subscribes_to("a"));
        assert!(dest.subscribes_to("b"));
        assert!(!dest.subscribes_to("c"));
        assert!(!dest.subscribes_to("A"));
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let dest: DestinationConfig = serde_json::from_str(
            r#"{"id": "d", "type": "file", "path": "/tmp/out.log", "source_ids": ["*"]}"#,
        )
        .unwrap();
        assert!(dest.subscribes_to("anything"));
    }

    #[test]
    fn test_source_defaults() {
        let src: SourceConfig =
            serde_json::from_str(r#"{"id": "app", "path": "/var/log/app.log"}"#).unwrap();
        assert!(src.enabled_events.is_empty());
        assert!(!src.wants(EventKind::Modify));
        assert_eq!(src.poll_interval_secs(DEFAULT_POLL_INTERVAL_SECS), 2);
    }
}
