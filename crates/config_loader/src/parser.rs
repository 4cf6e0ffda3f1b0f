//! Configuration parsing module
//!
//! Supports TOML (primary) and JSON (the format the original rule files
//! used) interchangeably.

use contracts::{AgentConfig, AgentError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<AgentConfig, AgentError> {
    toml::from_str(content).map_err(|e| AgentError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<AgentConfig, AgentError> {
    serde_json::from_str(content).map_err(|e| AgentError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<AgentConfig, AgentError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DestinationKind, EventKind};

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[[sources]]
id = "app"
path = "logs/app.log"
enabled_events = ["MODIFY"]

[[destinations]]
id = "archive"
type = "file"
path = "out/archive.log"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.sources.len(), 1);
        assert!(config.sources[0].wants(EventKind::Modify));
        assert!(!config.sources[0].wants(EventKind::Delete));
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "poll_interval_secs": 5,
            "sources": [{
                "id": "app",
                "path": "logs/app.log",
                "enabled_events": ["CREATE", "DELETE", "MODIFY"]
            }],
            "destinations": [{
                "id": "collector",
                "type": "http",
                "url": "http://127.0.0.1:8080/ingest",
                "token": "secret",
                "source_ids": ["app"]
            }]
        }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.poll_interval_secs, 5);
        assert!(matches!(
            config.destinations[0].kind,
            DestinationKind::Http { ref url, token: Some(ref t) }
                if url == "http://127.0.0.1:8080/ingest" && t == "secret"
        ));
    }

    #[test]
    fn test_parse_unknown_destination_type_fails() {
        let content = r#"
[[sources]]
id = "app"
path = "logs/app.log"

[[destinations]]
id = "weird"
type = "carrier_pigeon"
"#;
        assert!(parse_toml(content).is_err());
    }
}
