//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Sanitize configuration (skip offending entries, keep the rest)
//! - Ensure parent directories for sources and file destinations exist
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("logship.toml")).unwrap();
//! println!("Sources: {}", config.sources.len());
//! ```

mod dirs;
mod parser;
mod validator;

pub use contracts::AgentConfig;
pub use dirs::ensure_parent_dirs;
pub use parser::ConfigFormat;

use contracts::AgentError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    /// Invalid sources or destinations are logged and skipped; zero valid
    /// sources is a fatal error.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - No valid source left after sanitizing
    pub fn load_from_path(path: &Path) -> Result<AgentConfig, AgentError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - No valid source left after sanitizing
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<AgentConfig, AgentError> {
        let config = parser::parse(content, format)?;
        validator::sanitize(config)
    }

    /// Serialize AgentConfig to TOML string
    pub fn to_toml(config: &AgentConfig) -> Result<String, AgentError> {
        toml::to_string_pretty(config)
            .map_err(|e| AgentError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize AgentConfig to JSON string
    pub fn to_json(config: &AgentConfig) -> Result<String, AgentError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| AgentError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, AgentError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            AgentError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| AgentError::config_parse(format!("unsupported config format: .{ext}")))
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, AgentError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
