//! Watchable event kinds, as they appear in source configuration.

use serde::{Deserialize, Serialize};

/// Event kinds a source can subscribe to.
///
/// Configuration spells these in uppercase (`"CREATE"`, `"DELETE"`,
/// `"MODIFY"`). Truncation is reported under `Modify`: a shrinking file is
/// still a modification of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Source file appeared on disk.
    Create,
    /// Source file disappeared from disk.
    Delete,
    /// Source file content changed (growth or truncation).
    Modify,
}

impl EventKind {
    /// Uppercase name used in configuration and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
            Self::Modify => "MODIFY",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
