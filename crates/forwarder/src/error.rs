//! Forwarder error types

use thiserror::Error;

/// Forwarder-specific errors
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Destination could not be constructed from its configuration
    #[error("failed to build destination '{destination}': {message}")]
    Build {
        destination: String,
        message: String,
    },

    /// One delivery attempt failed; the payload is not retried
    #[error("destination '{destination}' delivery failed: {message}")]
    Delivery {
        destination: String,
        message: String,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForwardError {
    /// Create a destination build error
    pub fn build(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Build {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            destination: destination.into(),
            message: message.into(),
        }
    }
}
