//! Sender implementations
//!
//! One sender per destination kind: file append, syslog over UDP,
//! HTTP POST. The `Sender` enum is the closed dispatch point; adding a
//! kind forces every match below to be extended.

mod file;
mod http;
mod syslog;

pub use self::file::FileSender;
pub use self::http::HttpSender;
pub use self::syslog::SyslogSender;

use contracts::{DestinationConfig, DestinationKind};

use crate::error::ForwardError;

/// Delivery mechanism for one destination, stateless per call.
pub enum Sender {
    /// Raw append to a local file.
    File(FileSender),
    /// One UDP datagram per payload line.
    Syslog(SyslogSender),
    /// Single POST of the whole payload.
    Http(HttpSender),
}

impl Sender {
    /// Build the sender for a destination configuration.
    ///
    /// # Errors
    /// Returns a build error when the sender cannot be constructed
    /// (unresolvable syslog address, invalid HTTP client setup).
    pub async fn build(config: &DestinationConfig) -> Result<Self, ForwardError> {
        match &config.kind {
            DestinationKind::File { path } => Ok(Self::File(FileSender::new(path.clone()))),
            DestinationKind::Syslog { host, port, token } => Ok(Self::Syslog(
                SyslogSender::bind(&config.id, host, *port, token.clone()).await?,
            )),
            DestinationKind::Http { url, token } => Ok(Self::Http(HttpSender::new(
                &config.id,
                url.clone(),
                token.clone(),
            )?)),
        }
    }

    /// Deliver one payload.
    ///
    /// At most one attempt; errors are reported, never retried.
    pub async fn send(&self, payload: &[u8]) -> Result<(), ForwardError> {
        match self {
            Self::File(sender) => sender.send(payload).await,
            Self::Syslog(sender) => sender.send(payload).await,
            Self::Http(sender) => sender.send(payload).await,
        }
    }

    /// Lowercase kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Syslog(_) => "syslog",
            Self::Http(_) => "http",
        }
    }
}
