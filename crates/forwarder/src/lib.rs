//! # Forwarder
//!
//! Payload routing and delivery module.
//!
//! Responsibilities:
//! - Match `LogChunk`s against destination subscriptions
//! - Deliver to file / syslog / http sinks
//! - Isolate per-destination failures, never block sibling deliveries

pub mod error;
pub mod metrics;
pub mod router;
pub mod senders;

pub use contracts::{DestinationConfig, DestinationKind, LogChunk};
pub use error::ForwardError;
pub use metrics::{DeliveryMetrics, MetricsSnapshot};
pub use router::{Destination, Router};
pub use senders::{FileSender, HttpSender, Sender, SyslogSender};
