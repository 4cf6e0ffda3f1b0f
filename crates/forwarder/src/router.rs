//! Router - matches chunks against subscriptions and drives delivery

use std::sync::Arc;

use contracts::{DestinationConfig, LogChunk};
use tracing::{debug, error, info, instrument};

use crate::error::ForwardError;
use crate::metrics::{DeliveryMetrics, MetricsSnapshot};
use crate::senders::Sender;

/// One configured destination with its live sender and counters.
pub struct Destination {
    config: DestinationConfig,
    sender: Sender,
    metrics: Arc<DeliveryMetrics>,
}

impl Destination {
    /// Build the destination's sender from its configuration.
    pub async fn build(config: DestinationConfig) -> Result<Self, ForwardError> {
        let sender = Sender::build(&config).await?;
        Ok(Self {
            config,
            sender,
            metrics: Arc::new(DeliveryMetrics::new()),
        })
    }

    /// Destination id.
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Delivery counters.
    pub fn metrics(&self) -> &Arc<DeliveryMetrics> {
        &self.metrics
    }

    /// Whether payloads tagged `source_id` belong here.
    pub fn subscribes_to(&self, source_id: &str) -> bool {
        self.config.subscribes_to(source_id)
    }

    /// Deliver one chunk, recording the outcome.
    ///
    /// Failures are logged and counted, never propagated: one broken
    /// destination must not affect its siblings in the same routing call.
    async fn deliver(&self, chunk: &LogChunk) {
        match self.sender.send(&chunk.payload).await {
            Ok(()) => {
                self.metrics.record_delivered(chunk.len() as u64);
                info!(
                    destination = %self.config.id,
                    kind = self.sender.kind(),
                    source = %chunk.source_id,
                    bytes = chunk.len(),
                    "payload delivered"
                );
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                error!(
                    destination = %self.config.id,
                    kind = self.sender.kind(),
                    source = %chunk.source_id,
                    error = %e,
                    "delivery failed"
                );
            }
        }
    }
}

/// Routes chunks to every matching destination, in configuration order.
///
/// Shared read-only across all source monitors; holds no mutable state.
pub struct Router {
    destinations: Vec<Destination>,
}

impl Router {
    /// Build a router from destination configurations.
    ///
    /// A destination whose sender cannot be built is logged and skipped;
    /// the rest of the system proceeds (a configuration error is never
    /// fatal past startup validation).
    #[instrument(name = "router_build", skip(configs), fields(destinations = configs.len()))]
    pub async fn build(configs: Vec<DestinationConfig>) -> Self {
        let mut destinations = Vec::with_capacity(configs.len());
        for config in configs {
            let id = config.id.clone();
            match Destination::build(config).await {
                Ok(dest) => destinations.push(dest),
                Err(e) => {
                    error!(destination = %id, error = %e, "cannot build destination, skipping");
                }
            }
        }
        Self { destinations }
    }

    /// Create a router from prebuilt destinations (for testing).
    pub fn with_destinations(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    /// Built destinations, in configuration order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Forward one chunk to every subscribed destination.
    ///
    /// Destinations are attempted in configuration order; a failure at one
    /// never skips the next. Zero matches is a silent no-op. Returns the
    /// number of destinations that matched.
    pub async fn route(&self, chunk: &LogChunk) -> usize {
        let mut matched = 0;
        for dest in &self.destinations {
            if !dest.subscribes_to(&chunk.source_id) {
                continue;
            }
            matched += 1;
            dest.deliver(chunk).await;
        }

        if matched == 0 {
            debug!(source = %chunk.source_id, "no destination subscribed");
        }
        matched
    }
}
