//! Per-destination delivery counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single destination
#[derive(Debug, Default)]
pub struct DeliveryMetrics {
    /// Total successful deliveries
    delivered_count: AtomicU64,
    /// Total failed delivery attempts
    failure_count: AtomicU64,
    /// Total payload bytes successfully delivered
    bytes_delivered: AtomicU64,
}

impl DeliveryMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total delivered count
    pub fn delivered_count(&self) -> u64 {
        self.delivered_count.load(Ordering::Relaxed)
    }

    /// Record one successful delivery of `bytes` payload bytes
    pub fn record_delivered(&self, bytes: u64) {
        self.delivered_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_delivered.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total delivered bytes
    pub fn bytes_delivered(&self) -> u64 {
        self.bytes_delivered.load(Ordering::Relaxed)
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            delivered_count: self.delivered_count(),
            failure_count: self.failure_count(),
            bytes_delivered: self.bytes_delivered(),
        }
    }
}

/// Snapshot of delivery counters (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub delivered_count: u64,
    pub failure_count: u64,
    pub bytes_delivered: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = DeliveryMetrics::new();
        metrics.record_delivered(12);
        metrics.record_delivered(3);
        metrics.inc_failure_count();

        let snap = metrics.snapshot();
        assert_eq!(snap.delivered_count, 2);
        assert_eq!(snap.failure_count, 1);
        assert_eq!(snap.bytes_delivered, 15);
    }
}
