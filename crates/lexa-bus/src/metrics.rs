use lexa_core::ContextId;

use metrics::{counter, gauge};

/// Metrics collector for bus operations
#[derive(Clone)]
pub struct BusMetrics {
    prefix: &'static str,
}

impl BusMetrics {
    pub fn new() -> Self {
        Self { prefix: "lexa_bus" }
    }

    /// Record context registered with the bus
    pub fn context_registered(&self, context: ContextId) {
        counter!(format!("{}.contexts.registered", self.prefix)).increment(1);
        gauge!(format!("{}.contexts.active", self.prefix)).increment(1.0);
        counter!(format!("{}.contexts.registered.{}", self.prefix, context)).increment(1);
    }

    /// Record context unregistered
    pub fn context_unregistered(&self, context: ContextId) {
        counter!(format!("{}.contexts.unregistered.{}", self.prefix, context)).increment(1);
        gauge!(format!("{}.contexts.active", self.prefix)).decrement(1.0);
    }

    /// Record message accepted into a context inbox
    pub fn message_sent(&self, kind: &str) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
        counter!(format!("{}.messages.sent.{}", self.prefix, kind)).increment(1);
    }

    /// Record message handed to a handler
    pub fn message_delivered(&self, kind: &str) {
        counter!(format!("{}.messages.delivered", self.prefix)).increment(1);
        counter!(format!("{}.messages.delivered.{}", self.prefix, kind)).increment(1);
    }

    /// Record message dropped before a handler saw it
    pub fn message_dropped(&self, reason: &str) {
        counter!(format!("{}.messages.dropped", self.prefix)).increment(1);
        counter!(format!("{}.messages.dropped.{}", self.prefix, reason)).increment(1);
    }

    /// Record a delivery retry attempt
    pub fn delivery_retry(&self, kind: &str) {
        counter!(format!("{}.delivery.retries", self.prefix)).increment(1);
        counter!(format!("{}.delivery.retries.{}", self.prefix, kind)).increment(1);
    }
}

impl Default for BusMetrics {
    fn default() -> Self {
        Self::new()
    }
}
