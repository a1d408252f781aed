use std::sync::Arc;

use parking_lot::Mutex;

use super::event::{AuditEvent, AuditLevel};

/// Receives audit events from the shop.
///
/// Recording cannot fail from the caller's point of view: an implementation
/// that does I/O must deal with its own errors, so order processing never
/// depends on the audit trail.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn record(&self, _event: &AuditEvent) {}
}

/// Forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, event: &AuditEvent) {
        match event.level {
            AuditLevel::Info => tracing::info!(
                event_id = %event.id,
                operation = %event.operation,
                component = %event.component,
                "{}",
                event.message
            ),
            AuditLevel::Warning => tracing::warn!(
                event_id = %event.id,
                operation = %event.operation,
                component = %event.component,
                "{}",
                event.message
            ),
            AuditLevel::Severe => tracing::error!(
                event_id = %event.id,
                operation = %event.operation,
                component = %event.component,
                "{}",
                event.message
            ),
        }
    }
}

/// Keeps events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemorySink {
    fn record(&self, event: &AuditEvent) {
        self.events.lock().push(event.clone());
    }
}

impl AuditSink for Vec<Box<dyn AuditSink>> {
    fn record(&self, event: &AuditEvent) {
        for sink in self {
            sink.record(event);
        }
    }
}
