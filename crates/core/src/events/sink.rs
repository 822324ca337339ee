//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::DomainEvent;
use crate::errors::Result;

/// Trait for receiving domain events.
///
/// Core services emit events through this trait after their primary write
/// has committed.
///
/// # Design Rules
///
/// - `emit()` must not wait on handler work unless the sink was explicitly
///   configured to (see [`super::DispatchMode::Await`])
/// - An `Err` means the event could not be scheduled at all; handler
///   failures are never reported back through this trait
#[async_trait]
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    async fn emit(&self, event: DomainEvent) -> Result<()>;

    /// Emit multiple domain events.
    ///
    /// Default implementation calls `emit()` for each event and stops at
    /// the first scheduling failure.
    async fn emit_batch(&self, events: Vec<DomainEvent>) -> Result<()> {
        for event in events {
            self.emit(event).await?;
        }
        Ok(())
    }
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

#[async_trait]
impl DomainEventSink for NoOpDomainEventSink {
    async fn emit(&self, _event: DomainEvent) -> Result<()> {
        Ok(())
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl DomainEventSink for MockDomainEventSink {
    async fn emit(&self, event: DomainEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_sink_accepts_events() {
        let sink = NoOpDomainEventSink;
        sink.emit(DomainEvent::school_news_created("n1".to_string()))
            .await
            .unwrap();
        sink.emit_batch(vec![
            DomainEvent::school_news_updated("n1".to_string()),
            DomainEvent::school_news_deleted("n1".to_string()),
        ])
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_mock_sink_collects_events() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::school_news_created("n1".to_string()))
            .await
            .unwrap();
        assert_eq!(sink.len(), 1);

        sink.emit_batch(vec![
            DomainEvent::school_news_updated("n1".to_string()),
            DomainEvent::school_news_deleted("n1".to_string()),
        ])
        .await
        .unwrap();
        assert_eq!(sink.len(), 3);
        assert_eq!(
            sink.events()[2],
            DomainEvent::school_news_deleted("n1".to_string())
        );

        sink.clear();
        assert!(sink.is_empty());
    }
}
