//! In-process event dispatcher.
//!
//! Maps event names to the handlers registered for them. Publishing an event
//! spawns one tokio task per handler, so a slow, failing or panicking handler
//! never affects the publisher or the other handlers bound to the same name.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use tokio::task::JoinHandle;

use super::{DomainEvent, DomainEventSink};
use crate::errors::{Error, Result, ValidationError};

/// A reaction to one or more domain events.
///
/// Handlers own their error reporting: the dispatcher logs an `Err` returned
/// from [`DomainEventHandler::handle`] and drops it.
#[async_trait]
pub trait DomainEventHandler: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Event names this handler wants to receive.
    fn subscribed_events(&self) -> &'static [&'static str];

    async fn handle(&self, event: DomainEvent) -> Result<()>;
}

/// How `emit` relates to handler execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Fire and forget. `emit` returns once every handler task is spawned.
    #[default]
    Spawn,
    /// Handlers still run in their own tasks, but `emit` waits for all of
    /// them to finish. Used where callers need deterministic assertions.
    Await,
}

impl DispatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchMode::Spawn => "spawn",
            DispatchMode::Await => "await",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spawn" => Ok(DispatchMode::Spawn),
            "await" => Ok(DispatchMode::Await),
            other => Err(ValidationError::UnknownVariant {
                kind: "dispatch mode",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// Event name to handler list registry plus the dispatch policy.
///
/// Built once at process start and shared as `Arc<dyn DomainEventSink>`.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<&'static str, Vec<Arc<dyn DomainEventHandler>>>,
    mode: DispatchMode,
}

impl EventDispatcher {
    pub fn new(mode: DispatchMode) -> Self {
        Self {
            handlers: HashMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Binds a handler to a single event name.
    pub fn register(&mut self, event_name: &'static str, handler: Arc<dyn DomainEventHandler>) {
        debug!("Registering {} for '{}'", handler.name(), event_name);
        self.handlers.entry(event_name).or_default().push(handler);
    }

    /// Binds a handler to every event name it subscribes to.
    pub fn subscribe(&mut self, handler: Arc<dyn DomainEventHandler>) {
        for event_name in handler.subscribed_events() {
            self.register(event_name, handler.clone());
        }
    }

    /// Builder-style variant of [`EventDispatcher::subscribe`].
    pub fn with_handler(mut self, handler: Arc<dyn DomainEventHandler>) -> Self {
        self.subscribe(handler);
        self
    }

    /// Number of handlers bound to an event name.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map_or(0, Vec::len)
    }

    /// Spawns one task per handler bound to the event's name.
    fn schedule(&self, event: DomainEvent) -> Result<Vec<JoinHandle<()>>> {
        let event_name = event.name();
        let Some(handlers) = self.handlers.get(event_name) else {
            debug!("No handlers registered for '{}'", event_name);
            return Ok(Vec::new());
        };

        let runtime =
            tokio::runtime::Handle::try_current().map_err(|e| Error::EventPublish {
                event: event_name,
                reason: e.to_string(),
            })?;

        let tasks = handlers
            .iter()
            .map(|handler| {
                let handler = handler.clone();
                let event = event.clone();
                runtime.spawn(async move {
                    if let Err(e) = handler.handle(event).await {
                        error!(
                            "{} failed while handling '{}': {}",
                            handler.name(),
                            event_name,
                            e
                        );
                    }
                })
            })
            .collect();
        Ok(tasks)
    }
}

#[async_trait]
impl DomainEventSink for EventDispatcher {
    async fn emit(&self, event: DomainEvent) -> Result<()> {
        let event_name = event.name();
        let tasks = self.schedule(event)?;
        debug!(
            "Dispatched '{}' to {} handler(s) ({})",
            event_name,
            tasks.len(),
            self.mode
        );

        if self.mode == DispatchMode::Await {
            for joined in futures::future::join_all(tasks).await {
                if let Err(e) = joined {
                    error!("Handler task for '{}' aborted: {}", event_name, e);
                }
            }
        }
        Ok(())
    }
}
