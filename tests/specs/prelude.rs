//! Shared helpers for bus specs.

#![allow(dead_code)]

pub use evd_adapters::{AcceptAllValidator, FakeLogger, FakeValidator, LogLevel, TracedValidator};
pub use evd_core::{
    BusConfig, BusError, Event, EventBus, EventContext, HandlerError, HandlerResult, PartialEvent,
    PublishOptions, PublishResult, Subscription,
};
pub use serde_json::json;
pub use std::sync::atomic::{AtomicU32, Ordering};
pub use std::sync::{Arc, Mutex};
pub use std::time::Duration;

/// A bus wired to a recording logger
pub fn bus_with_logger(config: BusConfig) -> (EventBus, FakeLogger) {
    let logger = FakeLogger::new();
    let bus = EventBus::new(config)
        .unwrap()
        .with_logger(Arc::new(logger.clone()));
    (bus, logger)
}

/// Events received by a subscriber, in arrival order
#[derive(Clone, Default)]
pub struct Inbox {
    events: Arc<Mutex<Vec<(Arc<Event>, EventContext)>>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `pattern`, recording every delivery
    pub fn subscribe(&self, bus: &EventBus, pattern: &str) -> Subscription {
        let events = Arc::clone(&self.events);
        bus.subscribe(pattern, move |event, ctx| {
            let events = Arc::clone(&events);
            async move {
                events.lock().unwrap().push((event, ctx));
                Ok(())
            }
        })
        .unwrap()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(event, _)| event.event_type.clone())
            .collect()
    }

    pub fn first(&self) -> (Arc<Event>, EventContext) {
        self.events.lock().unwrap()[0].clone()
    }
}

/// Subscribe a handler that always fails, counting its attempts
pub fn subscribe_failing(bus: &EventBus, pattern: &str, attempts: &Arc<AtomicU32>) -> Subscription {
    let attempts = Arc::clone(attempts);
    bus.subscribe(pattern, move |_event, _ctx| {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(HandlerError::new("always fails"))
        }
    })
    .unwrap()
}
