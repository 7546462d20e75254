//! Dashboard event bus

use ahash::AHashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common dashboard events
pub mod events {
    use super::Event;
    use crate::filters::RescueFilter;

    /// A filter preset was applied and the row set settled
    #[derive(Debug, Clone)]
    pub struct FilterApplied {
        pub filter: Option<RescueFilter>,
        pub row_count: usize,
    }

    /// The table's displayed rows changed
    #[derive(Debug, Clone)]
    pub struct TableDataChanged {
        pub row_count: usize,
    }

    /// The highlighted row changed
    #[derive(Debug, Clone)]
    pub struct SelectionChanged {
        pub row: Option<usize>,
    }

    /// A store operation failed
    #[derive(Debug, Clone)]
    pub struct StoreFailure {
        pub operation: String,
        pub error: String,
    }

    /// Fixture or import records were written to the store
    #[derive(Debug, Clone)]
    pub struct RecordsSeeded {
        pub count: usize,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        FilterApplied,
        TableDataChanged,
        SelectionChanged,
        StoreFailure,
        RecordsSeeded
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{FilterApplied, TableDataChanged};
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn handlers_receive_their_event_type_only() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        bus.subscribe::<FilterApplied>(handler_from_fn(move |event| {
            let applied = event.as_any().downcast_ref::<FilterApplied>().unwrap();
            counter.fetch_add(applied.row_count, Ordering::SeqCst);
        }));

        bus.publish(FilterApplied { filter: None, row_count: 3 });
        bus.publish(TableDataChanged { row_count: 100 });

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }
}
