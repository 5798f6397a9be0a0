//! Level events for column lifecycle changes
//!
//! Subscribers register per event kind and are called synchronously, in
//! registration order, from inside the window operation that fired the event.

use rustc_hash::FxHashMap;

use crate::world::storage::SharedColumn;

/// Column lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnEvent {
    /// Column left the window during a translate or resize
    Hidden,
}

pub type ColumnCallback = Box<dyn FnMut(ColumnEvent, &SharedColumn) + Send>;

/// Event hub owned by the window
#[derive(Default)]
pub struct LevelEvents {
    callbacks: FxHashMap<ColumnEvent, Vec<ColumnCallback>>,
}

impl LevelEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to an event kind
    pub fn listen<F>(&mut self, event: ColumnEvent, callback: F)
    where
        F: FnMut(ColumnEvent, &SharedColumn) + Send + 'static,
    {
        self.callbacks
            .entry(event)
            .or_default()
            .push(Box::new(callback));
    }

    /// Call every subscriber of `event`
    pub fn trigger(&mut self, event: ColumnEvent, column: &SharedColumn) {
        if let Some(callbacks) = self.callbacks.get_mut(&event) {
            for callback in callbacks.iter_mut() {
                callback(event, column);
            }
        }
    }

    pub fn listener_count(&self, event: ColumnEvent) -> usize {
        self.callbacks.get(&event).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for LevelEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelEvents")
            .field("hidden_listeners", &self.listener_count(ColumnEvent::Hidden))
            .finish()
    }
}
